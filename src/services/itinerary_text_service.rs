//! Cleanup of model output.
//!
//! Models sometimes ignore the "no markdown" instruction, so headings, bold
//! markers and stray asterisks are stripped afterwards. A currency block is
//! then inserted for destinations that do not use USD.

use regex::Regex;
use std::sync::OnceLock;

use crate::services::currency_service::{
    country_from_destination, resolve_currency, CurrencyService, DEFAULT_CURRENCY,
};

// Lines before the currency block; earlier lines are usually the title.
const CURRENCY_BLOCK_LINE: usize = 3;

fn heading_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^#{1,6}\s*").expect("valid heading regex"))
}

fn bold_span() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold regex"))
}

fn blank_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n\s*\n+").expect("valid blank-line regex"))
}

/// Drop every `*` that has no `*` on either side.
fn strip_lone_asterisks(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            if c != '*' {
                return true;
            }
            let prev = i.checked_sub(1).and_then(|p| chars.get(p)) == Some(&'*');
            let next = chars.get(i + 1) == Some(&'*');
            prev || next
        })
        .map(|(_, &c)| c)
        .collect()
}

/// Remove markdown residue and collapse vertical whitespace.
///
/// Idempotent: cleaning cleaned text changes nothing.
pub fn clean_text(text: &str) -> String {
    let text = heading_marker().replace_all(text, "");
    let text = bold_span().replace_all(&text, "$1");
    let text = strip_lone_asterisks(&text);
    let text = blank_run().replace_all(&text, "\n\n");

    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn has_currency_block(text: &str) -> bool {
    text.contains("CURRENCY INFORMATION") || text.contains("Exchange Rate")
}

pub fn currency_block(local_currency: &str, rate: f64) -> String {
    format!(
        "\n\nCURRENCY INFORMATION:\nLocal Currency: {code}\nExchange Rate: 1 USD = {rate:.2} {code}\nNote: All prices shown as {code} amount (~USD equivalent)\n",
        code = local_currency,
        rate = rate
    )
}

fn insert_block(text: &str, block: &str) -> String {
    let mut lines: Vec<&str> = text.split('\n').collect();
    let at = CURRENCY_BLOCK_LINE.min(lines.len());
    lines.insert(at, block);
    lines.join("\n")
}

/// Insert a currency summary for non-USD destinations.
///
/// Text that already mentions exchange rates is returned untouched, and no
/// rate is fetched for it.
pub async fn enrich_with_currency(text: &str, destination: &str, currency: &CurrencyService) -> String {
    let local_currency = resolve_currency(country_from_destination(destination));
    if local_currency == DEFAULT_CURRENCY || has_currency_block(text) {
        return text.to_string();
    }

    let rate = currency
        .get_exchange_rate(DEFAULT_CURRENCY, local_currency)
        .await;
    insert_block(text, &currency_block(local_currency, rate))
}
