//! Currency resolution and conversion.
//!
//! Country names map to currency codes through a static table. Exchange rates
//! come from a [`RateProvider`] and are kept in a [`RateCache`] for one hour
//! by default. A failed lookup returns a rate of `1.0` and is not cached, so
//! the next call goes back to the provider.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::ProviderError;

pub const DEFAULT_CURRENCY: &str = "USD";
const FALLBACK_RATE: f64 = 1.0;

// Order matters: the substring pass returns the first hit.
const COUNTRY_CURRENCIES: &[(&str, &str)] = &[
    ("United States", "USD"),
    ("USA", "USD"),
    ("US", "USD"),
    ("United Kingdom", "GBP"),
    ("UK", "GBP"),
    ("England", "GBP"),
    ("Britain", "GBP"),
    ("France", "EUR"),
    ("Germany", "EUR"),
    ("Italy", "EUR"),
    ("Spain", "EUR"),
    ("Netherlands", "EUR"),
    ("Austria", "EUR"),
    ("Belgium", "EUR"),
    ("Portugal", "EUR"),
    ("Japan", "JPY"),
    ("China", "CNY"),
    ("India", "INR"),
    ("Canada", "CAD"),
    ("Australia", "AUD"),
    ("Switzerland", "CHF"),
    ("Sweden", "SEK"),
    ("Norway", "NOK"),
    ("Denmark", "DKK"),
    ("Thailand", "THB"),
    ("South Korea", "KRW"),
    ("Singapore", "SGD"),
    ("Hong Kong", "HKD"),
    ("Mexico", "MXN"),
    ("Brazil", "BRL"),
    ("Russia", "RUB"),
    ("Turkey", "TRY"),
];

const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CNY", "¥"),
    ("INR", "₹"),
    ("CAD", "C$"),
    ("AUD", "A$"),
    ("CHF", "CHF"),
    ("SEK", "kr"),
    ("NOK", "kr"),
    ("DKK", "kr"),
    ("THB", "฿"),
];

/// Map a country or place name to its currency code. Never fails: unknown
/// names resolve to `USD`.
pub fn resolve_currency(country_or_place: &str) -> &'static str {
    let country = country_or_place.trim();

    if let Some((_, code)) = COUNTRY_CURRENCIES.iter().find(|(name, _)| *name == country) {
        return code;
    }

    let needle = country.to_lowercase();
    COUNTRY_CURRENCIES
        .iter()
        .find(|(name, _)| {
            let name = name.to_lowercase();
            name.contains(&needle) || needle.contains(&name)
        })
        .map(|(_, code)| *code)
        .unwrap_or(DEFAULT_CURRENCY)
}

/// The country part of a free-text destination: whatever follows the last
/// comma, or the whole destination when there is none.
pub fn country_from_destination(destination: &str) -> &str {
    match destination.rsplit_once(',') {
        Some((_, country)) => country.trim(),
        None => destination.trim(),
    }
}

pub fn currency_symbol(code: &str) -> &str {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, symbol)| *symbol)
        .unwrap_or(code)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Current rate for one unit of `from` expressed in `to`.
    async fn latest_rate(&self, from: &str, to: &str) -> Result<f64, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    rates: HashMap<String, f64>,
}

/// exchangerate-api.com `latest` endpoint.
pub struct ExchangeRateApi {
    http_client: reqwest::Client,
    base_url: String,
}

impl ExchangeRateApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApi {
    async fn latest_rate(&self, from: &str, to: &str) -> Result<f64, ProviderError> {
        let url = format!("{}/{}", self.base_url, from);
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let body: LatestRatesResponse = response.json().await?;
        // A currency missing from the table is treated as parity
        Ok(body.rates.get(to).copied().unwrap_or(FALLBACK_RATE))
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedRate {
    rate: f64,
    fetched_at: DateTime<Utc>,
}

/// In-memory exchange-rate cache keyed by `"{from}_{to}"`.
///
/// Entries are never evicted; an expired key is simply overwritten by the
/// next successful fetch.
pub struct RateCache {
    entries: Mutex<HashMap<String, CachedRate>>,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
}

impl RateCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::hours(1)),
            clock,
        }
    }

    pub fn key(from: &str, to: &str) -> String {
        format!("{}_{}", from, to)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        let now = self.clock.now();
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .get(key)
            .filter(|entry| now - entry.fetched_at < self.ttl)
            .map(|entry| entry.rate)
    }

    pub fn put(&self, key: String, rate: f64) {
        let fetched_at = self.clock.now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, CachedRate { rate, fetched_at });
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct CurrencyService {
    provider: Arc<dyn RateProvider>,
    cache: RateCache,
}

impl CurrencyService {
    pub fn new(provider: Arc<dyn RateProvider>, cache: RateCache) -> Self {
        Self { provider, cache }
    }

    /// Rate for `from -> to`, served from the cache while fresh.
    pub async fn get_exchange_rate(&self, from: &str, to: &str) -> f64 {
        let key = RateCache::key(from, to);

        if let Some(rate) = self.cache.get(&key) {
            log::debug!("Using cached exchange rate for {}", key);
            return rate;
        }

        match self.provider.latest_rate(from, to).await {
            Ok(rate) => {
                self.cache.put(key, rate);
                rate
            }
            Err(e) => {
                log::warn!("Currency API error for {}: {}", key, e);
                FALLBACK_RATE
            }
        }
    }

    pub async fn convert_price(&self, amount: f64, from: &str, to: &str) -> f64 {
        if from == to {
            return amount;
        }
        let rate = self.get_exchange_rate(from, to).await;
        round_cents(amount * rate)
    }

    /// Local price with its USD equivalent, e.g. `€100 (~$108.5 USD)`.
    pub async fn format_price_with_conversion(&self, local_amount: f64, local_currency: &str) -> String {
        if local_currency == DEFAULT_CURRENCY {
            return format!("${}", local_amount);
        }
        let usd_amount = self
            .convert_price(local_amount, local_currency, DEFAULT_CURRENCY)
            .await;
        format!(
            "{}{} (~${} USD)",
            currency_symbol(local_currency),
            local_amount,
            usd_amount
        )
    }

    pub fn cache(&self) -> &RateCache {
        &self.cache
    }
}
