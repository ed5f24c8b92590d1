//! Runtime configuration for the API.
//!
//! Everything is read once from the process environment at startup and then
//! handed to the services that need it. Nothing else in the crate touches
//! `std::env`.

use std::env;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_EXCHANGE_RATE_BASE_URL: &str = "https://api.exchangerate-api.com/v4/latest";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;
const MIN_PROVIDER_TIMEOUT_SECS: u64 = 5;
const MAX_PROVIDER_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RATE_CACHE_TTL_SECS: u64 = 3600;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub google_api_key: Option<String>,
    pub openweathermap_api_key: Option<String>,
    pub exchange_rate_base_url: String,
    pub provider_timeout_secs: u64,
    pub rate_cache_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            google_api_key: None,
            openweathermap_api_key: None,
            exchange_rate_base_url: DEFAULT_EXCHANGE_RATE_BASE_URL.to_string(),
            provider_timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
            rate_cache_ttl_secs: DEFAULT_RATE_CACHE_TTL_SECS,
        }
    }
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults for anything missing or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let provider_timeout_secs = env::var("PROVIDER_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse::<u64>().ok())
            .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS)
            .clamp(MIN_PROVIDER_TIMEOUT_SECS, MAX_PROVIDER_TIMEOUT_SECS);

        let rate_cache_ttl_secs = env::var("RATE_CACHE_TTL_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_RATE_CACHE_TTL_SECS);

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            gemini_model: non_empty_var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            google_api_key: non_empty_var("GOOGLE_API_KEY"),
            openweathermap_api_key: non_empty_var("OPENWEATHERMAP_API_KEY"),
            exchange_rate_base_url: non_empty_var("EXCHANGE_RATE_BASE_URL")
                .unwrap_or(defaults.exchange_rate_base_url),
            provider_timeout_secs,
            rate_cache_ttl_secs,
        }
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    pub fn rate_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.rate_cache_ttl_secs)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Short, non-reversible preview of a secret for status output.
pub fn key_preview(key: &str) -> String {
    if key.chars().count() > 8 {
        let head: String = key.chars().take(4).collect();
        format!("{}***", head)
    } else {
        "***".to_string()
    }
}
