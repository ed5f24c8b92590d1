use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::error::ProviderError;
use crate::models::weather::WeatherSnapshot;

const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
// The forecast endpoint reports in 3-hour steps
const FORECAST_SLOTS_PER_DAY: u32 = 8;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions. Never fails: a failed call yields
    /// [`WeatherSnapshot::fallback`].
    async fn current_weather(&self, lat: f64, lng: f64) -> WeatherSnapshot;

    async fn forecast(&self, lat: f64, lng: f64, days: u32) -> Result<Value, ProviderError>;
}

pub struct OpenWeatherService {
    http_client: reqwest::Client,
    api_key: String,
}

impl OpenWeatherService {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
        })
    }

    async fn fetch_current(&self, lat: f64, lng: f64) -> Result<WeatherSnapshot, ProviderError> {
        let response = self
            .http_client
            .get(format!("{}/weather", OPENWEATHER_BASE_URL))
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lng.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.without_url()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        Ok(response.json().await.map_err(|e| e.without_url())?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherService {
    async fn current_weather(&self, lat: f64, lng: f64) -> WeatherSnapshot {
        match self.fetch_current(lat, lng).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("OpenWeatherMap API error, using fallback reading: {}", e);
                WeatherSnapshot::fallback()
            }
        }
    }

    async fn forecast(&self, lat: f64, lng: f64, days: u32) -> Result<Value, ProviderError> {
        let result = self
            .http_client
            .get(format!("{}/forecast", OPENWEATHER_BASE_URL))
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lng.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
                ("cnt", (days * FORECAST_SLOTS_PER_DAY).to_string()),
            ])
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                Ok(response.json().await.map_err(|e| e.without_url())?)
            }
            Ok(response) => {
                log::warn!("Weather forecast API returned {}", response.status());
                Err(ProviderError::Unavailable("Forecast data unavailable".to_string()))
            }
            Err(e) => {
                log::warn!("Weather forecast API error: {}", e.without_url());
                Err(ProviderError::Unavailable("Forecast data unavailable".to_string()))
            }
        }
    }
}
