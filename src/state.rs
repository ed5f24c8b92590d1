use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{AppError, ProviderError};
use crate::services::currency_service::{CurrencyService, ExchangeRateApi, RateCache, SystemClock};
use crate::services::gemini_service::{GeminiService, ItineraryModel};
use crate::services::google_maps_service::{GoogleMapsService, MapsProvider};
use crate::services::itinerary_generation_service::ItineraryGenerator;
use crate::services::location_service::LocationService;
use crate::services::weather_service::{OpenWeatherService, WeatherProvider};

/// Shared application state handed to every handler through `web::Data`.
///
/// Optional providers are `None` when their keys are not configured; the
/// handlers that need them answer 503 instead.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub currency: Arc<CurrencyService>,
    pub maps: Option<Arc<dyn MapsProvider>>,
    pub weather: Option<Arc<dyn WeatherProvider>>,
    pub model: Option<Arc<dyn ItineraryModel>>,
}

impl AppState {
    /// Build the production adapters described by `config`.
    pub fn from_config(config: AppConfig) -> Result<Self, ProviderError> {
        let timeout = config.provider_timeout();

        let rates = ExchangeRateApi::new(config.exchange_rate_base_url.clone(), timeout)?;
        let currency = Arc::new(CurrencyService::new(
            Arc::new(rates),
            RateCache::new(config.rate_cache_ttl(), Arc::new(SystemClock)),
        ));

        let (maps, weather) = match (&config.google_api_key, &config.openweathermap_api_key) {
            (Some(google_key), Some(weather_key)) => {
                let maps: Arc<dyn MapsProvider> =
                    Arc::new(GoogleMapsService::new(google_key.clone(), timeout)?);
                let weather: Arc<dyn WeatherProvider> =
                    Arc::new(OpenWeatherService::new(weather_key.clone(), timeout)?);
                log::info!("Google APIs and weather services initialized");
                (Some(maps), Some(weather))
            }
            _ => {
                log::warn!("Google APIs not configured (need GOOGLE_API_KEY and OPENWEATHERMAP_API_KEY)");
                (None, None)
            }
        };

        let model = match &config.gemini_api_key {
            Some(key) => {
                let model: Arc<dyn ItineraryModel> =
                    Arc::new(GeminiService::new(key.clone(), config.gemini_model.clone())?);
                log::info!("Gemini AI configured with model {}", config.gemini_model);
                Some(model)
            }
            None => {
                log::warn!("GEMINI_API_KEY not set, itinerary generation disabled");
                None
            }
        };

        Ok(Self {
            config,
            currency,
            maps,
            weather,
            model,
        })
    }

    /// Location aggregation, available only when both maps and weather are.
    pub fn location_service(&self) -> Option<LocationService> {
        match (&self.maps, &self.weather) {
            (Some(maps), Some(weather)) => Some(LocationService::new(maps.clone(), weather.clone())),
            _ => None,
        }
    }

    pub fn generator(&self) -> Result<ItineraryGenerator, AppError> {
        let model = self.model.clone().ok_or(AppError::ModelUnavailable)?;
        Ok(ItineraryGenerator::new(
            model,
            self.currency.clone(),
            self.location_service(),
        ))
    }
}
