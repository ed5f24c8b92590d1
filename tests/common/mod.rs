#![allow(dead_code)]

use actix_web::{web, App};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gotravel_api::models::location::{Coordinates, GeocodeResult, Geometry, Place, TimezoneInfo};
use gotravel_api::models::weather::WeatherSnapshot;
use gotravel_api::routes;
use gotravel_api::services::currency_service::{CurrencyService, RateCache, RateProvider, SystemClock};
use gotravel_api::services::gemini_service::ItineraryModel;
use gotravel_api::services::google_maps_service::{DirectionsQuery, MapsProvider};
use gotravel_api::services::weather_service::WeatherProvider;
use gotravel_api::{AppConfig, AppState, ProviderError};

pub const MARKDOWN_ITINERARY: &str = "**Paris Adventure**\n\
## Day 1\n\
Morning: Louvre Museum\n\
\n\n\n\
* Evening: Seine river cruise   \n\
Day 2\n\
Afternoon: Montmartre";

/// Counts calls per operation name.
#[derive(Default)]
pub struct CallLog(Mutex<HashMap<&'static str, usize>>);

impl CallLog {
    pub fn record(&self, name: &'static str) {
        *self.0.lock().unwrap().entry(name).or_insert(0) += 1;
    }

    pub fn count(&self, name: &str) -> usize {
        self.0.lock().unwrap().get(name).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.lock().unwrap().values().sum()
    }
}

fn place(name: &str) -> Place {
    Place {
        name: name.to_string(),
        place_id: Some(format!("id-{}", name.to_lowercase().replace(' ', "-"))),
        vicinity: None,
        formatted_address: None,
        rating: Some(4.5),
        types: Vec::new(),
        geometry: None,
    }
}

fn paris() -> GeocodeResult {
    GeocodeResult {
        formatted_address: "Paris, France".to_string(),
        geometry: Geometry {
            location: Coordinates { lat: 48.8566, lng: 2.3522 },
        },
        place_id: Some("ChIJD7fiBh9u5kcRYJSMaMOCCwQ".to_string()),
    }
}

/// Knows only Paris. Everything else geocodes to zero results.
#[derive(Default)]
pub struct StubMaps {
    pub calls: CallLog,
    pub fail_nearby: bool,
    pub fail_timezone: bool,
    pub fail_directions: bool,
    /// Radius of every nearby search, in call order.
    pub radii: Mutex<Vec<u32>>,
}

#[async_trait]
impl MapsProvider for StubMaps {
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, ProviderError> {
        self.calls.record("geocode");
        if address.to_lowercase().contains("paris") {
            Ok(vec![paris()])
        } else {
            Ok(Vec::new())
        }
    }

    async fn reverse_geocode(&self, _lat: f64, _lng: f64) -> Result<Vec<GeocodeResult>, ProviderError> {
        self.calls.record("reverse_geocode");
        Ok(vec![paris()])
    }

    async fn timezone(&self, _lat: f64, _lng: f64) -> Result<TimezoneInfo, ProviderError> {
        self.calls.record("timezone");
        if self.fail_timezone {
            return Err(ProviderError::Provider("ZERO_RESULTS".to_string()));
        }
        Ok(TimezoneInfo {
            time_zone_id: "Europe/Paris".to_string(),
            time_zone_name: "Central European Summer Time".to_string(),
            raw_offset: 3600,
            dst_offset: 3600,
        })
    }

    async fn search_nearby(
        &self,
        _lat: f64,
        _lng: f64,
        place_type: &str,
        radius: u32,
    ) -> Result<Vec<Place>, ProviderError> {
        self.calls.record("search_nearby");
        self.radii.lock().unwrap().push(radius);
        if self.fail_nearby {
            return Err(ProviderError::Status(500));
        }
        Ok(match place_type {
            "tourist_attraction" => vec![place("Louvre Museum"), place("Eiffel Tower")],
            "restaurant" => vec![place("Le Bistro")],
            other => vec![place(&format!("Nearby {}", other))],
        })
    }

    async fn text_search(&self, query: &str, _location: Option<&str>) -> Result<Vec<Place>, ProviderError> {
        self.calls.record("text_search");
        Ok(vec![place(query)])
    }

    async fn place_details(&self, place_id: &str) -> Result<Value, ProviderError> {
        self.calls.record("place_details");
        Ok(json!({"result": {"place_id": place_id, "name": "Louvre Museum"}, "status": "OK"}))
    }

    async fn directions(&self, query: &DirectionsQuery) -> Result<Value, ProviderError> {
        self.calls.record("directions");
        if self.fail_directions {
            return Err(ProviderError::Status(503));
        }
        Ok(json!({
            "status": "OK",
            "request": {
                "origin": query.origin,
                "destination": query.destination,
                "mode": query.mode.as_str(),
                "waypoints": query.waypoints.join("|"),
            }
        }))
    }

    async fn snap_to_roads(&self, path: &str, interpolate: bool) -> Result<Value, ProviderError> {
        self.calls.record("snap_to_roads");
        Ok(json!({"snappedPoints": [], "path": path, "interpolate": interpolate}))
    }
}

#[derive(Default)]
pub struct StubWeather {
    pub calls: CallLog,
    pub fail_forecast: bool,
}

#[async_trait]
impl WeatherProvider for StubWeather {
    async fn current_weather(&self, _lat: f64, _lng: f64) -> WeatherSnapshot {
        self.calls.record("current_weather");
        WeatherSnapshot::fallback()
    }

    async fn forecast(&self, _lat: f64, _lng: f64, days: u32) -> Result<Value, ProviderError> {
        self.calls.record("forecast");
        if self.fail_forecast {
            return Err(ProviderError::Unavailable("Forecast data unavailable".to_string()));
        }
        Ok(json!({"cnt": days * 8, "list": []}))
    }
}

/// Replies with a fixed completion and keeps every prompt it was sent.
pub struct StubModel {
    pub reply: Result<String, u16>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ItineraryModel for StubModel {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(ProviderError::Status)
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }
}

pub struct StubRates {
    pub calls: CallLog,
    pub rate: Option<f64>,
}

#[async_trait]
impl RateProvider for StubRates {
    async fn latest_rate(&self, _from: &str, _to: &str) -> Result<f64, ProviderError> {
        self.calls.record("latest_rate");
        self.rate.ok_or(ProviderError::Status(500))
    }
}

pub struct TestApp {
    pub maps: Arc<StubMaps>,
    pub weather: Arc<StubWeather>,
    pub model: Arc<StubModel>,
    pub rates: Arc<StubRates>,
    pub state: AppState,
}

impl TestApp {
    /// Every provider configured, a markdown-heavy model reply and a
    /// USD->EUR rate of 0.92.
    pub fn new() -> Self {
        Self::with(StubMaps::default(), StubModel::replying(MARKDOWN_ITINERARY), Some(0.92))
    }

    pub fn with(maps: StubMaps, model: StubModel, rate: Option<f64>) -> Self {
        let maps = Arc::new(maps);
        let weather = Arc::new(StubWeather::default());
        let model = Arc::new(model);
        let rates = Arc::new(StubRates {
            calls: CallLog::default(),
            rate,
        });

        let config = AppConfig {
            gemini_api_key: Some("gemini-test-key-123".to_string()),
            google_api_key: Some("google-test-key-123".to_string()),
            openweathermap_api_key: Some("owm-test-key-123".to_string()),
            ..AppConfig::default()
        };
        let currency = CurrencyService::new(
            rates.clone(),
            RateCache::new(Duration::from_secs(3600), Arc::new(SystemClock)),
        );

        let maps_provider: Arc<dyn MapsProvider> = maps.clone();
        let weather_provider: Arc<dyn WeatherProvider> = weather.clone();
        let model_provider: Arc<dyn ItineraryModel> = model.clone();

        let state = AppState {
            config,
            currency: Arc::new(currency),
            maps: Some(maps_provider),
            weather: Some(weather_provider),
            model: Some(model_provider),
        };

        Self {
            maps,
            weather,
            model,
            rates,
            state,
        }
    }

    pub fn without_model(mut self) -> Self {
        self.state.config.gemini_api_key = None;
        self.state.model = None;
        self
    }

    pub fn without_locations(mut self) -> Self {
        self.state.config.google_api_key = None;
        self.state.config.openweathermap_api_key = None;
        self.state.maps = None;
        self.state.weather = None;
        self
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .configure(routes::configure)
    }
}
