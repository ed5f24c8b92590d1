//! Google Maps Platform adapters.
//!
//! Thin wrappers around the Geocoding, Places, Directions, Time Zone and
//! Roads web services. Each call issues exactly one request with the
//! configured timeout. Transport errors and non-2xx responses both come back
//! as a [`ProviderError`]; nothing is retried.
//!
//! ## Setup
//! 1. Create a key in Google Cloud Console
//! 2. Enable Geocoding, Places, Directions, Time Zone and Roads
//! 3. Set `GOOGLE_API_KEY`

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::error::ProviderError;
use crate::models::location::{GeocodeResult, Place, TimezoneInfo};

const MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
const ROADS_BASE_URL: &str = "https://roads.googleapis.com/v1";
pub const NEARBY_RADIUS_METERS: u32 = 5_000;
pub const DESTINATION_RADIUS_METERS: u32 = 10_000;
pub const TEXT_SEARCH_RADIUS_METERS: u32 = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Driving,
    Walking,
    Transit,
    Bicycling,
}

impl TravelMode {
    pub fn as_str(&self) -> &str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Transit => "transit",
            TravelMode::Bicycling => "bicycling",
        }
    }

    /// Unknown modes fall back to driving.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "walking" => TravelMode::Walking,
            "transit" => TravelMode::Transit,
            "bicycling" => TravelMode::Bicycling,
            _ => TravelMode::Driving,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectionsQuery {
    pub origin: String,
    pub destination: String,
    pub mode: TravelMode,
    pub waypoints: Vec<String>,
}

/// Everything the rest of the crate needs from a maps provider.
#[async_trait]
pub trait MapsProvider: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, ProviderError>;

    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Vec<GeocodeResult>, ProviderError>;

    async fn timezone(&self, lat: f64, lng: f64) -> Result<TimezoneInfo, ProviderError>;

    async fn search_nearby(
        &self,
        lat: f64,
        lng: f64,
        place_type: &str,
        radius: u32,
    ) -> Result<Vec<Place>, ProviderError>;

    async fn text_search(&self, query: &str, location: Option<&str>) -> Result<Vec<Place>, ProviderError>;

    async fn place_details(&self, place_id: &str) -> Result<Value, ProviderError>;

    async fn directions(&self, query: &DirectionsQuery) -> Result<Value, ProviderError>;

    async fn snap_to_roads(&self, path: &str, interpolate: bool) -> Result<Value, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct ResultsResponse<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

pub struct GoogleMapsService {
    http_client: reqwest::Client,
    api_key: String,
}

impl GoogleMapsService {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
        })
    }

    /// One GET against `{base}/{endpoint}` with the key appended.
    async fn make_request<T: DeserializeOwned>(
        &self,
        base: &str,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let response = self
            .http_client
            .get(format!("{}/{}", base, endpoint))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                log::warn!("Google API request to {} failed: {}", endpoint, e);
                ProviderError::Http(e)
            })?;

        if !response.status().is_success() {
            log::warn!("Google API {} returned {}", endpoint, response.status());
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        Ok(response.json::<T>().await.map_err(|e| e.without_url())?)
    }
}

/// Startup reachability check. Logs only.
pub async fn probe(maps: &dyn MapsProvider) {
    match maps.geocode("Paris").await {
        Ok(_) => log::info!("Google APIs accessible (tested with Geocoding)"),
        Err(e) => log::warn!("Could not validate Google APIs: {}", e),
    }
}

#[async_trait]
impl MapsProvider for GoogleMapsService {
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, ProviderError> {
        let params = [("address", address.to_string())];
        let response: ResultsResponse<GeocodeResult> =
            self.make_request(MAPS_BASE_URL, "geocode/json", &params).await?;
        Ok(response.results)
    }

    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Vec<GeocodeResult>, ProviderError> {
        let params = [("latlng", format!("{},{}", lat, lng))];
        let response: ResultsResponse<GeocodeResult> =
            self.make_request(MAPS_BASE_URL, "geocode/json", &params).await?;
        Ok(response.results)
    }

    async fn timezone(&self, lat: f64, lng: f64) -> Result<TimezoneInfo, ProviderError> {
        let params = [
            ("location", format!("{},{}", lat, lng)),
            ("timestamp", Utc::now().timestamp().to_string()),
        ];
        let body: Value = self.make_request(MAPS_BASE_URL, "timezone/json", &params).await?;

        // The service answers 200 with a status field on bad coordinates
        match body.get("status").and_then(Value::as_str) {
            Some("OK") | None => serde_json::from_value(body)
                .map_err(|e| ProviderError::Provider(format!("unexpected timezone payload: {}", e))),
            Some(status) => Err(ProviderError::Provider(status.to_string())),
        }
    }

    async fn search_nearby(
        &self,
        lat: f64,
        lng: f64,
        place_type: &str,
        radius: u32,
    ) -> Result<Vec<Place>, ProviderError> {
        let params = [
            ("location", format!("{},{}", lat, lng)),
            ("radius", radius.to_string()),
            ("type", place_type.to_string()),
        ];
        let response: ResultsResponse<Place> = self
            .make_request(MAPS_BASE_URL, "place/nearbysearch/json", &params)
            .await?;
        Ok(response.results)
    }

    async fn text_search(&self, query: &str, location: Option<&str>) -> Result<Vec<Place>, ProviderError> {
        let mut params = vec![("query", query.to_string())];
        if let Some(location) = location {
            params.push(("location", location.to_string()));
            params.push(("radius", TEXT_SEARCH_RADIUS_METERS.to_string()));
        }
        let response: ResultsResponse<Place> = self
            .make_request(MAPS_BASE_URL, "place/textsearch/json", &params)
            .await?;
        Ok(response.results)
    }

    async fn place_details(&self, place_id: &str) -> Result<Value, ProviderError> {
        let params = [("place_id", place_id.to_string())];
        self.make_request(MAPS_BASE_URL, "place/details/json", &params)
            .await
    }

    async fn directions(&self, query: &DirectionsQuery) -> Result<Value, ProviderError> {
        let mut params = vec![
            ("origin", query.origin.clone()),
            ("destination", query.destination.clone()),
            ("mode", query.mode.as_str().to_string()),
        ];
        if !query.waypoints.is_empty() {
            params.push(("waypoints", query.waypoints.join("|")));
        }
        self.make_request(MAPS_BASE_URL, "directions/json", &params)
            .await
    }

    async fn snap_to_roads(&self, path: &str, interpolate: bool) -> Result<Value, ProviderError> {
        let params = [
            ("path", path.to_string()),
            ("interpolate", interpolate.to_string()),
        ];
        self.make_request(ROADS_BASE_URL, "snapToRoads", &params)
            .await
    }
}
