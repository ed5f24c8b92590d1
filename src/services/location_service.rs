//! Location aggregation.
//!
//! Combines geocoding, timezone, weather and nearby-place lookups into one
//! [`LocationBundle`]. Only geocoding is fatal; every later step degrades to
//! an empty section when its provider fails.

use std::sync::Arc;

use crate::error::{AppError, ProviderError};
use crate::models::location::{
    Coordinates, GeocodeResult, LocationBundle, NearbyPlaces, Place, ResolvedAddress,
};
use crate::services::google_maps_service::{MapsProvider, NEARBY_RADIUS_METERS};
use crate::services::weather_service::WeatherProvider;

pub const ATTRACTION_TYPE: &str = "tourist_attraction";
const RESTAURANT_TYPE: &str = "restaurant";

#[derive(Clone)]
pub struct LocationService {
    maps: Arc<dyn MapsProvider>,
    weather: Arc<dyn WeatherProvider>,
}

impl LocationService {
    pub fn new(maps: Arc<dyn MapsProvider>, weather: Arc<dyn WeatherProvider>) -> Self {
        Self { maps, weather }
    }

    /// Geocode `query` and keep the best match.
    pub async fn resolve(&self, query: &str) -> Result<GeocodeResult, AppError> {
        match self.maps.geocode(query).await {
            Ok(results) => results.into_iter().next().ok_or(AppError::LocationNotFound),
            Err(e) => {
                log::warn!("Geocoding failed for '{}': {}", query, e);
                Err(AppError::LocationNotFound)
            }
        }
    }

    pub async fn get_location_info(&self, query: &str) -> Result<LocationBundle, AppError> {
        let resolved = self.resolve(query).await?;
        let Coordinates { lat, lng } = resolved.geometry.location;
        log::debug!("Resolved '{}' to ({:.4}, {:.4})", query, lat, lng);

        let (timezone, weather) =
            futures::join!(self.maps.timezone(lat, lng), self.weather.current_weather(lat, lng));

        let (attractions, restaurants) = futures::join!(
            self.maps.search_nearby(lat, lng, ATTRACTION_TYPE, NEARBY_RADIUS_METERS),
            self.maps.search_nearby(lat, lng, RESTAURANT_TYPE, NEARBY_RADIUS_METERS),
        );

        let timezone = timezone
            .map_err(|e| log::warn!("Timezone lookup failed for '{}': {}", query, e))
            .ok();

        Ok(LocationBundle {
            location: ResolvedAddress {
                address: resolved.formatted_address,
                coordinates: Coordinates { lat, lng },
            },
            timezone,
            weather,
            nearby: NearbyPlaces {
                attractions: places_or_empty(attractions, ATTRACTION_TYPE),
                restaurants: places_or_empty(restaurants, RESTAURANT_TYPE),
            },
        })
    }

    pub fn maps(&self) -> &Arc<dyn MapsProvider> {
        &self.maps
    }

    pub fn weather(&self) -> &Arc<dyn WeatherProvider> {
        &self.weather
    }
}

fn places_or_empty(result: Result<Vec<Place>, ProviderError>, place_type: &str) -> Vec<Place> {
    result.unwrap_or_else(|e| {
        log::warn!("Nearby {} search failed: {}", place_type, e);
        Vec::new()
    })
}
