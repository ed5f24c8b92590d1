use serde::{Deserialize, Serialize};

use crate::models::weather::WeatherSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub location: Coordinates,
}

/// One entry of a Google geocoding response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

/// A place as returned by nearby and text search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vicinity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneInfo {
    pub time_zone_id: String,
    pub time_zone_name: String,
    #[serde(default)]
    pub raw_offset: i64,
    #[serde(default)]
    pub dst_offset: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub address: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearbyPlaces {
    pub attractions: Vec<Place>,
    pub restaurants: Vec<Place>,
}

/// Everything the aggregator could find out about one place.
///
/// `timezone` is `None` and the nearby lists are empty when the
/// corresponding provider call failed. `weather` may be the fallback reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationBundle {
    pub location: ResolvedAddress,
    pub timezone: Option<TimezoneInfo>,
    pub weather: WeatherSnapshot,
    pub nearby: NearbyPlaces,
}

impl LocationBundle {
    pub fn attraction_names(&self, limit: usize) -> Vec<&str> {
        self.nearby
            .attractions
            .iter()
            .take(limit)
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn restaurant_names(&self, limit: usize) -> Vec<&str> {
        self.nearby
            .restaurants
            .iter()
            .take(limit)
            .map(|p| p.name.as_str())
            .collect()
    }
}
