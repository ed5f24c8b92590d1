use serde::{Deserialize, Serialize};

pub const DEFAULT_FORECAST_DAYS: u32 = 5;
pub const MAX_FORECAST_DAYS: u32 = 5;
pub const DEFAULT_MAP_ZOOM: u8 = 13;
pub const DEFAULT_MAP_SIZE: &str = "600x400";

#[derive(Debug, Default, Deserialize)]
pub struct LocationQuery {
    pub location: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastRequest {
    pub location: Option<String>,
    pub days: Option<u32>,
}

impl ForecastRequest {
    /// Requested days, limited to what the forecast endpoint covers.
    pub fn days(&self) -> u32 {
        self.days
            .unwrap_or(DEFAULT_FORECAST_DAYS)
            .clamp(1, MAX_FORECAST_DAYS)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DirectionsRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub mode: Option<String>,
    #[serde(default)]
    pub waypoints: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlacesSearchRequest {
    pub query: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub place_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReverseGeocodeRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceDetailsRequest {
    pub place_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SnapToRoadsRequest {
    /// `lat,lng|lat,lng|...`
    pub path: Option<String>,
    #[serde(default)]
    pub interpolate: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct StaticMapRequest {
    pub center: Option<String>,
    pub zoom: Option<u8>,
    pub size: Option<String>,
    #[serde(default)]
    pub markers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StaticMap {
    pub map_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_days_default_and_clamp() {
        assert_eq!(ForecastRequest::default().days(), 5);
        let req = ForecastRequest {
            days: Some(14),
            ..Default::default()
        };
        assert_eq!(req.days(), 5);
        let req = ForecastRequest {
            days: Some(0),
            ..Default::default()
        };
        assert_eq!(req.days(), 1);
    }

    #[test]
    fn test_places_search_reads_type_field() {
        let req: PlacesSearchRequest =
            serde_json::from_str(r#"{"location": "Rome", "type": "museum"}"#).unwrap();
        assert_eq!(req.place_type.as_deref(), Some("museum"));
        assert!(req.query.is_none());
    }
}
