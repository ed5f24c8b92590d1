use serde::{Deserialize, Serialize};

pub const FALLBACK_NOTE: &str = "Sample data - OpenWeatherMap API unavailable";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// Current conditions in the OpenWeatherMap response shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    pub main: MainReadings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<Wind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Only set on the fallback reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl WeatherSnapshot {
    /// Fixed temperate reading used when the live call fails.
    pub fn fallback() -> Self {
        Self {
            weather: vec![WeatherCondition {
                main: "Clear".to_string(),
                description: "clear sky".to_string(),
            }],
            main: MainReadings {
                temp: 22.0,
                feels_like: Some(25.0),
                humidity: Some(60.0),
            },
            wind: Some(Wind { speed: 3.5 }),
            name: Some("Location".to_string()),
            note: Some(FALLBACK_NOTE.to_string()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.note.is_some()
    }

    pub fn temperature(&self) -> f64 {
        self.main.temp
    }

    pub fn condition(&self) -> &str {
        self.weather
            .first()
            .map(|w| w.description.as_str())
            .unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_flagged() {
        let fallback = WeatherSnapshot::fallback();
        assert!(fallback.is_fallback());
        assert_eq!(fallback.temperature(), 22.0);
        assert_eq!(fallback.condition(), "clear sky");
    }

    #[test]
    fn test_live_reading_is_not_fallback() {
        let live: WeatherSnapshot = serde_json::from_value(serde_json::json!({
            "weather": [{"main": "Clouds", "description": "broken clouds"}],
            "main": {"temp": 0.0, "feels_like": -3.2, "humidity": 81},
            "wind": {"speed": 4.1},
            "name": "Oslo"
        }))
        .unwrap();

        // A genuine zero reading must not look like the fallback
        assert!(!live.is_fallback());
        assert_eq!(live.temperature(), 0.0);
        assert_eq!(live.condition(), "broken clouds");
    }
}
