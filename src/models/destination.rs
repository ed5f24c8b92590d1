use serde::Serialize;

use crate::models::location::LocationBundle;
use crate::models::weather::WeatherSnapshot;

pub const WEATHER_UNCONFIGURED: &str = "Weather data unavailable";
pub const DATA_UNAVAILABLE: &str = "Data unavailable";
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// One entry of the popular-destinations catalogue.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogueEntry {
    pub name: &'static str,
    pub country: &'static str,
    pub emoji: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub category: &'static [&'static str],
    pub safety_rating: f64,
    pub safety_tips: &'static str,
}

const fn entry(
    name: &'static str,
    country: &'static str,
    emoji: &'static str,
    (lat, lng): (f64, f64),
    category: &'static [&'static str],
    safety_rating: f64,
    safety_tips: &'static str,
) -> CatalogueEntry {
    CatalogueEntry {
        name,
        country,
        emoji,
        lat,
        lng,
        category,
        safety_rating,
        safety_tips,
    }
}

pub static POPULAR_DESTINATIONS: [CatalogueEntry; 12] = [
    entry("Paris", "France", "🗼", (48.8566, 2.3522), &["city", "popular", "cultural"], 4.2,
        "Be aware of pickpockets in tourist areas"),
    entry("Tokyo", "Japan", "🏯", (35.6762, 139.6503), &["city", "popular", "cultural"], 4.8,
        "Very safe city with excellent public safety"),
    entry("New York", "USA", "🗽", (40.7128, -74.0060), &["city", "popular"], 4.0,
        "Stay alert in busy areas, avoid isolated places at night"),
    entry("London", "UK", "🇬🇧", (51.5074, -0.1278), &["city", "popular", "cultural"], 4.3,
        "Generally safe, watch for petty theft in crowded areas"),
    entry("Dubai", "UAE", "🏙️", (25.2048, 55.2708), &["city", "popular"], 4.6,
        "Very safe with strict laws and good security"),
    entry("Reykjavik", "Iceland", "🌋", (64.1466, -21.9426), &["nature", "adventure"], 4.9,
        "Extremely safe, main concerns are weather-related"),
    entry("Cape Town", "South Africa", "🦁", (-33.9249, 18.4241), &["nature", "adventure", "cultural"], 3.5,
        "Avoid walking alone at night, stay in safe neighborhoods"),
    entry("Maldives", "Maldives", "🏖️", (3.2028, 73.2207), &["beach", "popular"], 4.7,
        "Very safe resorts, follow water safety guidelines"),
    entry("Bali", "Indonesia", "🌺", (-8.3405, 115.0920), &["beach", "cultural", "nature"], 4.1,
        "Generally safe, be cautious with street food and water"),
    entry("Kyoto", "Japan", "🎌", (35.0116, 135.7681), &["cultural", "nature"], 4.8,
        "Extremely safe with very low crime rates"),
    entry("Petra", "Jordan", "🏜️", (30.3285, 35.4444), &["cultural", "adventure"], 4.0,
        "Generally safe, follow tour guides and stay hydrated"),
    entry("Barcelona", "Spain", "🏖️", (41.3851, 2.1734), &["city", "beach", "cultural"], 4.1,
        "Watch for pickpockets, especially in tourist areas"),
];

impl CatalogueEntry {
    /// Query string handed to the geocoder.
    pub fn query(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// A catalogue entry with its live weather and timezone.
#[derive(Debug, Clone, Serialize)]
pub struct DestinationSummary {
    #[serde(flatten)]
    pub entry: CatalogueEntry,
    pub weather: String,
    pub timezone: String,
    pub description: String,
}

impl DestinationSummary {
    pub fn from_bundle(entry: CatalogueEntry, bundle: &LocationBundle) -> Self {
        Self {
            entry,
            weather: weather_summary(&bundle.weather),
            timezone: bundle
                .timezone
                .as_ref()
                .map_or(DEFAULT_TIMEZONE.to_string(), |tz| tz.time_zone_name.clone()),
            description: format!(
                "Explore the amazing {} with its unique culture, attractions, and experiences.",
                entry.name
            ),
        }
    }

    /// Entry whose lookup failed.
    pub fn unavailable(entry: CatalogueEntry) -> Self {
        Self {
            entry,
            weather: DATA_UNAVAILABLE.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            description: format!("Discover the wonders of {}, {}.", entry.name, entry.country),
        }
    }

    /// Entry served while location services are not configured.
    pub fn unconfigured(entry: CatalogueEntry) -> Self {
        Self {
            entry,
            weather: WEATHER_UNCONFIGURED.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            description: format!(
                "Explore the amazing {} with its unique culture, attractions, and experiences.",
                entry.name
            ),
        }
    }
}

/// `"18°C, Broken Clouds"`
pub fn weather_summary(weather: &WeatherSnapshot) -> String {
    let condition = weather
        .weather
        .first()
        .map(|w| title_case(&w.description))
        .unwrap_or_else(|| "Clear".to_string());
    format!("{}°C, {}", weather.temperature().round() as i64, condition)
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
