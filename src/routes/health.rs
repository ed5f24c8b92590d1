use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use serde::Serialize;

use crate::config::key_preview;
use crate::state::AppState;

const GOOGLE_SERVICES: &[&str] = &[
    "Places API",
    "Geocoding API",
    "Directions API",
    "Time Zone API",
    "Roads API",
    "Maps Static API",
];

#[derive(Serialize)]
struct ApiStatus {
    timestamp: String,
    apis: Apis,
    overall_status: &'static str,
}

#[derive(Serialize)]
struct Apis {
    gemini: GeminiStatus,
    google: GoogleStatus,
    openweather: WeatherStatus,
    exchange_rate: ExchangeRateStatus,
}

#[derive(Serialize)]
struct ServiceStatus {
    configured: bool,
    key_preview: Option<String>,
}

impl ServiceStatus {
    fn for_key(key: Option<&String>) -> Self {
        Self {
            configured: key.is_some(),
            key_preview: key.map(|k| key_preview(k)),
        }
    }
}

#[derive(Serialize)]
struct GeminiStatus {
    #[serde(flatten)]
    key: ServiceStatus,
    model: String,
    model_available: bool,
}

#[derive(Serialize)]
struct GoogleStatus {
    #[serde(flatten)]
    key: ServiceStatus,
    services_available: bool,
    services: &'static [&'static str],
}

#[derive(Serialize)]
struct WeatherStatus {
    #[serde(flatten)]
    key: ServiceStatus,
    available: bool,
}

/// The rate API takes no key.
#[derive(Serialize)]
struct ExchangeRateStatus {
    configured: bool,
    available: bool,
    base_url: String,
}

/*
    /health
*/
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/*
    /api/status
*/
pub async fn api_status(state: web::Data<AppState>) -> impl Responder {
    let config = &state.config;

    let gemini = GeminiStatus {
        key: ServiceStatus::for_key(config.gemini_api_key.as_ref()),
        model: config.gemini_model.clone(),
        model_available: state.model.is_some(),
    };
    let google = GoogleStatus {
        key: ServiceStatus::for_key(config.google_api_key.as_ref()),
        services_available: state.location_service().is_some(),
        services: GOOGLE_SERVICES,
    };
    let openweather = WeatherStatus {
        key: ServiceStatus::for_key(config.openweathermap_api_key.as_ref()),
        available: state.weather.is_some(),
    };
    let exchange_rate = ExchangeRateStatus {
        configured: true,
        available: true,
        base_url: config.exchange_rate_base_url.clone(),
    };

    // Degraded if any provider is missing
    let overall_status = if gemini.model_available && google.services_available {
        "healthy"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(ApiStatus {
        timestamp: Utc::now().to_rfc3339(),
        apis: Apis {
            gemini,
            google,
            openweather,
            exchange_rate,
        },
        overall_status,
    })
}
