use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::error::AppError;

pub mod currency;
pub mod health;
pub mod itinerary;
pub mod location;

/// Register every route plus the JSON body configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .route("/status", web::get().to(health::api_status))
                .route("/generate-itinerary", web::post().to(itinerary::generate))
                .route("/refine-itinerary", web::post().to(itinerary::refine))
                .route(
                    "/currency/{destination}",
                    web::get().to(currency::for_destination),
                )
                .route(
                    "/currency/{destination}/{base}",
                    web::get().to(currency::for_destination_with_base),
                )
                .route("/location-info", web::post().to(location::location_info))
                .route("/destinations", web::get().to(location::destinations))
                .route(
                    "/destination-details/{name}",
                    web::get().to(location::destination_details),
                )
                .route(
                    "/weather-forecast",
                    web::post().to(location::weather_forecast),
                )
                .route("/directions", web::post().to(location::directions))
                .route("/places/search", web::post().to(location::search_places))
                .route("/places/details", web::post().to(location::place_details))
                .route("/geocode/reverse", web::post().to(location::reverse_geocode))
                .route("/roads/snap", web::post().to(location::snap_to_roads))
                .route("/maps/static", web::post().to(location::static_map)),
        )
        .default_service(web::to(not_found));
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected request body: {}", err);
    AppError::BadRequest(format!("Invalid JSON body: {}", err)).into()
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "success": false,
        "error": "Endpoint not found",
    }))
}
