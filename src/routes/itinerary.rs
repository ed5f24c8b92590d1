use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::error::AppError;
use crate::models::required;
use crate::models::trip::{
    GenerateItineraryRequest, GeneratedItinerary, RefineItineraryRequest, RefinedItinerary,
    TripRequest,
};
use crate::state::AppState;

/*
    /api/generate-itinerary
*/
pub async fn generate(
    state: web::Data<AppState>,
    body: web::Json<GenerateItineraryRequest>,
) -> Result<HttpResponse, AppError> {
    // Validation happens before any provider is touched
    let trip = TripRequest::try_from(body.into_inner())?;
    let generator = state.generator()?;

    let itinerary = generator.generate(&trip).await?;
    log::info!("Itinerary generated for {}", trip.destination());

    Ok(HttpResponse::Ok().json(GeneratedItinerary {
        success: true,
        itinerary,
        destination: trip.destination().to_string(),
        duration: trip.duration(),
        start_date: trip.start_date().to_string(),
        end_date: trip.end_date().to_string(),
        generated_at: Utc::now().to_rfc3339(),
    }))
}

/*
    /api/refine-itinerary
*/
pub async fn refine(
    state: web::Data<AppState>,
    body: web::Json<RefineItineraryRequest>,
) -> Result<HttpResponse, AppError> {
    let (current, feedback, destination) = match (
        required(&body.current_itinerary),
        required(&body.feedback),
        required(&body.destination),
    ) {
        (Some(c), Some(f), Some(d)) => (c, f, d),
        _ => {
            return Err(AppError::BadRequest(
                "Missing required data for refinement".to_string(),
            ))
        }
    };

    let generator = state
        .generator()
        .map_err(|_| AppError::ServiceUnavailable("Gemini AI is not available"))?;
    let itinerary = generator.refine(current, feedback, destination).await?;

    Ok(HttpResponse::Ok().json(RefinedItinerary {
        success: true,
        itinerary,
        refined_at: Utc::now().to_rfc3339(),
    }))
}
