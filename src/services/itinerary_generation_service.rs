use std::sync::Arc;

use crate::error::AppError;
use crate::models::trip::TripRequest;
use crate::services::currency_service::CurrencyService;
use crate::services::gemini_service::ItineraryModel;
use crate::services::itinerary_text_service::{clean_text, enrich_with_currency};
use crate::services::location_service::LocationService;
use crate::services::prompt_service::{build_prompt, build_refinement_prompt};

/// Prompt, model call and post-processing for one request.
///
/// Location context is optional. When no [`LocationService`] is configured,
/// or the lookup fails, the prompt is built without it.
pub struct ItineraryGenerator {
    model: Arc<dyn ItineraryModel>,
    currency: Arc<CurrencyService>,
    locations: Option<LocationService>,
}

impl ItineraryGenerator {
    pub fn new(
        model: Arc<dyn ItineraryModel>,
        currency: Arc<CurrencyService>,
        locations: Option<LocationService>,
    ) -> Self {
        Self {
            model,
            currency,
            locations,
        }
    }

    pub async fn generate(&self, trip: &TripRequest) -> Result<String, AppError> {
        let context = match &self.locations {
            Some(locations) => match locations.get_location_info(trip.destination()).await {
                Ok(bundle) => Some(bundle),
                Err(e) => {
                    log::warn!(
                        "Could not fetch location context for {}: {}",
                        trip.destination(),
                        e
                    );
                    None
                }
            },
            None => None,
        };

        let prompt = build_prompt(trip, context.as_ref());
        log::info!(
            "Generating {}-day itinerary for {} with {}",
            trip.duration(),
            trip.destination(),
            self.model.model_name()
        );
        self.complete(&prompt, trip.destination()).await
    }

    pub async fn refine(
        &self,
        current_itinerary: &str,
        feedback: &str,
        destination: &str,
    ) -> Result<String, AppError> {
        let prompt = build_refinement_prompt(current_itinerary, feedback, destination);
        log::info!("Refining itinerary for {}", destination);
        self.complete(&prompt, destination).await
    }

    async fn complete(&self, prompt: &str, destination: &str) -> Result<String, AppError> {
        let raw = self.model.generate(prompt).await.map_err(|e| {
            log::error!("Itinerary model call failed: {}", e);
            AppError::Model(e)
        })?;

        let cleaned = clean_text(&raw);
        Ok(enrich_with_currency(&cleaned, destination, &self.currency).await)
    }
}
