use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::json;
use thiserror::Error;

/// Failure of a single outbound provider call.
///
/// Serializes to the error-shaped value `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned HTTP {0}")]
    Status(u16),

    #[error("provider reported {0}")]
    Provider(String),

    #[error("{0}")]
    Unavailable(String),
}

impl Serialize for ProviderError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("error", &self.to_string())?;
        map.end()
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{0}")]
    BadRequest(String),

    #[error("Location not found")]
    LocationNotFound,

    #[error("{0}")]
    ServiceUnavailable(&'static str),

    #[error("Gemini AI is not available. Please check the API key configuration.")]
    ModelUnavailable,

    #[error("Failed to generate itinerary: {0}")]
    Model(ProviderError),

    #[error("{0}")]
    Provider(ProviderError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message returned to clients. Internal details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFields(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::LocationNotFound => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable(_) | AppError::ModelUnavailable | AppError::Model(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Provider(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            log::error!("Unexpected failure: {}", detail);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": self.client_message(),
        }))
    }
}
