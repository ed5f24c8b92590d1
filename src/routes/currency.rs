use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::error::AppError;
use crate::models::currency::CurrencyInfo;
use crate::services::currency_service::{country_from_destination, resolve_currency, DEFAULT_CURRENCY};
use crate::state::AppState;

/*
    /api/currency/{destination}
*/
pub async fn for_destination(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let destination = path.into_inner();
    currency_info(&state, &destination, DEFAULT_CURRENCY).await
}

/*
    /api/currency/{destination}/{base}
*/
pub async fn for_destination_with_base(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (destination, base) = path.into_inner();
    let base = base.trim().to_uppercase();
    if base.is_empty() {
        return Err(AppError::BadRequest("Base currency is required".to_string()));
    }
    currency_info(&state, &destination, &base).await
}

async fn currency_info(
    state: &AppState,
    destination: &str,
    base: &str,
) -> Result<HttpResponse, AppError> {
    let country = country_from_destination(destination);
    let local_currency = resolve_currency(country);
    let rate = state.currency.get_exchange_rate(base, local_currency).await;

    Ok(HttpResponse::Ok().json(CurrencyInfo {
        success: true,
        destination: destination.to_string(),
        country: country.to_string(),
        local_currency: local_currency.to_string(),
        base_currency: base.to_string(),
        exchange_rate: rate,
        formatted_rate: format!("1 {} = {:.2} {}", base, rate, local_currency),
        last_updated: Utc::now().to_rfc3339(),
    }))
}
