use serde::{Deserialize, Serialize};

/// Response body of `GET /api/currency/{destination}[/{base}]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyInfo {
    pub success: bool,
    pub destination: String,
    pub country: String,
    pub local_currency: String,
    pub base_currency: String,
    pub exchange_rate: f64,
    pub formatted_rate: String,
    pub last_updated: String,
}
