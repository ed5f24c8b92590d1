pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::AppConfig;
pub use error::{AppError, ProviderError};
pub use state::AppState;
