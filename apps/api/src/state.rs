use std::sync::Arc;

use crate::config::Config;
use crate::errors::{ApiError, AppError};
use crate::llm_client::Responder;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; every request is independent.
#[derive(Clone)]
pub struct AppState {
    /// The external completion service. `OpenAiClient` in production, a stub in tests.
    pub responder: Arc<dyn Responder>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(responder: Arc<dyn Responder>, config: Config) -> Self {
        Self {
            responder,
            config: Arc::new(config),
        }
    }

    /// Wraps an error for the response, honouring the diagnostics flag.
    pub fn api_error(&self, error: impl Into<AppError>) -> ApiError {
        ApiError::new(error.into(), self.config.expose_error_details)
    }
}
