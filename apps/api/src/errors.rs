use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::llm_client::ResponderError;

/// Application-level error type.
/// Handlers wrap it in `ApiError` to pick whether diagnostics are exposed.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Responder(#[from] ResponderError),

    #[error("No response received from the OpenAI API")]
    EmptyResponse,

    #[error("Failed to parse nutritional analysis JSON")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("Error generating the report. Please try again.")]
    ReportGeneration(#[source] ResponderError),

    #[error("An unexpected error occurred while processing your request.")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_)
            | AppError::Responder(_)
            | AppError::EmptyResponse
            | AppError::MalformedResponse(_)
            | AppError::ReportGeneration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            AppError::Validation(msg) => tracing::debug!("Validation error: {msg}"),
            AppError::Configuration(msg) => tracing::error!("Configuration error: {msg}"),
            AppError::Responder(e) => tracing::error!("Responder error: {e}"),
            AppError::EmptyResponse => tracing::error!("Responder returned no content"),
            AppError::MalformedResponse(e) => tracing::error!("Malformed responder JSON: {e}"),
            AppError::ReportGeneration(e) => tracing::error!("Report generation failed: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }
    }
}

/// Flat error body returned to the client.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// An `AppError` on its way out of a handler.
/// `details` carries the error chain only when diagnostics are enabled.
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub include_details: bool,
}

impl ApiError {
    pub fn new(error: AppError, include_details: bool) -> Self {
        Self {
            error,
            include_details,
        }
    }

    fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.error.to_string(),
            details: self.include_details.then(|| error_chain(&self.error)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.error.log();
        (self.error.status(), Json(self.body())).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiError::new(self, false).into_response()
    }
}

fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut chain = format!("{error:?}");
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push_str(&format!("\nCaused by: {cause}"));
        source = cause.source();
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_bad_request() {
        let err = AppError::Validation("At least one meal input must be provided.".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "At least one meal input must be provided.");
    }

    #[test]
    fn test_responder_failures_are_server_errors() {
        let err = AppError::Responder(ResponderError::Api {
            status: 503,
            message: "overloaded".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "API error (status 503): overloaded");
        assert_eq!(
            AppError::EmptyResponse.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_report_generation_hides_responder_message() {
        let err = AppError::ReportGeneration(ResponderError::MissingApiKey);
        assert_eq!(
            err.to_string(),
            "Error generating the report. Please try again."
        );
    }

    #[test]
    fn test_body_omits_details_without_diagnostics() {
        let api_error = ApiError::new(AppError::EmptyResponse, false);
        let body = serde_json::to_value(api_error.body()).unwrap();
        assert_eq!(body["error"], "No response received from the OpenAI API");
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_body_includes_chain_with_diagnostics() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let api_error = ApiError::new(AppError::MalformedResponse(parse_err), true);
        let body = api_error.body();
        assert_eq!(body.error, "Failed to parse nutritional analysis JSON");
        let details = body.details.unwrap();
        assert!(details.contains("MalformedResponse"));
        assert!(details.contains("Caused by:"));
    }
}
