pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze;
use crate::nutrition::handlers::{handle_profile, handle_progress};
use crate::report::handlers::handle_generate_report;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Responder-backed
        .route("/api/analyze", post(handle_analyze))
        .route("/api/generate-report", post(handle_generate_report))
        // Local only
        .route("/api/profile", get(handle_profile))
        .route("/api/progress", post(handle_progress))
        .with_state(state)
}
