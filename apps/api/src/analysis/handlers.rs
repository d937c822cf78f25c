//! Axum route handler for the Analyze API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::analysis::analyzer::request_analysis;
use crate::errors::ApiError;
use crate::models::analysis::{AnalysisResult, MealInput};
use crate::state::AppState;

/// POST /api/analyze
///
/// Scores the day's meals against the configured profile's targets.
/// 400 when every meal is blank; 500 on any responder failure.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<MealInput>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(meals) = payload.map_err(|e| state.api_error(e))?;

    let span = info_span!("analyze", request_id = %Uuid::new_v4());
    let analysis = request_analysis(state.responder.as_ref(), &state.config.body_metrics, &meals)
        .instrument(span)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(analysis))
}
