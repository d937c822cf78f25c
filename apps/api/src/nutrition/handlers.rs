//! Axum route handlers for profile and target-progress lookups. No responder calls.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ApiError, AppError};
use crate::models::analysis::{AnalysisView, DailyTargets};
use crate::nutrition::profile::{build_profile_summary, ProfileSummary};
use crate::nutrition::progress::{evaluate_progress, MetricProgress};
use crate::nutrition::targets::compute_targets;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub analysis: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub targets: DailyTargets,
    pub metrics: Vec<MetricProgress>,
}

/// GET /api/profile
///
/// Body metrics, the targets derived from them, and weight-goal progress.
pub async fn handle_profile(State(state): State<AppState>) -> Json<ProfileSummary> {
    Json(build_profile_summary(
        &state.config.body_metrics,
        &state.config.weight_goal,
        Local::now(),
    ))
}

/// POST /api/progress
///
/// Evaluates a previously returned analysis against its targets. The analysis'
/// own `targets` win; otherwise they are recomputed from the configured profile.
pub async fn handle_progress(
    State(state): State<AppState>,
    payload: Result<Json<ProgressRequest>, JsonRejection>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| state.api_error(e))?;

    let analysis = request
        .analysis
        .filter(Value::is_object)
        .ok_or_else(|| state.api_error(AppError::Validation("No analysis data provided".into())))?;

    let view: AnalysisView = serde_json::from_value(analysis).map_err(|e| {
        state.api_error(AppError::Validation(format!(
            "Analysis data has an unexpected shape: {e}"
        )))
    })?;

    let targets = view
        .targets
        .unwrap_or_else(|| compute_targets(&state.config.body_metrics));
    let metrics = evaluate_progress(&targets, &view);

    Ok(Json(ProgressResponse { targets, metrics }))
}
