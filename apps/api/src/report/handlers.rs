//! Axum route handler for the Generate Report API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::{ApiError, AppError};
use crate::report::builder::ReportTemplate;
use crate::report::generator::request_report;
use crate::report::parser::{breakdown_from_sections, parse_report, BreakdownRow, ReportSections};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub analysis: Option<Value>,
    #[serde(default)]
    pub template: ReportTemplate,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report: String,
    pub status: &'static str,
    pub sections: ReportSections,
    /// Sections reassembled as markdown, without any preamble before the first header.
    pub markdown: String,
    pub breakdown: Vec<BreakdownRow>,
}

/// POST /api/generate-report
///
/// Free-text report for a previously returned analysis. The credential check
/// runs before the body is looked at.
pub async fn handle_generate_report(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<Json<ReportResponse>, ApiError> {
    if state.config.openai_api_key.is_none() {
        return Err(state.api_error(AppError::Configuration(
            "OpenAI API key is not configured".to_string(),
        )));
    }

    let Json(request) = payload.map_err(|e| state.api_error(e))?;
    let analysis = request
        .analysis
        .filter(Value::is_object)
        .ok_or_else(|| state.api_error(AppError::Validation("No analysis data provided".into())))?;

    let span = info_span!("generate_report", request_id = %Uuid::new_v4());
    let report = request_report(state.responder.as_ref(), &analysis, request.template)
        .instrument(span)
        .await
        .map_err(|e| state.api_error(e))?;

    let sections = parse_report(&report);
    if sections.is_empty() {
        warn!("Report contained no recognizable section headers");
    }
    let breakdown = breakdown_from_sections(&sections);
    info!(
        sections = sections.len(),
        breakdown_rows = breakdown.len(),
        "Report generated"
    );

    Ok(Json(ReportResponse {
        markdown: sections.to_markdown(),
        report,
        status: "success",
        sections,
        breakdown,
    }))
}
