use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{Responder, ResponderError};
use crate::report::builder::{build_report_request, ReportTemplate};

/// Collapses runs of three or more newlines to exactly two, then trims.
pub fn normalize_report(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut newlines = 0;

    for c in text.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines <= 2 {
                normalized.push(c);
            }
        } else {
            newlines = 0;
            normalized.push(c);
        }
    }

    normalized.trim().to_string()
}

/// One responder call for a free-text report. Any responder failure, including an
/// empty reply, surfaces as `ReportGeneration`; there is no partial result.
pub async fn request_report(
    responder: &dyn Responder,
    analysis: &Value,
    template: ReportTemplate,
) -> Result<String, AppError> {
    let request = build_report_request(analysis, template)?;

    info!(?template, "Requesting nutrition report");
    let content = responder
        .complete(&request)
        .await
        .map_err(AppError::ReportGeneration)?;

    let report = normalize_report(&content);
    if report.is_empty() {
        return Err(AppError::ReportGeneration(ResponderError::EmptyContent));
    }

    Ok(report)
}
