//! Meal analysis — builds the schema-constrained request and assembles the reply.
//!
//! The assembler trusts the responder: beyond "is it a JSON object" nothing in the
//! reply is checked for plausibility. Schema drift is logged, never rejected.

use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::analysis::prompts::{ANALYSIS_INSTRUCTIONS, ANALYSIS_SYSTEM, ANALYSIS_TARGETS_TEMPLATE};
use crate::analysis::schema::analysis_response_schema;
use crate::errors::AppError;
use crate::llm_client::{ChatMessage, CompletionRequest, Responder};
use crate::models::analysis::{AnalysisResult, DailyTargets, FoodBreakdown, MealInput};
use crate::models::profile::BodyMetrics;
use crate::nutrition::compute_targets;

/// Flexibility band around the calorie target, as a fraction of it.
const CALORIE_FLEXIBILITY: f64 = 0.1;

/// e.g. `a 37-year-old male, 5'11", 225 lbs`
fn describe_profile(metrics: &BodyMetrics) -> String {
    format!(
        "a {}-year-old {}, {}, {} lbs",
        metrics.age,
        metrics.sex,
        metrics.height_display(),
        metrics.weight_pounds
    )
}

fn build_user_prompt(metrics: &BodyMetrics, targets: &DailyTargets, meals: &MealInput) -> String {
    let flexibility = (targets.calories as f64 * CALORIE_FLEXIBILITY).round() as i64;
    let targets_block = ANALYSIS_TARGETS_TEMPLATE
        .replace("{profile}", &describe_profile(metrics))
        .replace("{calories}", &targets.calories.to_string())
        .replace("{flexibility}", &flexibility.to_string())
        .replace("{protein}", &targets.protein_grams.to_string())
        .replace("{carbs}", &targets.carb_grams.to_string())
        .replace("{fats}", &targets.fat_grams.to_string());

    let meal_lines = meals
        .entries()
        .into_iter()
        .map(|(label, text)| format!("{label}: {text}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{targets_block}\n\nCurrent meals:\n{meal_lines}\n\n{ANALYSIS_INSTRUCTIONS}")
}

/// Two-message prompt plus the closed response schema.
pub fn build_analysis_request(
    metrics: &BodyMetrics,
    targets: &DailyTargets,
    meals: &MealInput,
) -> CompletionRequest {
    CompletionRequest {
        messages: vec![
            ChatMessage::system(ANALYSIS_SYSTEM),
            ChatMessage::user(build_user_prompt(metrics, targets, meals)),
        ],
        schema: Some(analysis_response_schema()),
        temperature: None,
        max_tokens: None,
    }
}

/// Parses the responder's text and attaches `targets`. Everything else passes through.
pub fn assemble_analysis(content: &str, targets: DailyTargets) -> Result<AnalysisResult, AppError> {
    if content.is_empty() {
        return Err(AppError::EmptyResponse);
    }

    let parsed: Value = serde_json::from_str(content.trim()).map_err(|e| {
        error!("Original content: {content}");
        error!("Parse error: {e}");
        AppError::MalformedResponse(e)
    })?;

    let mut body: Map<String, Value> = match parsed {
        Value::Object(map) => map,
        other => {
            error!("Original content: {content}");
            return Err(AppError::MalformedResponse(serde::de::Error::custom(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))));
        }
    };

    // Computed targets replace whatever the responder put under the same key.
    if body.remove("targets").is_some() {
        warn!("Responder supplied its own targets; replacing them with computed targets");
    }

    warn_on_breakdown_drift(&body);

    Ok(AnalysisResult { body, targets })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn warn_on_breakdown_drift(body: &Map<String, Value>) {
    let Some(raw) = body.get("foodBreakdown") else {
        warn!("Analysis is missing foodBreakdown");
        return;
    };
    match serde_json::from_value::<FoodBreakdown>(raw.clone()) {
        Ok(breakdown) if !breakdown.percentages_aligned() => warn!(
            "targetPercentages ({}) do not align with headers[1..] ({})",
            breakdown.target_percentages.len(),
            breakdown.headers.len().saturating_sub(1)
        ),
        Ok(_) => {}
        Err(e) => warn!("foodBreakdown does not match the expected shape: {e}"),
    }
}

/// Validates meals, computes targets, makes exactly one responder call, assembles.
pub async fn request_analysis(
    responder: &dyn Responder,
    metrics: &BodyMetrics,
    meals: &MealInput,
) -> Result<AnalysisResult, AppError> {
    if meals.is_blank() {
        return Err(AppError::Validation(
            "At least one meal input must be provided.".to_string(),
        ));
    }

    let targets = compute_targets(metrics);
    let request = build_analysis_request(metrics, &targets, meals);

    info!(
        meals = meals.entries().len(),
        calories = targets.calories,
        "Requesting meal analysis"
    );
    let content = responder.complete(&request).await?;

    assemble_analysis(&content, targets)
}
