//! Report request builder — turns a returned analysis back into a free-text prompt.
//!
//! One report contract, two prompt templates:
//! - `MealLog` lists each meal's items from `analysis.meals` (semicolon-delimited text).
//! - `Breakdown` embeds the structured food/macro/overall sections instead.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::{ChatMessage, CompletionRequest};
use crate::report::prompts::{
    breakdown_template, meal_log_template, REPORT_MAX_TOKENS, REPORT_SYSTEM, REPORT_TEMPERATURE,
};

const ITEM_DELIMITER: char = ';';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTemplate {
    #[default]
    MealLog,
    Breakdown,
}

/// Items logged for one meal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealMetrics {
    pub meal: String,
    pub items: Vec<String>,
    pub item_count: usize,
}

/// Splits a meal's text on `;`, trimming and dropping empty items.
pub fn split_items(text: &str) -> Vec<String> {
    text.split(ITEM_DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Per-meal item lists from `analysis.meals`, in document order.
/// A missing `meals` object yields no meals; non-text entries are skipped.
pub fn meal_metrics(analysis: &Value) -> Vec<MealMetrics> {
    let Some(meals) = analysis.get("meals").and_then(Value::as_object) else {
        return Vec::new();
    };

    meals
        .iter()
        .filter_map(|(meal, text)| match text.as_str() {
            Some(text) => {
                let items = split_items(text);
                Some(MealMetrics {
                    meal: capitalize(meal),
                    item_count: items.len(),
                    items,
                })
            }
            None => {
                warn!("Skipping meal '{meal}': expected text, found {text}");
                None
            }
        })
        .collect()
}

/// Fills `{name}` placeholders in a single left-to-right pass. Inserted values
/// are never rescanned, so meal text containing `{...}` stays as written.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut filled = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        filled.push_str(&rest[..start]);
        let tail = &rest[start..];
        let matched = values.iter().find(|(name, _)| {
            tail[1..]
                .strip_prefix(*name)
                .is_some_and(|after| after.starts_with('}'))
        });
        match matched {
            Some((name, value)) => {
                filled.push_str(value);
                rest = &tail[name.len() + 2..];
            }
            None => {
                filled.push('{');
                rest = &tail[1..];
            }
        }
    }

    filled.push_str(rest);
    filled
}

fn meal_log_prompt(analysis: &Value) -> Result<String, AppError> {
    let metrics = meal_metrics(analysis);

    let food_log = metrics
        .iter()
        .map(|m| format!("{}:\n{}", m.meal, m.items.join("\n")))
        .collect::<Vec<_>>()
        .join("\n\n");
    let table_rows = metrics
        .iter()
        .map(|m| m.meal.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let meal_details =
        serde_json::to_string_pretty(&metrics).map_err(|e| AppError::Internal(e.into()))?;

    Ok(fill_template(
        &meal_log_template(),
        &[
            ("food_log", food_log.as_str()),
            ("table_rows", table_rows.as_str()),
            ("meal_details", meal_details.as_str()),
        ],
    ))
}

fn breakdown_prompt(analysis: &Value) -> Result<String, AppError> {
    let section = |key: &str| analysis.get(key).cloned().unwrap_or(Value::Null);
    let data = json!({
        "foodBreakdown": section("foodBreakdown"),
        "macroDistribution": section("macroDistribution"),
        "overall": section("overall"),
        "targets": section("targets"),
    });
    let analysis_json =
        serde_json::to_string_pretty(&data).map_err(|e| AppError::Internal(e.into()))?;

    Ok(breakdown_template().replace("{analysis_json}", &analysis_json))
}

/// Unstructured completion request: no schema, low temperature, bounded length.
pub fn build_report_request(
    analysis: &Value,
    template: ReportTemplate,
) -> Result<CompletionRequest, AppError> {
    let prompt = match template {
        ReportTemplate::MealLog => meal_log_prompt(analysis)?,
        ReportTemplate::Breakdown => breakdown_prompt(analysis)?,
    };

    Ok(CompletionRequest {
        messages: vec![ChatMessage::system(REPORT_SYSTEM), ChatMessage::user(prompt)],
        schema: None,
        temperature: Some(REPORT_TEMPERATURE),
        max_tokens: Some(REPORT_MAX_TOKENS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_items_trims_and_drops_empties() {
        assert_eq!(
            split_items(" eggs ; toast;; coffee ;"),
            vec!["eggs", "toast", "coffee"]
        );
        assert!(split_items(" ; ").is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("breakfast"), "Breakfast");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_meal_metrics_in_document_order() {
        let analysis = json!({
            "meals": {
                "lunch": "salad; iced tea",
                "breakfast": "oatmeal",
                "snacks": 42
            }
        });
        let metrics = meal_metrics(&analysis);
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].meal, "Lunch");
        assert_eq!(metrics[0].items, vec!["salad", "iced tea"]);
        assert_eq!(metrics[0].item_count, 2);
        assert_eq!(metrics[1].meal, "Breakfast");
    }

    #[test]
    fn test_meal_metrics_without_meals_is_empty() {
        assert!(meal_metrics(&json!({"overall": {"grade": "B"}})).is_empty());
        assert!(meal_metrics(&json!({"meals": "eggs"})).is_empty());
    }

    #[test]
    fn test_meal_log_request() {
        let analysis = json!({"meals": {"breakfast": "eggs; toast", "dinner": "steak"}});
        let request = build_report_request(&analysis, ReportTemplate::MealLog).unwrap();

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].content, REPORT_SYSTEM);
        assert!(request.schema.is_none());
        assert_eq!(request.temperature, Some(0.3));
        assert_eq!(request.max_tokens, Some(1500));

        let prompt = &request.messages[1].content;
        for header in [
            "**Overall Grade**",
            "**Food Log**",
            "**Nutritional Breakdown**",
            "**Summary**",
            "**Recommendations**",
        ] {
            assert!(prompt.contains(header), "missing {header}");
        }
        assert!(prompt.contains("Breakfast:\neggs\ntoast\n\nDinner:\nsteak"));
        assert!(prompt.contains("Fat(g)\nBreakfast\nDinner\nTotal"));
        assert!(prompt.contains("\"itemCount\": 2"));
        assert!(!prompt.contains("{food_log}"));
        assert!(!prompt.contains("{meal_details}"));
    }

    #[test]
    fn test_fill_template_single_pass() {
        assert_eq!(
            fill_template("{a} and {b} {c}", &[("a", "{b}"), ("b", "x")]),
            "{b} and x {c}"
        );
        assert_eq!(fill_template("{a", &[("a", "x")]), "{a");
    }

    #[test]
    fn test_meal_text_with_placeholders_is_not_expanded() {
        let analysis = json!({"meals": {"breakfast": "eggs {meal_details}; toast {table_rows}"}});
        let request = build_report_request(&analysis, ReportTemplate::MealLog).unwrap();
        let prompt = &request.messages[1].content;

        assert!(prompt.contains("**Food Log**\n[List the meals as entered, organized by meal time]\nBreakfast:\neggs {meal_details}\ntoast {table_rows}\n\n**Nutritional Breakdown**"));
        assert!(prompt.contains("Fat(g)\nBreakfast\nTotal"));
        assert_eq!(prompt.matches("\"meal\": \"Breakfast\"").count(), 1);
    }

    #[test]
    fn test_meal_log_request_without_meals() {
        let request = build_report_request(&json!({}), ReportTemplate::MealLog).unwrap();
        let prompt = &request.messages[1].content;
        assert!(prompt.contains("Base your analysis on these meal details:\n[]"));
    }

    #[test]
    fn test_breakdown_request_embeds_structured_sections() {
        let analysis = json!({
            "overall": {"grade": "B+", "recommendations": ["Drink water"]},
            "targets": {"calories": 2550, "protein": 180, "carbs": 255, "fats": 85}
        });
        let request = build_report_request(&analysis, ReportTemplate::Breakdown).unwrap();
        let prompt = &request.messages[1].content;

        assert!(prompt.contains("\"grade\": \"B+\""));
        assert!(prompt.contains("\"foodBreakdown\": null"));
        assert!(prompt.contains("\"calories\": 2550"));
        assert!(!prompt.contains("**Food Log**"));
        assert_eq!(request.temperature, Some(REPORT_TEMPERATURE));
    }

    #[test]
    fn test_template_wire_names() {
        let template: ReportTemplate = serde_json::from_value(json!("breakdown")).unwrap();
        assert_eq!(template, ReportTemplate::Breakdown);
        assert_eq!(ReportTemplate::default(), ReportTemplate::MealLog);
    }
}
