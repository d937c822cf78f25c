//! JSON schema the responder's structured completion must satisfy.
//!
//! Top level: all four sections required, no additional properties.

use serde_json::{json, Value};

use crate::analysis::prompts::ANALYSIS_SCHEMA_NAME;
use crate::llm_client::ResponseSchema;

/// Top-level keys every analysis must carry.
pub const REQUIRED_SECTIONS: [&str; 4] = [
    "foodBreakdown",
    "macroDistribution",
    "gradeBreakdown",
    "overall",
];

fn string_array() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

fn cell_array() -> Value {
    json!({ "type": "array", "items": { "type": ["string", "number"] } })
}

fn table_rows() -> Value {
    json!({ "type": "array", "items": cell_array() })
}

fn macro_share() -> Value {
    json!({
        "type": "object",
        "required": ["percentage", "targetMet"],
        "properties": {
            "percentage": { "type": "number" },
            "targetMet": { "type": "number" }
        }
    })
}

pub fn analysis_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "foodBreakdown": {
                "type": "object",
                "required": ["headers", "rows", "totals", "targetPercentages"],
                "properties": {
                    "headers": string_array(),
                    "rows": table_rows(),
                    "totals": cell_array(),
                    "targetPercentages": { "type": "array", "items": { "type": "number" } }
                }
            },
            "macroDistribution": {
                "type": "object",
                "required": ["protein", "carbs", "fat"],
                "properties": {
                    "protein": macro_share(),
                    "carbs": macro_share(),
                    "fat": macro_share()
                }
            },
            "gradeBreakdown": {
                "type": "object",
                "required": ["headers", "rows"],
                "properties": {
                    "headers": string_array(),
                    "rows": table_rows()
                }
            },
            "overall": {
                "type": "object",
                "required": ["grade", "recommendations"],
                "properties": {
                    "grade": { "type": "string" },
                    "recommendations": string_array()
                }
            }
        },
        "required": REQUIRED_SECTIONS,
        "additionalProperties": false
    })
}

pub fn analysis_response_schema() -> ResponseSchema {
    ResponseSchema {
        name: ANALYSIS_SCHEMA_NAME.to_string(),
        schema: analysis_schema(),
    }
}
