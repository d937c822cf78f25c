// Meal analysis: prompt construction, the closed response schema, and assembly
// of the responder's JSON with the computed targets.
// All responder calls go through llm_client — no direct HTTP calls here.

pub mod analyzer;
pub mod handlers;
pub mod prompts;
pub mod schema;
