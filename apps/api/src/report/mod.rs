// Nutrition report: request building (meal-log and breakdown templates), the
// single responder call, and best-effort parsing of the returned prose.

pub mod builder;
pub mod generator;
pub mod handlers;
pub mod parser;
pub mod prompts;
