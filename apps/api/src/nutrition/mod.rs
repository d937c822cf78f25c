// Nutrition: target calculation, target progress and the profile summary.
// Pure and deterministic; nothing here talks to the responder.

pub mod handlers;
pub mod profile;
pub mod progress;
pub mod targets;

pub use targets::compute_targets;
