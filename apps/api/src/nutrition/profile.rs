use chrono::{DateTime, Local, Timelike};
use serde::Serialize;

use crate::models::analysis::DailyTargets;
use crate::models::profile::{BodyMetrics, WeightGoal};
use crate::nutrition::targets::compute_targets;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub starting_weight: f64,
    pub current_weight: f64,
    pub target_weight: f64,
    /// Share of the planned loss achieved so far, 0–100.
    pub progress_percent: f64,
    pub pounds_remaining: f64,
    pub reached: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Greeting {
    pub greeting: String,
    pub tip: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub metrics: BodyMetrics,
    pub targets: DailyTargets,
    pub goal: GoalProgress,
    pub greeting: Greeting,
}

pub fn goal_progress(goal: &WeightGoal) -> GoalProgress {
    let total_to_lose = goal.starting_weight - goal.target_weight;
    let lost_so_far = goal.starting_weight - goal.current_weight;

    let progress_percent = if lost_so_far > 0.0 && total_to_lose > 0.0 {
        (lost_so_far / total_to_lose * 100.0).min(100.0)
    } else {
        0.0
    };
    let pounds_remaining = goal.current_weight - goal.target_weight;

    GoalProgress {
        starting_weight: goal.starting_weight,
        current_weight: goal.current_weight,
        target_weight: goal.target_weight,
        progress_percent,
        pounds_remaining,
        reached: pounds_remaining <= 0.0,
    }
}

pub fn greeting_at(now: DateTime<Local>) -> Greeting {
    let (greeting, tip) = match now.hour() {
        h if h < 12 => ("Good morning", "Plan your breakfast"),
        h if h < 17 => ("Good afternoon", "Time for lunch"),
        _ => ("Good evening", "Evening meal prep"),
    };
    Greeting {
        greeting: greeting.to_string(),
        tip: tip.to_string(),
        date: now.format("%A, %B %-d").to_string(),
    }
}

pub fn build_profile_summary(
    metrics: &BodyMetrics,
    goal: &WeightGoal,
    now: DateTime<Local>,
) -> ProfileSummary {
    ProfileSummary {
        metrics: *metrics,
        targets: compute_targets(metrics),
        goal: goal_progress(goal),
        greeting: greeting_at(now),
    }
}
