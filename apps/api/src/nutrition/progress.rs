//! Target progress — compares an analysis' reported totals against the daily targets.
//!
//! Column layout follows the food breakdown table: `totals[0]` is the label,
//! then calories, protein, carbs, fat. Calorie progress comes from
//! `targetPercentages[0]`; macro progress from `macroDistribution.*.targetMet`.

use serde::{Deserialize, Serialize};

use crate::models::analysis::{AnalysisView, DailyTargets, MacroShare, TableCell};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Calories,
    Protein,
    Carbs,
    Fats,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Calories, Metric::Protein, Metric::Carbs, Metric::Fats];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Calories => "Calories",
            Metric::Protein => "Protein",
            Metric::Carbs => "Carbs",
            Metric::Fats => "Fats",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Calories => "kcal",
            _ => "g",
        }
    }

    /// Fractional deviation from target still counted as on target.
    pub fn allowed_range(&self) -> f64 {
        match self {
            Metric::Calories => 0.10,
            Metric::Protein => 0.05,
            Metric::Carbs | Metric::Fats => 0.15,
        }
    }

    fn totals_column(&self) -> usize {
        match self {
            Metric::Calories => 1,
            Metric::Protein => 2,
            Metric::Carbs => 3,
            Metric::Fats => 4,
        }
    }

    fn target(&self, targets: &DailyTargets) -> i64 {
        match self {
            Metric::Calories => targets.calories,
            Metric::Protein => targets.protein_grams,
            Metric::Carbs => targets.carb_grams,
            Metric::Fats => targets.fat_grams,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Optimal,
    High,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricProgress {
    pub metric: Metric,
    pub label: String,
    pub unit: String,
    pub target: i64,
    pub current: f64,
    pub progress_percent: f64,
    pub allowed_range: f64,
    pub difference: f64,
    pub status: ProgressStatus,
}

pub fn classify(current: f64, target: f64, allowed_range: f64) -> ProgressStatus {
    let difference = current - target;
    if difference.abs() <= target * allowed_range {
        ProgressStatus::Optimal
    } else if difference > 0.0 {
        ProgressStatus::High
    } else {
        ProgressStatus::Low
    }
}

/// Progress for all four metrics, in calories→fats order. Missing values read as zero.
pub fn evaluate_progress(targets: &DailyTargets, analysis: &AnalysisView) -> Vec<MetricProgress> {
    let totals: &[TableCell] = analysis
        .food_breakdown
        .as_ref()
        .map(|b| b.totals.as_slice())
        .unwrap_or_default();
    let macros = analysis.macro_distribution.unwrap_or_default();

    Metric::ALL
        .iter()
        .map(|metric| {
            let target = metric.target(targets);
            let current = totals
                .get(metric.totals_column())
                .and_then(TableCell::as_f64)
                .unwrap_or(0.0);
            let progress_percent = match metric {
                Metric::Calories => analysis
                    .food_breakdown
                    .as_ref()
                    .and_then(|b| b.target_percentages.first().copied())
                    .unwrap_or(0.0),
                Metric::Protein => percent_met(&macros.protein),
                Metric::Carbs => percent_met(&macros.carbs),
                Metric::Fats => percent_met(&macros.fat),
            };

            MetricProgress {
                metric: *metric,
                label: metric.label().to_string(),
                unit: metric.unit().to_string(),
                target,
                current,
                progress_percent,
                allowed_range: metric.allowed_range(),
                difference: current - target as f64,
                status: classify(current, target as f64, metric.allowed_range()),
            }
        })
        .collect()
}

fn percent_met(share: &MacroShare) -> f64 {
    share.target_met * 100.0
}
