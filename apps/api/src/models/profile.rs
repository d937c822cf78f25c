use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Biological sex, used only for the BMR sex offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            other => Err(format!("unknown sex '{other}' (expected male or female)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Moderate,
    Active,
}

impl ActivityLevel {
    /// TDEE multiplier applied to BMR.
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            other => Err(format!(
                "unknown activity level '{other}' (expected sedentary, moderate or active)"
            )),
        }
    }
}

/// Fixed body-metrics record for the single diary owner. Imperial units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMetrics {
    pub age: u32,
    pub height_inches: f64,
    pub weight_pounds: f64,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
}

impl BodyMetrics {
    /// Height formatted as feet and inches, e.g. `5'11"`.
    pub fn height_display(&self) -> String {
        let total = self.height_inches.round() as i64;
        format!("{}'{}\"", total / 12, total % 12)
    }
}

impl Default for BodyMetrics {
    fn default() -> Self {
        Self {
            age: 37,
            height_inches: 71.0,
            weight_pounds: 225.0,
            sex: Sex::Male,
            activity_level: ActivityLevel::Moderate,
        }
    }
}

/// Weight-loss journey markers shown in the profile summary. Pounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightGoal {
    pub starting_weight: f64,
    pub current_weight: f64,
    pub target_weight: f64,
}

impl Default for WeightGoal {
    fn default() -> Self {
        Self {
            starting_weight: 225.0,
            current_weight: 220.0,
            target_weight: 185.0,
        }
    }
}
