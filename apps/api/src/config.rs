use std::str::FromStr;

use anyhow::{Context, Result};

use crate::models::profile::{ActivityLevel, BodyMetrics, Sex, WeightGoal};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// Application configuration loaded from environment variables.
///
/// The OpenAI key is deliberately optional at startup: its absence is a
/// per-request condition, not a boot failure.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub port: u16,
    pub rust_log: String,
    /// When true, error responses carry a `details` field with the error chain.
    pub expose_error_details: bool,
    pub body_metrics: BodyMetrics,
    pub weight_goal: WeightGoal,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let body_metrics = BodyMetrics {
            age: env_or("PROFILE_AGE", 37)?,
            height_inches: env_or("PROFILE_HEIGHT_INCHES", 71.0)?,
            weight_pounds: env_or("PROFILE_WEIGHT_POUNDS", 225.0)?,
            sex: env_or("PROFILE_SEX", Sex::Male)?,
            activity_level: env_or("PROFILE_ACTIVITY_LEVEL", ActivityLevel::Moderate)?,
        };

        let weight_goal = WeightGoal {
            starting_weight: env_or("GOAL_STARTING_WEIGHT", 225.0)?,
            current_weight: env_or("GOAL_CURRENT_WEIGHT", 220.0)?,
            target_weight: env_or("GOAL_TARGET_WEIGHT", 185.0)?,
        };

        Ok(Config {
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            expose_error_details: std::env::var("APP_ENV")
                .map(|env| env.eq_ignore_ascii_case("development"))
                .unwrap_or(false),
            body_metrics,
            weight_goal,
        })
    }
}

/// Reads and parses an optional variable, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration matching the shipped defaults, with no environment lookups.
    pub fn for_tests() -> Self {
        Config {
            openai_api_key: Some("test-key".to_string()),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            port: 8080,
            rust_log: "info".to_string(),
            expose_error_details: false,
            body_metrics: BodyMetrics::default(),
            weight_goal: WeightGoal::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_when_unset() {
        let value: u16 = env_or("FOOD_DIARY_TEST_UNSET_VARIABLE", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_env_or_rejects_unparseable_value() {
        std::env::set_var("FOOD_DIARY_TEST_BAD_PORT", "not-a-port");
        let err = env_or::<u16>("FOOD_DIARY_TEST_BAD_PORT", 8080).unwrap_err();
        assert!(format!("{err:#}").contains("FOOD_DIARY_TEST_BAD_PORT"));
        std::env::remove_var("FOOD_DIARY_TEST_BAD_PORT");
    }

    #[test]
    fn test_env_or_parses_enum_values() {
        std::env::set_var("FOOD_DIARY_TEST_ACTIVITY", "Active");
        let level = env_or("FOOD_DIARY_TEST_ACTIVITY", ActivityLevel::Moderate).unwrap();
        assert_eq!(level, ActivityLevel::Active);
        std::env::remove_var("FOOD_DIARY_TEST_ACTIVITY");
    }

    #[test]
    fn test_defaults_match_shipped_profile() {
        let config = Config::for_tests();
        assert_eq!(config.body_metrics.age, 37);
        assert_eq!(config.body_metrics.sex, Sex::Male);
        assert_eq!(config.weight_goal.target_weight, 185.0);
    }
}
