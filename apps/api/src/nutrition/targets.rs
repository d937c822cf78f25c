use crate::models::analysis::DailyTargets;
use crate::models::profile::{BodyMetrics, Sex};

const KG_PER_POUND: f64 = 0.453592;
const CM_PER_INCH: f64 = 2.54;
/// Fixed daily deficit for weight loss.
const CALORIE_DEFICIT: f64 = 500.0;
/// Grams of protein per pound of body weight.
const PROTEIN_PER_POUND: f64 = 0.8;
const CARB_CALORIE_SHARE: f64 = 0.40;
const FAT_CALORIE_SHARE: f64 = 0.30;
const KCAL_PER_GRAM_CARB: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Basal metabolic rate (Mifflin-St Jeor) from imperial inputs.
pub fn basal_metabolic_rate(metrics: &BodyMetrics) -> f64 {
    let weight_kg = metrics.weight_pounds * KG_PER_POUND;
    let height_cm = metrics.height_inches * CM_PER_INCH;
    let sex_offset = match metrics.sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(metrics.age) + sex_offset
}

/// Total daily energy expenditure: BMR scaled by the activity multiplier.
pub fn maintenance_calories(metrics: &BodyMetrics) -> f64 {
    basal_metabolic_rate(metrics) * metrics.activity_level.multiplier()
}

/// Daily calorie and macro targets for a 500 kcal deficit.
///
/// Protein is pinned to body weight while carbs and fat are shares of the
/// deficit calories, so the three macros do not add back up to `calories`.
/// Carb and fat grams are derived from the unrounded deficit calories.
pub fn compute_targets(metrics: &BodyMetrics) -> DailyTargets {
    let deficit_calories = maintenance_calories(metrics) - CALORIE_DEFICIT;

    DailyTargets {
        calories: deficit_calories.round() as i64,
        protein_grams: (metrics.weight_pounds * PROTEIN_PER_POUND).round() as i64,
        carb_grams: (deficit_calories * CARB_CALORIE_SHARE / KCAL_PER_GRAM_CARB).round() as i64,
        fat_grams: (deficit_calories * FAT_CALORIE_SHARE / KCAL_PER_GRAM_FAT).round() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::ActivityLevel;

    #[test]
    fn test_bmr_default_profile() {
        // 10*102.0582 + 6.25*180.34 - 185 + 5
        let bmr = basal_metabolic_rate(&BodyMetrics::default());
        assert!((bmr - 1967.707).abs() < 0.001, "BMR was {bmr}");
    }

    #[test]
    fn test_maintenance_default_profile() {
        let tdee = maintenance_calories(&BodyMetrics::default());
        assert!((tdee - 3049.94585).abs() < 0.001, "TDEE was {tdee}");
    }

    #[test]
    fn test_targets_default_profile() {
        let targets = compute_targets(&BodyMetrics::default());
        assert_eq!(
            targets,
            DailyTargets {
                calories: 2550,
                protein_grams: 180,
                carb_grams: 255,
                fat_grams: 85,
            }
        );
    }

    #[test]
    fn test_targets_female_sedentary() {
        let metrics = BodyMetrics {
            sex: Sex::Female,
            activity_level: ActivityLevel::Sedentary,
            ..BodyMetrics::default()
        };
        let targets = compute_targets(&metrics);
        assert_eq!(targets.calories, 1662);
        assert_eq!(targets.protein_grams, 180);
        assert_eq!(targets.carb_grams, 166);
        assert_eq!(targets.fat_grams, 55);
    }

    #[test]
    fn test_targets_female_active() {
        let metrics = BodyMetrics {
            sex: Sex::Female,
            activity_level: ActivityLevel::Active,
            ..BodyMetrics::default()
        };
        let targets = compute_targets(&metrics);
        assert_eq!(targets.calories, 2608);
        assert_eq!(targets.carb_grams, 261);
        assert_eq!(targets.fat_grams, 87);
    }

    #[test]
    fn test_protein_ignores_activity_and_deficit() {
        let light = BodyMetrics {
            weight_pounds: 160.0,
            activity_level: ActivityLevel::Sedentary,
            ..BodyMetrics::default()
        };
        let heavy = BodyMetrics {
            activity_level: ActivityLevel::Active,
            ..light
        };
        assert_eq!(compute_targets(&light).protein_grams, 128);
        assert_eq!(compute_targets(&heavy).protein_grams, 128);
    }

    #[test]
    fn test_compute_targets_is_deterministic() {
        let metrics = BodyMetrics::default();
        assert_eq!(compute_targets(&metrics), compute_targets(&metrics));
    }

    #[test]
    fn test_macro_calories_do_not_sum_to_target() {
        let t = compute_targets(&BodyMetrics::default());
        let macro_kcal = t.protein_grams * 4 + t.carb_grams * 4 + t.fat_grams * 9;
        assert_ne!(macro_kcal, t.calories);
    }
}
