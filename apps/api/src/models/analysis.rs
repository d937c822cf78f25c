use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Daily calorie and macro targets. Always derived from `BodyMetrics`, never user-supplied.
///
/// Wire names follow what the diary client reads (`protein`, `carbs`, `fats`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTargets {
    pub calories: i64,
    #[serde(rename = "protein")]
    pub protein_grams: i64,
    #[serde(rename = "carbs")]
    pub carb_grams: i64,
    #[serde(rename = "fats")]
    pub fat_grams: i64,
}

/// Free-text meal descriptions for one day. At least one must be non-blank to analyze.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MealInput {
    #[serde(default)]
    pub breakfast: Option<String>,
    #[serde(default)]
    pub lunch: Option<String>,
    #[serde(default)]
    pub dinner: Option<String>,
    #[serde(default)]
    pub snacks: Option<String>,
}

impl MealInput {
    /// Labelled meals that carry non-whitespace text, in breakfast→snacks order.
    /// The text is returned as entered.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Breakfast", &self.breakfast),
            ("Lunch", &self.lunch),
            ("Dinner", &self.dinner),
            ("Snacks", &self.snacks),
        ]
        .into_iter()
        .filter_map(|(label, text)| {
            text.as_deref()
                .filter(|t| !t.trim().is_empty())
                .map(|t| (label, t))
        })
        .collect()
    }

    pub fn is_blank(&self) -> bool {
        self.entries().is_empty()
    }
}

/// The responder's structured analysis with the request's targets attached.
///
/// `body` is the responder's JSON object, passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub body: Map<String, Value>,
    pub targets: DailyTargets,
}

// ────────────────────────────────────────────────────────────────────────────
// Typed, lenient views over the analysis JSON
// ────────────────────────────────────────────────────────────────────────────

/// A table cell as emitted by the responder: a number, a string, or anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableCell {
    Number(f64),
    Text(String),
    Other(Value),
}

impl TableCell {
    /// Numeric value of the cell. Numeric strings such as `"1850"`, `"1,850 kcal"`
    /// or `"42.5g"` parse too; `,` and `_` are digit separators.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TableCell::Number(n) => Some(*n),
            TableCell::Text(s) => {
                let numeric: String = s
                    .trim()
                    .chars()
                    .filter(|c| *c != ',' && *c != '_')
                    .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                    .collect();
                numeric.parse().ok()
            }
            TableCell::Other(_) => None,
        }
    }
}

/// Any JSON value as a number; non-numeric values read as zero.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = TableCell::deserialize(deserializer)?;
    Ok(cell.as_f64().unwrap_or(0.0))
}

/// A list of numbers where `null` means empty and non-numeric entries read as zero.
fn lenient_numbers<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let cells = Option::<Vec<TableCell>>::deserialize(deserializer)?;
    Ok(cells
        .unwrap_or_default()
        .iter()
        .map(|cell| cell.as_f64().unwrap_or(0.0))
        .collect())
}

/// A nested section where `null` reads as its default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FoodBreakdown {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<TableCell>>,
    pub totals: Vec<TableCell>,
    #[serde(deserialize_with = "lenient_numbers")]
    pub target_percentages: Vec<f64>,
}

impl FoodBreakdown {
    /// `targetPercentages`, when present, pairs positionally with `headers[1..]`.
    pub fn percentages_aligned(&self) -> bool {
        self.target_percentages.is_empty()
            || self.target_percentages.len() == self.headers.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MacroShare {
    #[serde(deserialize_with = "lenient_number")]
    pub percentage: f64,
    /// Fraction of the target reached; 1.0 means exactly on target.
    #[serde(deserialize_with = "lenient_number")]
    pub target_met: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroDistribution {
    #[serde(deserialize_with = "null_as_default")]
    pub protein: MacroShare,
    #[serde(deserialize_with = "null_as_default")]
    pub carbs: MacroShare,
    #[serde(deserialize_with = "null_as_default")]
    pub fat: MacroShare,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeBreakdown {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<TableCell>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverallAssessment {
    pub grade: String,
    pub recommendations: Vec<String>,
}

/// Whatever parts of an analysis a caller sent back to us. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisView {
    pub food_breakdown: Option<FoodBreakdown>,
    pub macro_distribution: Option<MacroDistribution>,
    pub grade_breakdown: Option<GradeBreakdown>,
    pub overall: Option<OverallAssessment>,
    pub targets: Option<DailyTargets>,
}
