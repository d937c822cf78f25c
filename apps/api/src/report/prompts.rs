// Prompt constants for the free-text nutrition report.

/// Low temperature keeps report phrasing factual and repeatable.
pub const REPORT_TEMPERATURE: f32 = 0.3;
pub const REPORT_MAX_TOKENS: u32 = 1500;

pub const REPORT_SYSTEM: &str = "You are a precise nutritional analysis engine. Format your response exactly as requested with markdown-style section headers (**Section**). Provide specific, data-driven analysis and actionable recommendations. Use bullet points for lists and proper spacing for the table format.";

/// Shared closing sections of both report templates.
const SUMMARY_AND_RECOMMENDATIONS: &str = "**Summary**
[Provide 3-4 bullet points analyzing:]
* Overall caloric intake and distribution across meals
* Macro-nutrient balance
* Meal timing and portion sizes
* Food quality and nutrient density

**Recommendations**
[Provide 3-5 specific, actionable recommendations focusing on:]
* Portion size adjustments if needed
* Meal timing suggestions
* Food quality improvements
* Macro-nutrient balance optimization
* Specific food additions or substitutions";

const OVERALL_GRADE: &str = "**Overall Grade**
[Provide a letter grade (A, B, C, D, or F) with optional + or - that reflects the overall nutritional quality. Consider meal balance, portion sizes, and nutrient density.]";

/// Meal-log report (default). Replace: {food_log}, {table_rows}, {meal_details}
pub fn meal_log_template() -> String {
    format!(
        "Generate a detailed nutritional analysis report using the following format:

{OVERALL_GRADE}

**Food Log**
[List the meals as entered, organized by meal time]
{{food_log}}

**Nutritional Breakdown**
[Create a table showing estimated nutritional content for each meal]
Meal        Calories    Protein(g)    Carbs(g)    Fat(g)
{{table_rows}}
Total       [Sum]       [Sum]         [Sum]       [Sum]

{SUMMARY_AND_RECOMMENDATIONS}

Base your analysis on these meal details:
{{meal_details}}"
    )
}

/// Breakdown report, driven by the structured analysis instead of meal text.
/// Replace: {analysis_json}
pub fn breakdown_template() -> String {
    format!(
        "Generate a detailed nutritional analysis report using the following format:

{OVERALL_GRADE}

**Nutritional Breakdown**
[One line per food: name, calories, protein(g), carbs(g), fat(g), then a Total line]

{SUMMARY_AND_RECOMMENDATIONS}

Base your analysis on this structured nutrition data (food breakdown, macro distribution, overall assessment and daily targets):
{{analysis_json}}"
    )
}
