//! Report text parser — best-effort split of the responder's prose into sections.
//!
//! A section header is a trimmed line that both starts and ends with `**`.
//! Inline bold mid-sentence is not a header. Every other non-blank line belongs
//! to the most recent header; lines before the first header are dropped.
//! A leading `* ` bullet marker is stripped.

use serde::Serialize;

const BOLD: &str = "**";
const BULLET: &str = "* ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub title: String,
    pub lines: Vec<String>,
}

/// Sections in the order their headers first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReportSections {
    sections: Vec<ReportSection>,
}

impl ReportSections {
    pub fn get(&self, title: &str) -> Option<&[String]> {
        self.sections
            .iter()
            .find(|s| s.title == title)
            .map(|s| s.lines.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReportSection> {
        self.sections.iter()
    }

    /// Starts (or restarts) a section and returns its index.
    fn open(&mut self, title: String) -> usize {
        match self.sections.iter().position(|s| s.title == title) {
            Some(index) => {
                self.sections[index].lines.clear();
                index
            }
            None => {
                self.sections.push(ReportSection {
                    title,
                    lines: Vec::new(),
                });
                self.sections.len() - 1
            }
        }
    }

    /// Re-wraps headers in `**`. Parsing the output yields `self` again.
    pub fn to_markdown(&self) -> String {
        self.iter()
            .map(|section| {
                let mut block = format!("{BOLD}{}{BOLD}", section.title);
                for line in &section.lines {
                    block.push('\n');
                    // Re-bullet lines the parser would otherwise strip or read as a header.
                    if line.starts_with(BULLET) || is_header(line) {
                        block.push_str(BULLET);
                    }
                    block.push_str(line);
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn is_header(line: &str) -> bool {
    line.starts_with(BOLD) && line.ends_with(BOLD)
}

pub fn parse_report(text: &str) -> ReportSections {
    let mut sections = ReportSections::default();
    let mut current: Option<usize> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_header(line) {
            let title = line.replace(BOLD, "").trim().to_string();
            current = if title.is_empty() {
                None
            } else {
                Some(sections.open(title))
            };
            continue;
        }

        if let Some(index) = current {
            let content = line.strip_prefix(BULLET).unwrap_or(line);
            sections.sections[index].lines.push(content.to_string());
        }
    }

    sections
}

/// One row of the "Nutritional Breakdown" table, columns kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRow {
    pub meal: String,
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
    pub is_total: bool,
}

/// Whitespace-split table rows; rows with fewer than five columns are skipped.
pub fn parse_breakdown_rows(lines: &[String]) -> Vec<BreakdownRow> {
    lines
        .iter()
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            if columns.len() < 5 {
                return None;
            }
            Some(BreakdownRow {
                meal: columns[0].to_string(),
                calories: columns[1].to_string(),
                protein: columns[2].to_string(),
                carbs: columns[3].to_string(),
                fat: columns[4].to_string(),
                is_total: columns[0].to_lowercase().contains("total"),
            })
        })
        .collect()
}

pub const BREAKDOWN_SECTION: &str = "Nutritional Breakdown";

/// Table rows of the breakdown section, empty when the section is absent.
pub fn breakdown_from_sections(sections: &ReportSections) -> Vec<BreakdownRow> {
    sections
        .get(BREAKDOWN_SECTION)
        .map(parse_breakdown_rows)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_REPORT: &str = "Here is your report.

**Overall Grade**
B+

**Food Log**
Breakfast:
eggs

**Nutritional Breakdown**
Meal        Calories    Protein(g)    Carbs(g)    Fat(g)
Breakfast   320         22            4           24
Total       320         22            4           24

**Summary**
* Calories were **well below** target
* Protein was moderate

**Recommendations**
* Add a lunch";

    #[test]
    fn test_parse_grade_and_bullets() {
        let sections = parse_report("**Overall Grade**\nB+\n\n**Summary**\n* point one\n* point two");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections.get("Overall Grade").unwrap(), ["B+"]);
        assert_eq!(sections.get("Summary").unwrap(), ["point one", "point two"]);
    }

    #[test]
    fn test_parse_without_headers_is_empty() {
        let sections = parse_report("Just some prose.\n* a bullet\nNo **headers** here.");
        assert!(sections.is_empty());
        assert!(parse_report("").is_empty());
    }

    #[test]
    fn test_parse_full_report_keeps_header_order() {
        let sections = parse_report(FULL_REPORT);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Overall Grade",
                "Food Log",
                "Nutritional Breakdown",
                "Summary",
                "Recommendations"
            ]
        );
        assert_eq!(
            sections.get("Summary").unwrap()[0],
            "Calories were **well below** target"
        );
        assert_eq!(sections.get("Food Log").unwrap(), ["Breakfast:", "eggs"]);
    }

    #[test]
    fn test_repeated_header_restarts_section() {
        let sections = parse_report("**Summary**\nold\n**Other**\nx\n**Summary**\nnew");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections.get("Summary").unwrap(), ["new"]);
        assert_eq!(sections.iter().next().unwrap().title, "Summary");
    }

    #[test]
    fn test_bare_bold_marker_drops_following_lines() {
        let sections = parse_report("**Summary**\nkept\n**\nlost");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections.get("Summary").unwrap(), ["kept"]);
    }

    #[test]
    fn test_indented_header_is_recognized() {
        let sections = parse_report("   **Overall Grade**   \n  A-  ");
        assert_eq!(sections.get("Overall Grade").unwrap(), ["A-"]);
    }

    #[test]
    fn test_reparse_of_markdown_is_stable() {
        let original = parse_report(FULL_REPORT);
        let reparsed = parse_report(&original.to_markdown());
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_reparse_preserves_tricky_lines() {
        let sections = parse_report("**Notes**\n* * nested bullet\n* **Bold line**");
        assert_eq!(sections.get("Notes").unwrap(), ["* nested bullet", "**Bold line**"]);
        assert_eq!(parse_report(&sections.to_markdown()), sections);
    }

    #[test]
    fn test_breakdown_rows() {
        let sections = parse_report(FULL_REPORT);
        let rows = breakdown_from_sections(&sections);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].meal, "Meal");
        assert_eq!(rows[1].meal, "Breakfast");
        assert_eq!(rows[1].calories, "320");
        assert!(!rows[1].is_total);
        assert!(rows[2].is_total);
        assert_eq!(rows[2].fat, "24");
    }

    #[test]
    fn test_breakdown_skips_short_rows() {
        let lines = vec!["Lunch 400 30".to_string(), "Dinner 600 40 50 20".to_string()];
        let rows = parse_breakdown_rows(&lines);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].meal, "Dinner");
    }

    #[test]
    fn test_breakdown_missing_section() {
        assert!(breakdown_from_sections(&parse_report("**Summary**\nok")).is_empty());
    }
}
