//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Text
//!
//! ```text
//! photos/barn.jpg
//!     Final Verdict: RED (62.4%)
//!         3 out of 4 methods detected red with 62.4% average confidence
//!     Simple RGB Check: red (12.0%)
//!     HSL Analysis: red (38.1%)
//!     Dominant Color: no red (0.0%)
//!     Histogram Analysis: red (100.0%)
//!         peaks: R 201, G 34, B 30
//! ```
//!
//! A source that could not be loaded shows its single error line instead.
//!
//! ## JSON
//!
//! An array of `{ "source": ..., "results": [...] }` objects. Result fields
//! are camelCase (`hasRed`, `histogramData`); only the histogram result
//! carries `histogramData`.
//!
//! # Architecture
//!
//! Each format has a `format_*` function (returns lines or a string) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::detect::{DetectionResult, Method};
use serde::Serialize;

/// All results for one analyzed source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub source: String,
    pub results: Vec<DetectionResult>,
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `Name: red (12.0%)`, or the uppercase form for the verdict.
fn result_line(result: &DetectionResult) -> String {
    let call = match (result.method, result.has_red) {
        (Method::FinalVerdict, true) => "RED",
        (Method::FinalVerdict, false) => "NO RED",
        (_, true) => "red",
        (_, false) => "no red",
    };
    format!("{}: {} ({:.1}%)", result.method, call, result.confidence)
}

// ============================================================================
// Text
// ============================================================================

/// Format one source's results as indented lines.
pub fn format_report(report: &Report) -> Vec<String> {
    let mut lines = vec![report.source.clone()];

    for result in &report.results {
        match result.method {
            Method::Error => {
                lines.push(format!("{}Error: {}", indent(1), result.description));
            }
            Method::FinalVerdict => {
                lines.push(format!("{}{}", indent(1), result_line(result)));
                lines.push(format!("{}{}", indent(2), result.description));
            }
            _ => {
                lines.push(format!("{}{}", indent(1), result_line(result)));
                if let Some(histogram) = &result.histogram_data {
                    let [r, g, b] = histogram.peaks();
                    lines.push(format!("{}peaks: R {r}, G {g}, B {b}", indent(2)));
                }
            }
        }
    }

    lines
}

/// Format several reports, separated by blank lines.
pub fn format_reports(reports: &[Report]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(format_report(report));
    }
    lines
}

/// Print text reports to stdout.
pub fn print_reports(reports: &[Report]) {
    for line in format_reports(reports) {
        println!("{}", line);
    }
}

// ============================================================================
// JSON
// ============================================================================

pub fn format_json(reports: &[Report]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}

/// Print JSON reports to stdout.
pub fn print_json(reports: &[Report]) -> serde_json::Result<()> {
    println!("{}", format_json(reports)?);
    Ok(())
}

// ============================================================================
// Method catalogue
// ============================================================================

/// Describe every detection method, then how the verdict is formed.
pub fn format_methods() -> Vec<String> {
    let mut lines = Vec::new();
    for &method in Method::all().iter().chain(&[Method::FinalVerdict]) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(method.name().to_string());
        lines.push(format!("{}{}", indent(1), method.about()));
    }
    lines
}

pub fn print_methods() {
    for line in format_methods() {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze_pixels;
    use crate::config::AnalysisConfig;
    use crate::test_helpers::solid;

    fn red_report() -> Report {
        Report {
            source: "red.png".to_string(),
            results: analyze_pixels(&solid(4, 4, [255, 0, 0, 255]), &AnalysisConfig::default()),
        }
    }

    // =========================================================================
    // Text
    // =========================================================================

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn format_red_report() {
        let lines = format_report(&red_report());
        assert_eq!(
            lines,
            vec![
                "red.png",
                "    Final Verdict: RED (100.0%)",
                "        4 out of 4 methods detected red with 100.0% average confidence",
                "    Simple RGB Check: red (100.0%)",
                "    HSL Analysis: red (100.0%)",
                "    Dominant Color: red (100.0%)",
                "    Histogram Analysis: red (100.0%)",
                "        peaks: R 255, G 0, B 0",
            ]
        );
    }

    #[test]
    fn format_negative_verdict() {
        let report = Report {
            source: "green.png".to_string(),
            results: analyze_pixels(&solid(4, 4, [0, 255, 0, 255]), &AnalysisConfig::default()),
        };
        let lines = format_report(&report);
        assert_eq!(lines[1], "    Final Verdict: NO RED (0.0%)");
        assert_eq!(
            lines[2],
            "        Not enough methods detected red to make a positive determination"
        );
        assert_eq!(lines[3], "    Simple RGB Check: no red (0.0%)");
    }

    #[test]
    fn format_error_report() {
        let report = Report {
            source: "https://example.com/gone.png".to_string(),
            results: vec![DetectionResult::load_error()],
        };
        let lines = format_report(&report);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("    Error: Could not load the image"));
    }

    #[test]
    fn reports_separated_by_blank_line() {
        let lines = format_reports(&[red_report(), red_report()]);
        assert_eq!(lines.len(), 17);
        assert_eq!(lines[8], "");
        assert_eq!(lines[9], "red.png");
    }

    // =========================================================================
    // JSON
    // =========================================================================

    #[test]
    fn json_has_camel_case_fields() {
        let json = format_json(&[red_report()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let results = value[0]["results"].as_array().unwrap();
        assert_eq!(value[0]["source"], "red.png");
        assert_eq!(results.len(), 5);
        assert_eq!(results[0]["method"], "Final Verdict");
        assert_eq!(results[0]["hasRed"], true);
        assert!(results[0].get("histogramData").is_none());
        assert_eq!(results[4]["histogramData"]["red"][255], 16);
    }

    #[test]
    fn json_results_parse_back() {
        let report = red_report();
        let json = format_json(std::slice::from_ref(&report)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let results: Vec<DetectionResult> =
            serde_json::from_value(value[0]["results"].clone()).unwrap();
        assert_eq!(results, report.results);
    }

    // =========================================================================
    // Methods
    // =========================================================================

    #[test]
    fn methods_list_every_detector_then_verdict() {
        let lines = format_methods();
        let headings: Vec<&str> = lines
            .iter()
            .filter(|l| !l.is_empty() && !l.starts_with(' '))
            .map(String::as_str)
            .collect();
        assert_eq!(
            headings,
            vec![
                "Simple RGB Check",
                "HSL Analysis",
                "Dominant Color",
                "Histogram Analysis",
                "Final Verdict",
            ]
        );
    }
}
