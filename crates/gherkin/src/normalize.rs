// ABOUTME: Cleanup and summary helpers for Gherkin text returned by a generation service.
// ABOUTME: Strips Markdown code fences and counts features, scenarios, and step lines.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::steps::StepLine;

static FEATURE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^feature:").unwrap());
static SCENARIO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^scenario(?:\s+outline)?:").unwrap());

/// Remove Markdown code fences (```` ```gherkin ```` and bare ```` ``` ````)
/// and trim the result.
pub fn normalize_generated(text: &str) -> String {
    text.replace("```gherkin", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Counts describing a generated Gherkin document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub features: usize,
    pub scenarios: usize,
    pub steps: usize,
}

/// Count feature headers, scenario headers, and step lines.
pub fn summarize(text: &str) -> Summary {
    let mut summary = Summary::default();
    for line in text.lines().map(str::trim) {
        if FEATURE_RE.is_match(line) {
            summary.features += 1;
        } else if SCENARIO_RE.is_match(line) {
            summary.scenarios += 1;
        } else if StepLine::parse(line).is_some() {
            summary.steps += 1;
        }
    }
    summary
}
