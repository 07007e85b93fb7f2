// ABOUTME: Step extraction from generated Gherkin text.
// ABOUTME: Keeps only lines starting with Given, When, Then, or And, in original order.

//! Step-line extraction.
//!
//! A step line is a line whose trimmed form starts with one of the step
//! keywords, matched case-insensitively and followed by whitespace or the
//! end of the line. `But` is deliberately not a step keyword here, so a
//! `But ...` line is dropped like any other non-step line.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static STEP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(given|when|then|and)(?:\s|$)").unwrap());

/// Keywords that introduce a step line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKeyword {
    Given,
    When,
    Then,
    And,
}

impl StepKeyword {
    fn from_match(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "given" => Some(StepKeyword::Given),
            "when" => Some(StepKeyword::When),
            "then" => Some(StepKeyword::Then),
            "and" => Some(StepKeyword::And),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StepKeyword::Given => "Given",
            StepKeyword::When => "When",
            StepKeyword::Then => "Then",
            StepKeyword::And => "And",
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One trimmed step line together with its keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepLine {
    pub keyword: StepKeyword,
    pub text: String,
}

impl StepLine {
    /// Parse a single line. Returns `None` unless the trimmed line starts
    /// with a step keyword.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        let caps = STEP_RE.captures(trimmed)?;
        let keyword = StepKeyword::from_match(caps.get(1)?.as_str())?;
        Some(Self {
            keyword,
            text: trimmed.to_string(),
        })
    }
}

impl fmt::Display for StepLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Step lines in the order they appeared. No deduplication, no reordering.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepSequence {
    lines: Vec<StepLine>,
}

impl StepSequence {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepLine> {
        self.lines.iter()
    }

    /// Number of steps using the given keyword.
    pub fn count(&self, keyword: StepKeyword) -> usize {
        self.lines.iter().filter(|l| l.keyword == keyword).count()
    }

    /// The step lines joined by single newlines.
    pub fn to_script(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for StepSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_script())
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a StepLine;
    type IntoIter = std::slice::Iter<'a, StepLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl FromIterator<StepLine> for StepSequence {
    fn from_iter<I: IntoIterator<Item = StepLine>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

/// Extract the step lines from a block of generated text.
pub fn extract_steps(text: &str) -> StepSequence {
    let steps: StepSequence = text.lines().filter_map(StepLine::parse).collect();
    tracing::debug!(steps = steps.len(), "extracted step lines");
    steps
}

/// Extract step lines and join them into a script string. Empty when
/// nothing matched.
pub fn extract_steps_text(text: &str) -> String {
    extract_steps(text).to_script()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_only_step_lines() {
        let input = "Feature: Login\nScenario: Valid login\nGiven a user is on the login page\nWhen they submit valid credentials\nThen they see the dashboard\nBut nothing else happens";
        assert_eq!(
            extract_steps_text(input),
            "Given a user is on the login page\nWhen they submit valid credentials\nThen they see the dashboard"
        );
    }

    #[test]
    fn but_is_not_a_step_keyword() {
        assert_eq!(StepLine::parse("But the balance is unchanged"), None);
    }

    #[test]
    fn matching_is_case_insensitive_and_trims() {
        let step = StepLine::parse("   gIVEN a thing \t").unwrap();
        assert_eq!(step.keyword, StepKeyword::Given);
        assert_eq!(step.text, "gIVEN a thing");
    }

    #[test]
    fn keyword_must_be_a_whole_word() {
        assert_eq!(StepLine::parse("Andrew logs in"), None);
        assert_eq!(StepLine::parse("Thenceforth nothing"), None);
        assert_eq!(StepLine::parse("Given:"), None);
        assert!(StepLine::parse("And").is_some());
        assert!(StepLine::parse("When\tthe clock ticks").is_some());
    }

    #[test]
    fn keyword_must_lead_the_line() {
        assert_eq!(StepLine::parse("# Given a comment"), None);
        assert_eq!(StepLine::parse("Scenario: Given something"), None);
        assert_eq!(StepLine::parse("* Given a bullet"), None);
    }

    #[test]
    fn header_and_blank_lines_yield_empty() {
        let steps = extract_steps("Feature: Nothing\n\n   \nScenario: Empty\n");
        assert!(steps.is_empty());
        assert_eq!(steps.to_script(), "");
    }

    #[test]
    fn preserves_order_and_duplicates() {
        let input = "Then b\nGiven a\nThen b\nAnd c";
        let steps = extract_steps(input);
        assert_eq!(steps.to_script(), input);
        assert_eq!(steps.count(StepKeyword::Then), 2);
        let keywords: Vec<_> = steps.iter().map(|s| s.keyword).collect();
        assert_eq!(
            keywords,
            vec![
                StepKeyword::Then,
                StepKeyword::Given,
                StepKeyword::Then,
                StepKeyword::And
            ]
        );
    }

    #[test]
    fn handles_crlf_line_endings() {
        let steps = extract_steps("Given a\r\nWhen b\r\n");
        assert_eq!(steps.to_script(), "Given a\nWhen b");
    }
}
