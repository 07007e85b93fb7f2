// ABOUTME: Main library entry point for prdscribe Gherkin handling.
// ABOUTME: Re-exports step extraction, generated-text normalization, and test-management payloads.

//! prdscribe-gherkin - reduces generated Gherkin to its step lines.
//!
//! # Example
//!
//! ```
//! use prdscribe_gherkin::extract_steps;
//!
//! let steps = extract_steps("Feature: Login\nScenario: ok\nGiven a user\nBut nothing\nThen done");
//! assert_eq!(steps.to_script(), "Given a user\nThen done");
//! ```

pub mod error;
pub mod normalize;
pub mod payload;
pub mod steps;

pub use crate::error::GherkinError;
pub use crate::normalize::{normalize_generated, summarize, Summary};
pub use crate::payload::{ScriptType, Submission, TestCaseRequest, TestCaseType, TestScriptRequest};
pub use crate::steps::{extract_steps, extract_steps_text, StepKeyword, StepLine, StepSequence};
