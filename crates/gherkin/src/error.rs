// ABOUTME: Error types for step extraction consumers and payload construction.
// ABOUTME: Provides GherkinError with NoSteps, EmptyField, and Json variants.

use thiserror::Error;

/// Errors raised when turning generated Gherkin into test-management payloads.
#[derive(Debug, Error)]
pub enum GherkinError {
    /// No step lines were found, so there is no script to attach.
    #[error("no Given/When/Then/And steps found")]
    NoSteps,

    /// A required payload field was blank.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// Serializing a payload failed.
    #[error("failed to serialize payload: {0}")]
    Json(#[from] serde_json::Error),
}
