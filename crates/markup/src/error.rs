// ABOUTME: Error types for markup cleaning outcomes that carry no usable text.
// ABOUTME: Provides CleanError with EmptyInput and EmptyResult variants.

use thiserror::Error;

/// Reasons a cleaning call produced no text.
///
/// Neither variant is a fault inside the cleaner; they exist so that
/// orchestration code can use `?` to abort a larger pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CleanError {
    /// Nothing was supplied to clean.
    #[error("markup input is empty")]
    EmptyInput,

    /// The markup was processed but yielded no text.
    #[error("cleaning produced no usable text")]
    EmptyResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_distinct() {
        assert_ne!(
            CleanError::EmptyInput.to_string(),
            CleanError::EmptyResult.to_string()
        );
    }
}
