// ABOUTME: Result types returned by the markup cleaner.
// ABOUTME: Cleaned distinguishes empty input, empty output, and usable text fragments.

use std::fmt;

use crate::error::CleanError;

/// Separator placed between fragments in the joined text.
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Ordered text pieces produced by one cleaning call.
///
/// Verbatim blocks come first in document order, followed by at most one
/// prose fragment. No fragment is ever empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CleanedText {
    verbatim: Vec<String>,
    prose: Option<String>,
}

impl CleanedText {
    pub(crate) fn push_verbatim(&mut self, text: String) {
        if !text.is_empty() {
            self.verbatim.push(text);
        }
    }

    pub(crate) fn set_prose(&mut self, text: String) {
        if !text.is_empty() {
            self.prose = Some(text);
        }
    }

    /// Verbatim blocks in document order.
    pub fn verbatim(&self) -> &[String] {
        &self.verbatim
    }

    /// The converted prose, if any survived.
    pub fn prose(&self) -> Option<&str> {
        self.prose.as_deref()
    }

    /// All fragments in output order.
    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.verbatim
            .iter()
            .map(String::as_str)
            .chain(self.prose.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.verbatim.is_empty() && self.prose.is_none()
    }

    /// Join all fragments with a blank line.
    pub fn joined(&self) -> String {
        self.fragments().collect::<Vec<_>>().join(FRAGMENT_SEPARATOR)
    }
}

impl fmt::Display for CleanedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

/// Outcome of cleaning a markup document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cleaned {
    /// No input was supplied; nothing was processed.
    EmptyInput,
    /// Processing finished but no usable text remained.
    EmptyResult,
    /// Usable text.
    Text(CleanedText),
}

impl Cleaned {
    /// Returns the joined text, or an empty string for both empty variants.
    pub fn as_string(&self) -> String {
        match self {
            Cleaned::Text(text) => text.joined(),
            Cleaned::EmptyInput | Cleaned::EmptyResult => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !matches!(self, Cleaned::Text(_))
    }

    /// Borrow the fragments when there is text.
    pub fn text(&self) -> Option<&CleanedText> {
        match self {
            Cleaned::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Convert into a `Result` so pipelines can abort with `?`.
    pub fn into_result(self) -> Result<String, CleanError> {
        match self {
            Cleaned::Text(text) => Ok(text.joined()),
            Cleaned::EmptyInput => Err(CleanError::EmptyInput),
            Cleaned::EmptyResult => Err(CleanError::EmptyResult),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fragments_are_never_stored() {
        let mut text = CleanedText::default();
        text.push_verbatim(String::new());
        text.set_prose(String::new());
        assert!(text.is_empty());
        assert_eq!(text.joined(), "");
    }

    #[test]
    fn verbatim_precedes_prose() {
        let mut text = CleanedText::default();
        text.set_prose("prose".to_string());
        text.push_verbatim("one".to_string());
        text.push_verbatim("two".to_string());
        assert_eq!(text.joined(), "one\n\ntwo\n\nprose");
        assert_eq!(text.fragments().count(), 3);
    }

    #[test]
    fn empty_variants_render_as_empty_string() {
        assert_eq!(Cleaned::EmptyInput.as_string(), "");
        assert_eq!(Cleaned::EmptyResult.as_string(), "");
        assert_ne!(Cleaned::EmptyInput, Cleaned::EmptyResult);
    }

    #[test]
    fn into_result_maps_variants() {
        assert_eq!(
            Cleaned::EmptyResult.into_result(),
            Err(CleanError::EmptyResult)
        );
        assert_eq!(Cleaned::EmptyInput.into_result(), Err(CleanError::EmptyInput));

        let mut text = CleanedText::default();
        text.set_prose("hello".to_string());
        assert_eq!(Cleaned::Text(text).into_result(), Ok("hello".to_string()));
    }
}
