// ABOUTME: Configuration for the markup cleaner including ProseStyle, Options, and CleanerBuilder.
// ABOUTME: CleanerBuilder provides a fluent API for constructing Cleaner instances with custom settings.

use std::fmt;

use crate::cleaner::Cleaner;

/// Tag whose content is copied out byte-for-byte instead of converted.
pub const DEFAULT_VERBATIM_TAG: &str = "ac:plain-text-body";

/// Elements whose whole subtree is dropped from prose output.
pub const DEFAULT_SKIP_TAGS: &[&str] = &["script", "style", "noscript", "head", "title", "template"];

/// How the prose left after verbatim extraction is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProseStyle {
    /// Tag-free plain text.
    #[default]
    Text,
    /// Markdown, without link targets or images.
    Markdown,
}

impl fmt::Display for ProseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProseStyle::Text => "text",
            ProseStyle::Markdown => "markdown",
        };
        write!(f, "{}", s)
    }
}

/// Configuration options for a [`Cleaner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub verbatim_tag: String,
    pub prose_style: ProseStyle,
    pub skip_tags: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            verbatim_tag: DEFAULT_VERBATIM_TAG.to_string(),
            prose_style: ProseStyle::Text,
            skip_tags: DEFAULT_SKIP_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Builder for constructing Cleaner instances with custom configuration.
#[derive(Debug, Clone)]
pub struct CleanerBuilder {
    opts: Options,
}

impl CleanerBuilder {
    /// Create a new CleanerBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the tag that marks verbatim blocks. Matched case-insensitively.
    pub fn verbatim_tag(mut self, tag: impl Into<String>) -> Self {
        self.opts.verbatim_tag = tag.into().to_lowercase();
        self
    }

    /// Set how remaining prose is rendered.
    pub fn prose_style(mut self, style: ProseStyle) -> Self {
        self.opts.prose_style = style;
        self
    }

    /// Add an element name whose subtree is dropped from prose.
    pub fn skip_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into().to_lowercase();
        if !self.opts.skip_tags.contains(&tag) {
            self.opts.skip_tags.push(tag);
        }
        self
    }

    /// Build the Cleaner with the configured options.
    pub fn build(self) -> Cleaner {
        Cleaner::new(self.opts)
    }
}

impl Default for CleanerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
