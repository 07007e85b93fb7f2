// ABOUTME: The markup cleaner: splits verbatim blocks from prose and renders the rest as text.
// ABOUTME: Cleaner holds immutable Options; clean() is pure and safe to call from many threads.

use tracing::{debug, warn};

use crate::dom;
use crate::formats;
use crate::options::{CleanerBuilder, Options, ProseStyle};
use crate::result::{Cleaned, CleanedText};

/// Converts wiki storage markup into clean text.
///
/// Verbatim blocks (by default `ac:plain-text-body`, the body of a code
/// macro) are copied out first with only their outer whitespace trimmed;
/// their wrapper is removed from the tree and whatever remains is rendered
/// as prose.
#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    opts: Options,
}

impl Cleaner {
    /// Create a Cleaner with the given options.
    pub fn new(opts: Options) -> Self {
        Self { opts }
    }

    /// Returns a builder for configuring a Cleaner.
    pub fn builder() -> CleanerBuilder {
        CleanerBuilder::new()
    }

    /// The options this Cleaner was built with.
    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Clean a markup document.
    ///
    /// Empty input short-circuits to [`Cleaned::EmptyInput`]. Malformed
    /// markup never fails; the parser recovers and the best-effort text is
    /// returned. When nothing usable survives, [`Cleaned::EmptyResult`] is
    /// returned and a warning is logged.
    pub fn clean(&self, raw: &str) -> Cleaned {
        if raw.is_empty() {
            return Cleaned::EmptyInput;
        }

        let mut html = dom::parse_markup(raw);
        let mut cleaned = CleanedText::default();

        // Snapshot every match before touching the tree.
        let blocks = dom::find_elements(&html, &self.opts.verbatim_tag);
        let wrappers: Vec<_> = blocks
            .iter()
            .map(|id| dom::wrapper_of(&html, *id))
            .collect();

        for id in &blocks {
            if let Some(node) = html.tree.get(*id) {
                cleaned.push_verbatim(dom::node_text(node).trim().to_string());
            }
        }
        for wrapper in wrappers {
            dom::detach(&mut html, wrapper);
        }

        let prose = match self.opts.prose_style {
            ProseStyle::Text => formats::render_text(html.tree.root(), &self.opts.skip_tags),
            ProseStyle::Markdown => formats::render_markdown(&mut html, &self.opts.skip_tags),
        };
        cleaned.set_prose(prose.trim().to_string());

        debug!(
            verbatim_blocks = blocks.len(),
            fragments = cleaned.fragments().count(),
            style = %self.opts.prose_style,
            "cleaned markup"
        );

        if cleaned.is_empty() {
            warn!("cleaning produced an empty document");
            return Cleaned::EmptyResult;
        }
        Cleaned::Text(cleaned)
    }
}

/// Clean markup with default options.
pub fn clean(raw: &str) -> Cleaned {
    Cleaner::default().clean(raw)
}

/// Clean optional markup, treating `None` like empty input.
pub fn clean_opt(raw: Option<&str>) -> Cleaned {
    match raw {
        Some(raw) => clean(raw),
        None => Cleaned::EmptyInput,
    }
}
