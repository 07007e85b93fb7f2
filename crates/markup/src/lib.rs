// ABOUTME: Main library entry point for the prdscribe markup cleaner.
// ABOUTME: Re-exports the public API: Cleaner, CleanerBuilder, Cleaned, CleanedText, CleanError, ProseStyle, Options.

//! prdscribe-markup - turns wiki storage markup into clean text.
//!
//! Code-macro bodies are pulled out verbatim, their macro wrappers are
//! removed, and the remaining markup is converted to plain prose. The
//! result lists the verbatim blocks first and the prose last, joined with
//! blank lines.
//!
//! # Example
//!
//! ```
//! use prdscribe_markup::{clean, Cleaned};
//!
//! let out = clean("<ac:plain-text-body>foo()</ac:plain-text-body><p>Hello <b>world</b></p>");
//! assert_eq!(out.as_string(), "foo()\n\nHello world");
//! assert!(matches!(clean(""), Cleaned::EmptyInput));
//! ```

pub mod cleaner;
pub mod dom;
pub mod error;
pub mod formats;
pub mod options;
pub mod result;

pub use crate::cleaner::{clean, clean_opt, Cleaner};
pub use crate::error::CleanError;
pub use crate::options::{CleanerBuilder, Options, ProseStyle, DEFAULT_VERBATIM_TAG};
pub use crate::result::{Cleaned, CleanedText, FRAGMENT_SEPARATOR};
