// ABOUTME: CDATA section handling ahead of lenient HTML parsing.
// ABOUTME: Rewrites <![CDATA[...]]> into escaped text so the HTML parser keeps it.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static CDATA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").unwrap());

/// Escape the characters that would otherwise be read as markup.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replace every terminated CDATA section with its escaped contents.
///
/// An HTML parser treats CDATA outside foreign content as a bogus comment,
/// which would silently drop embedded code. Unterminated sections are left
/// untouched.
pub fn escape_cdata_sections(raw: &str) -> String {
    if !raw.contains("<![CDATA[") {
        return raw.to_string();
    }
    CDATA_RE
        .replace_all(raw, |caps: &Captures| escape_text(&caps[1]))
        .into_owned()
}
