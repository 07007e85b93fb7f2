// ABOUTME: Integration tests for the markup cleaner against storage-format fixtures.
// ABOUTME: Covers fragment ordering, wrapper removal, and empty-result signalling.

use pretty_assertions::assert_eq;
use prdscribe_markup::{clean, CleanError, Cleaned, Cleaner, ProseStyle, FRAGMENT_SEPARATOR};
use std::fs;

fn load_fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path, e))
}

#[test]
fn prd_page_lists_code_blocks_before_prose() {
    let out = clean(&load_fixture("prd_page.html"));
    let text = out.text().expect("fixture should produce text");

    assert_eq!(
        text.verbatim().to_vec(),
        vec![
            "{\n  \"amount\": 10,\n  \"currency\": \"EUR\"\n}".to_string(),
            "POST /wallet/top-up".to_string(),
        ]
    );

    let joined = out.as_string();
    assert!(joined.starts_with("{\n  \"amount\""), "got: {}", joined);
    let prose = text.prose().expect("fixture has prose");
    assert!(joined.ends_with(prose));
}

#[test]
fn prd_page_prose_is_tag_free() {
    let out = clean(&load_fixture("prd_page.html"));
    let prose = out.text().and_then(|t| t.prose()).unwrap_or_default().to_string();

    assert!(prose.starts_with("Wallet Top-Up\n\nAs a registered user I want to add funds to my wallet."));
    assert!(prose.contains("See limits page."), "got: {}", prose);
    assert!(prose.contains("* Minimum top-up is 10 EUR\n* Maximum balance is 5000 EUR"));
    assert!(
        prose.contains("Error | Message\nLIMIT | Balance limit exceeded"),
        "table rows split: {}",
        prose
    );

    assert!(!prose.contains('<'), "tags leaked: {}", prose);
    assert!(!prose.contains("https://"), "link target leaked: {}", prose);
    assert!(!prose.contains("flow.png"), "image leaked: {}", prose);
    // The code macro's language parameter goes with its wrapper.
    assert!(!prose.contains("json"), "wrapper leaked: {}", prose);
    assert!(!prose.contains("\n\n\n"));
}

#[test]
fn only_verbatim_blocks_joins_with_blank_lines() {
    let raw = "<div><ac:plain-text-body>one</ac:plain-text-body></div>\
               <div><ac:plain-text-body> two </ac:plain-text-body></div>\
               <div><ac:plain-text-body>three</ac:plain-text-body></div>";
    let out = clean(raw);
    assert_eq!(out.as_string(), ["one", "two", "three"].join(FRAGMENT_SEPARATOR));
    assert_eq!(out.text().unwrap().prose(), None);
}

#[test]
fn only_prose_matches_plain_conversion() {
    let out = clean("<h3>Scope</h3><p>Top-ups only.</p>");
    assert_eq!(out.as_string(), "Scope\n\nTop-ups only.");
    assert!(out.text().unwrap().verbatim().is_empty());
}

#[test]
fn sibling_blocks_in_one_wrapper_both_survive() {
    let raw = "<div><ac:plain-text-body>a</ac:plain-text-body><ac:plain-text-body>b</ac:plain-text-body></div><p>c</p>";
    assert_eq!(clean(raw).as_string(), "a\n\nb\n\nc");
}

#[test]
fn unparseable_markup_does_not_panic() {
    for raw in ["<<<>>>", "<p", "</ac:plain-text-body>", "<![CDATA[", "<ac:plain-text-body>", "&&&;;"] {
        let out = clean(raw);
        assert!(
            matches!(out, Cleaned::Text(_) | Cleaned::EmptyResult),
            "unexpected outcome for {:?}: {:?}",
            raw,
            out
        );
    }
}

#[test]
fn empty_outcomes_are_distinguishable() {
    assert_eq!(clean("").into_result(), Err(CleanError::EmptyInput));
    assert_eq!(clean("<p></p>").into_result(), Err(CleanError::EmptyResult));
    assert_eq!(clean("<p>x</p>").into_result(), Ok("x".to_string()));
}

#[test]
fn cleaning_is_deterministic() {
    let raw = load_fixture("prd_page.html");
    let cleaner = Cleaner::builder().prose_style(ProseStyle::Markdown).build();
    assert_eq!(cleaner.clean(&raw), cleaner.clean(&raw));
    assert_eq!(clean(&raw), clean(&raw));
}
