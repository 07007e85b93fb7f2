// ABOUTME: Prose converters for the markup left after verbatim extraction.
// ABOUTME: Renders a document tree as tag-free plain text or as Markdown via htmd.

//! Prose conversion module.
//!
//! Both renderers drop link targets and images entirely and never wrap
//! lines; the output is a single reflowable stream.

use ego_tree::NodeRef;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Node};

use crate::dom;
use crate::options::DEFAULT_SKIP_TAGS;

static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

// Elements separated from their neighbours by a blank line.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "dl",
    "div",
    "fieldset",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "ul",
    "ac:layout",
    "ac:layout-section",
    "ac:layout-cell",
    "ac:rich-text-body",
    "ac:structured-macro",
    "ac:task-list",
];

// Elements that start on a new line without a blank line.
const LINE_TAGS: &[&str] = &["li", "tr", "dt", "dd", "caption", "ac:task"];

const CELL_TAGS: &[&str] = &["td", "th"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Break {
    None,
    Line,
    Paragraph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Inline,
    Line,
    Block,
    Cell,
}

fn layout_of(name: &str) -> Layout {
    if BLOCK_TAGS.contains(&name) {
        Layout::Block
    } else if LINE_TAGS.contains(&name) {
        Layout::Line
    } else if CELL_TAGS.contains(&name) {
        Layout::Cell
    } else {
        Layout::Inline
    }
}

fn is_list(name: &str) -> bool {
    name == "ul" || name == "ol"
}

/// Collapse more than 2 consecutive newlines to exactly 2.
fn collapse_blank_lines_to_two(text: &str) -> String {
    BLANK_LINES_RE.replace_all(text, "\n\n").to_string()
}

/// Strip trailing whitespace from every line, collapse blank runs, and trim.
fn tidy(text: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    collapse_blank_lines_to_two(&lines.join("\n"))
        .trim()
        .to_string()
}

struct TextWriter<'a> {
    out: String,
    pending: Break,
    pre_depth: usize,
    list_depth: usize,
    cell_depth: usize,
    after_marker: bool,
    marker_at: usize,
    skip_tags: &'a [String],
}

impl<'a> TextWriter<'a> {
    fn new(skip_tags: &'a [String]) -> Self {
        Self {
            out: String::new(),
            pending: Break::None,
            pre_depth: 0,
            list_depth: 0,
            cell_depth: 0,
            after_marker: false,
            marker_at: 0,
            skip_tags,
        }
    }

    fn at_line_start(&self) -> bool {
        self.out.is_empty() || self.out.ends_with('\n')
    }

    fn trim_trailing_spaces(&mut self) {
        let trimmed = self.out.trim_end_matches([' ', '\t']).len();
        self.out.truncate(trimmed);
    }

    fn push_space(&mut self) {
        if self.pending == Break::None && !self.at_line_start() && !self.out.ends_with(' ') {
            self.out.push(' ');
        }
    }

    fn request(&mut self, brk: Break) {
        // Table cells stay on their row.
        if self.cell_depth > 0 {
            self.push_space();
            return;
        }
        // A list marker keeps its item's first block on the same line.
        if self.after_marker && brk == Break::Paragraph {
            return;
        }
        if brk > self.pending {
            self.pending = brk;
        }
    }

    fn flush_break(&mut self) {
        if self.pending == Break::None {
            return;
        }
        self.trim_trailing_spaces();
        if !self.out.is_empty() {
            let want = match self.pending {
                Break::Paragraph => 2,
                _ => 1,
            };
            let have = self.out.chars().rev().take_while(|c| *c == '\n').count();
            for _ in have..want {
                self.out.push('\n');
            }
        }
        self.pending = Break::None;
    }

    fn push_raw(&mut self, s: &str) {
        self.flush_break();
        self.out.push_str(s);
    }

    fn push_text(&mut self, s: &str) {
        if self.pre_depth > 0 {
            self.after_marker = false;
            self.push_raw(s);
            return;
        }

        let words: Vec<&str> = s.split_whitespace().collect();
        if words.is_empty() {
            if !s.is_empty() {
                self.push_space();
            }
            return;
        }

        self.after_marker = false;
        self.flush_break();
        if s.starts_with(char::is_whitespace) && !self.at_line_start() && !self.out.ends_with(' ')
        {
            self.out.push(' ');
        }
        self.out.push_str(&words.join(" "));
        if s.ends_with(char::is_whitespace) {
            self.out.push(' ');
        }
    }

    fn hard_break(&mut self) {
        if self.cell_depth > 0 {
            return self.push_space();
        }
        self.flush_break();
        self.trim_trailing_spaces();
        self.out.push('\n');
    }

    /// Finish a list item: drop a marker that never got content and keep
    /// the next item one line below.
    fn close_item(&mut self) {
        if self.after_marker {
            self.out.truncate(self.marker_at);
            self.after_marker = false;
        }
        if self.pending == Break::Paragraph {
            self.pending = Break::Line;
        }
    }

    fn is_skipped(&self, name: &str) -> bool {
        self.skip_tags.iter().any(|t| t.eq_ignore_ascii_case(name))
    }

    fn walk(&mut self, node: NodeRef<'_, Node>) {
        match node.value() {
            Node::Text(text) => self.push_text(text),
            Node::Element(el) => {
                let name = el.name().to_ascii_lowercase();
                if self.is_skipped(&name) {
                    return;
                }
                match name.as_str() {
                    "br" => return self.hard_break(),
                    "img" => return,
                    "hr" => return self.request(Break::Paragraph),
                    _ => {}
                }

                let nested_list = is_list(&name) && self.list_depth > 0;
                let layout = if nested_list {
                    Layout::Line
                } else {
                    layout_of(&name)
                };

                match layout {
                    Layout::Block => self.request(Break::Paragraph),
                    Layout::Line => self.request(Break::Line),
                    Layout::Cell => {
                        let follows_cell = node
                            .prev_siblings()
                            .filter_map(|s| s.value().as_element())
                            .any(|s| CELL_TAGS.contains(&s.name()));
                        if follows_cell {
                            self.trim_trailing_spaces();
                            self.push_raw(" | ");
                        }
                    }
                    Layout::Inline => {}
                }

                if name == "li" {
                    let indent = "  ".repeat(self.list_depth.saturating_sub(1));
                    self.flush_break();
                    self.marker_at = self.out.len();
                    self.out.push_str(&format!("{}* ", indent));
                    self.after_marker = true;
                }

                let is_pre = name == "pre";
                if is_pre {
                    self.pre_depth += 1;
                }
                if is_list(&name) {
                    self.list_depth += 1;
                }
                if layout == Layout::Cell {
                    self.cell_depth += 1;
                }

                for child in node.children() {
                    self.walk(child);
                }

                if layout == Layout::Cell {
                    self.cell_depth -= 1;
                }
                if is_list(&name) {
                    self.list_depth -= 1;
                }
                if name == "li" {
                    self.close_item();
                }
                if is_pre {
                    self.pre_depth -= 1;
                }

                match layout {
                    Layout::Block => self.request(Break::Paragraph),
                    Layout::Line => self.request(Break::Line),
                    _ => {}
                }
            }
            Node::Document | Node::Fragment => {
                for child in node.children() {
                    self.walk(child);
                }
            }
            _ => {}
        }
    }
}

/// Render a document tree as plain text.
///
/// Tags are stripped, link text is kept without its target, images are
/// dropped, and blocks are separated by blank lines. Elements listed in
/// `skip_tags` contribute nothing.
pub fn render_text(root: NodeRef<'_, Node>, skip_tags: &[String]) -> String {
    let mut writer = TextWriter::new(skip_tags);
    writer.walk(root);
    tidy(&writer.out)
}

/// Render a fragment tree as Markdown using htmd.
///
/// Links are unwrapped to their text and images removed before conversion.
/// If htmd fails the plain-text rendering is returned instead.
pub fn render_markdown(html: &mut Html, skip_tags: &[String]) -> String {
    dom::unwrap_elements(html, "a");
    dom::remove_elements(html, "img");
    for tag in skip_tags {
        dom::remove_elements(html, tag);
    }

    let source = html.root_element().inner_html();
    let converter = htmd::HtmlToMarkdown::builder()
        .skip_tags(DEFAULT_SKIP_TAGS.to_vec())
        .build();

    match converter.convert(&source) {
        Ok(md) => tidy(&md),
        Err(err) => {
            tracing::debug!(error = %err, "markdown conversion failed, using plain text");
            render_text(html.tree.root(), skip_tags)
        }
    }
}
