// ABOUTME: DOM manipulation and traversal utilities for wiki storage markup.
// ABOUTME: Provides helpers for locating, reading, and detaching nodes in scraper's document tree.

//! DOM utilities for markup document manipulation.
//!
//! Every mutating helper here follows the same shape: collect the matching
//! node ids first, then mutate the tree. Nothing detaches while a traversal
//! is still borrowing the tree.

pub mod cdata;

use ego_tree::{NodeId, NodeRef};
use scraper::{Html, Node};

/// Parse markup leniently into a fragment tree.
///
/// CDATA sections are escaped first so their contents survive as text.
/// Unknown or unclosed tags never fail the parse.
pub fn parse_markup(raw: &str) -> Html {
    Html::parse_fragment(&cdata::escape_cdata_sections(raw))
}

/// Returns true if the node is an element whose local name equals `name`
/// (ASCII case-insensitive).
pub fn is_element_named(node: &NodeRef<'_, Node>, name: &str) -> bool {
    node.value()
        .as_element()
        .is_some_and(|el| el.name().eq_ignore_ascii_case(name))
}

/// Ids of every element named `name`, in pre-order document order.
pub fn find_elements(html: &Html, name: &str) -> Vec<NodeId> {
    html.tree
        .root()
        .descendants()
        .filter(|node| is_element_named(node, name))
        .map(|node| node.id())
        .collect()
}

/// Concatenated text of a node and all its descendants.
pub fn node_text(node: NodeRef<'_, Node>) -> String {
    node.descendants()
        .filter_map(|n| n.value().as_text().map(|text| &**text))
        .collect()
}

/// The node to detach when removing a verbatim block: its parent wrapper,
/// or the block itself when it sits directly under the document root.
pub fn wrapper_of(html: &Html, id: NodeId) -> NodeId {
    let Some(node) = html.tree.get(id) else {
        return id;
    };
    let root_id = html.root_element().id();
    match node.parent() {
        Some(parent) if parent.id() != root_id && !is_document_level(&parent) => parent.id(),
        _ => id,
    }
}

fn is_document_level(node: &NodeRef<'_, Node>) -> bool {
    match node.value() {
        Node::Element(el) => matches!(el.name(), "html" | "body"),
        Node::Document | Node::Fragment => true,
        _ => false,
    }
}

/// Detach a node (and its subtree) from the tree. Detaching an already
/// detached node is a no-op.
pub fn detach(html: &mut Html, id: NodeId) {
    if let Some(mut node) = html.tree.get_mut(id) {
        node.detach();
    }
}

/// Remove every element named `name` together with its subtree.
pub fn remove_elements(html: &mut Html, name: &str) -> usize {
    let ids = find_elements(html, name);
    for id in &ids {
        detach(html, *id);
    }
    ids.len()
}

/// Replace every element named `name` with its children.
pub fn unwrap_elements(html: &mut Html, name: &str) -> usize {
    let ids = find_elements(html, name);
    for id in &ids {
        let children: Vec<NodeId> = match html.tree.get(*id) {
            Some(node) => node.children().map(|c| c.id()).collect(),
            None => continue,
        };
        if let Some(mut node) = html.tree.get_mut(*id) {
            for child in children {
                node.insert_id_before(child);
            }
        }
        detach(html, *id);
    }
    ids.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_namespaced_tags_in_document_order() {
        let html = parse_markup(
            "<ac:plain-text-body>a</ac:plain-text-body><p><ac:plain-text-body>b</ac:plain-text-body></p>",
        );
        let ids = find_elements(&html, "ac:plain-text-body");
        assert_eq!(ids.len(), 2);
        let texts: Vec<String> = ids
            .iter()
            .filter_map(|id| html.tree.get(*id))
            .map(node_text)
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn tag_match_ignores_case() {
        let html = parse_markup("<AC:PLAIN-TEXT-BODY>x</AC:PLAIN-TEXT-BODY>");
        assert_eq!(find_elements(&html, "ac:plain-text-body").len(), 1);
    }

    #[test]
    fn wrapper_is_parent_element() {
        let html = parse_markup("<div class=\"macro\"><ac:plain-text-body>x</ac:plain-text-body></div>");
        let id = find_elements(&html, "ac:plain-text-body")[0];
        let wrapper = wrapper_of(&html, id);
        let wrapper_node = html.tree.get(wrapper).unwrap();
        assert!(is_element_named(&wrapper_node, "div"));
    }

    #[test]
    fn top_level_block_is_its_own_wrapper() {
        let html = parse_markup("<ac:plain-text-body>x</ac:plain-text-body><p>keep</p>");
        let id = find_elements(&html, "ac:plain-text-body")[0];
        assert_eq!(wrapper_of(&html, id), id);
    }

    #[test]
    fn detach_removes_from_tree_and_is_idempotent() {
        let mut html = parse_markup("<div><span>gone</span></div><p>kept</p>");
        let id = find_elements(&html, "div")[0];
        detach(&mut html, id);
        detach(&mut html, id);
        assert!(find_elements(&html, "div").is_empty());
        let text = node_text(html.tree.root());
        assert_eq!(text, "kept");
    }

    #[test]
    fn unwrap_keeps_children_in_place() {
        let mut html = parse_markup("<p>see <a href=\"https://x.test\">the <b>docs</b></a> now</p>");
        assert_eq!(unwrap_elements(&mut html, "a"), 1);
        assert!(find_elements(&html, "a").is_empty());
        assert_eq!(node_text(html.tree.root()), "see the docs now");
        assert!(!html.root_element().inner_html().contains("href"));
    }

    #[test]
    fn remove_elements_drops_subtrees() {
        let mut html = parse_markup("<p>a<img src=\"x.png\" alt=\"pic\">b</p>");
        assert_eq!(remove_elements(&mut html, "img"), 1);
        assert!(!html.root_element().inner_html().contains("img"));
    }

    #[test]
    fn malformed_markup_still_parses() {
        let html = parse_markup("<p>open <b>bold <ac:macro <<>> text");
        let text = node_text(html.tree.root());
        assert!(text.contains("open"), "got: {}", text);
    }
}
