//! Language-agnostic utilities for element location
//!
//! These utilities work across all languages using tree-sitter.

use tree_sitter::{Node, Query, QueryMatch};

/// Find a capture node by name in a query match
pub fn find_capture_node<'a>(
    query_match: &'a QueryMatch,
    query: &'a Query,
    name: &str,
) -> Option<Node<'a>> {
    query_match.captures.iter().find_map(|capture| {
        let capture_name = query.capture_names().get(capture.index as usize)?;
        if *capture_name == name {
            Some(capture.node)
        } else {
            None
        }
    })
}

/// Named children that are not comments
///
/// Comments are extras in most grammars and can appear between any two
/// tokens, so counting arguments or parameters must skip them.
pub fn significant_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| !child.kind().ends_with("comment"))
        .collect();
    children
}

/// Iterate a node and its ancestors, innermost first
pub fn ancestors_inclusive(node: Node) -> impl Iterator<Item = Node> {
    std::iter::successors(Some(node), |n| n.parent())
}

/// Collapse whitespace in a type as written in source
///
/// Keeps a single space only where two words meet (`? extends T`,
/// `@NonNull String`) and after commas; drops it around brackets and dots.
pub fn normalize_type_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            if let Some(prev) = out.chars().last() {
                if is_spaced(prev) && is_spaced(c) {
                    out.push(' ');
                }
            }
            pending_space = false;
        }
        out.push(c);
        if c == ',' {
            out.push(' ');
        }
    }

    out
}

fn is_spaced(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '?' | '&')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_type_text() {
        assert_eq!(normalize_type_text("Map<String,List<Integer>>"), "Map<String, List<Integer>>");
        assert_eq!(normalize_type_text("int [ ]"), "int[]");
        assert_eq!(normalize_type_text("List<? extends\n   Number>"), "List<? extends Number>");
        assert_eq!(normalize_type_text("java . util . List"), "java.util.List");
        assert_eq!(normalize_type_text("@NonNull  String"), "@NonNull String");
        assert_eq!(normalize_type_text("T extends A & B"), "T extends A & B");
    }
}
