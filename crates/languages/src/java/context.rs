//! Per-file state shared by the Java lookups

use crate::common::find_capture_node;
use std::collections::HashMap;
use std::sync::OnceLock;
use streaming_iterator::StreamingIterator;
use tracing::debug;
use tree_sitter::{Node, Query, QueryCursor};

use super::queries::FILE_HEADER_QUERY;

/// Cached tree-sitter query for package and import extraction
static FILE_HEADER: OnceLock<Option<Query>> = OnceLock::new();

/// Get or initialize the cached file header query
fn file_header_query() -> Option<&'static Query> {
    FILE_HEADER
        .get_or_init(|| {
            let language = tree_sitter_java::LANGUAGE.into();
            Query::new(&language, FILE_HEADER_QUERY).ok()
        })
        .as_ref()
}

/// One parsed compilation unit together with its package and imports
pub(crate) struct JavaContext<'a> {
    pub(crate) source: &'a str,
    pub(crate) root: Node<'a>,
    pub(crate) package: Option<String>,
    /// Single-type imports: simple name to qualified name
    imports: HashMap<String, String>,
}

impl<'a> JavaContext<'a> {
    pub(crate) fn new(root: Node<'a>, source: &'a str) -> Self {
        let mut package = None;
        let mut imports = HashMap::new();

        if let Some(query) = file_header_query() {
            let mut cursor = QueryCursor::new();
            let mut matches = cursor.matches(query, root, source.as_bytes());

            while let Some(query_match) = matches.next() {
                if let Some(node) = find_capture_node(query_match, query, "package") {
                    package = dotted_name(node, source);
                }
                if let Some(node) = find_capture_node(query_match, query, "import") {
                    let is_static = has_child_kind(node, "static");
                    let is_on_demand = has_child_kind(node, "asterisk");
                    if is_static || is_on_demand {
                        continue;
                    }
                    if let Some(path) = dotted_name(node, source) {
                        let simple = path.rsplit('.').next().unwrap_or(&path).to_string();
                        imports.insert(simple, path);
                    }
                }
            }
        }

        debug!(
            package = package.as_deref().unwrap_or("<default>"),
            imports = imports.len(),
            "Parsed Java file header"
        );

        Self {
            source,
            root,
            package,
            imports,
        }
    }

    /// Source text of a node
    pub(crate) fn text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Qualified name of a top-level name in this file's package
    pub(crate) fn qualify(&self, name: &str) -> String {
        match &self.package {
            Some(package) => format!("{package}.{name}"),
            None => name.to_string(),
        }
    }

    /// Qualified name brought in by a single-type import
    pub(crate) fn imported(&self, simple_name: &str) -> Option<&str> {
        self.imports.get(simple_name).map(String::as_str)
    }
}

/// Text of the dotted name inside a package or import declaration
fn dotted_name(declaration: Node, source: &str) -> Option<String> {
    let mut cursor = declaration.walk();
    let name = declaration
        .named_children(&mut cursor)
        .find(|child| matches!(child.kind(), "scoped_identifier" | "identifier"))?;
    name.utf8_text(source.as_bytes())
        .ok()
        .map(|text| text.split_whitespace().collect())
}

fn has_child_kind(node: Node, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| child.kind() == kind);
    found
}
