//! Qualified name building via Tree-sitter parent traversal

use tree_sitter::Node;

/// Configuration for extracting scope names from AST nodes
#[derive(Debug)]
pub struct ScopePattern {
    pub node_kind: &'static str,
    pub field_name: &'static str,
}

/// Language-specific scope configuration for qualified name building
///
/// Register this via inventory to add scope support for a new language
/// without modifying this module.
pub struct ScopeConfiguration {
    /// Language identifier (e.g., "java")
    pub language: &'static str,
    /// Separator between scope parts (e.g., "." for Java)
    pub separator: &'static str,
    /// Patterns for identifying scope containers in the AST
    pub patterns: &'static [ScopePattern],
    /// Node kinds that make everything inside them local
    pub boundaries: &'static [&'static str],
}

inventory::collect!(ScopeConfiguration);

/// Names of the scope containers enclosing a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopePath {
    /// Root-to-leaf scope names
    pub segments: Vec<String>,
    /// Whether the walk stopped at a local boundary (method body, anonymous class)
    pub is_local: bool,
    pub separator: &'static str,
}

impl ScopePath {
    /// Joined segments, e.g. `Outer.Inner`
    pub fn joined(&self) -> String {
        self.segments.join(self.separator)
    }
}

/// Build the scope path of a node by traversing its ancestors
///
/// The node itself is included when it is a scope container. The walk stops
/// at the first local boundary, so names inside method bodies are not
/// prefixed with their enclosing types.
pub fn build_scope_path_from_ast(node: Node, source: &str, language: &str) -> ScopePath {
    let mut scope_parts = Vec::new();
    let mut is_local = false;

    // Find configuration for this language via inventory lookup
    let config = inventory::iter::<ScopeConfiguration>().find(|config| config.language == language);

    let (patterns, boundaries, separator) = match config {
        Some(cfg) => (cfg.patterns, cfg.boundaries, cfg.separator),
        None => (&[] as &[ScopePattern], &[] as &[&str], "."),
    };

    // Walk up the tree collecting scope names
    let mut current = Some(node);
    while let Some(scope) = current {
        if boundaries.contains(&scope.kind()) {
            is_local = true;
            break;
        }

        if let Some(name) = extract_scope_name_generic(scope, source, patterns) {
            scope_parts.push(name);
        }

        current = scope.parent();
    }

    // Reverse to get root-to-leaf order
    scope_parts.reverse();
    ScopePath {
        segments: scope_parts,
        is_local,
        separator,
    }
}

/// Extract scope name using pattern configuration
fn extract_scope_name_generic(
    node: Node,
    source: &str,
    patterns: &[ScopePattern],
) -> Option<String> {
    for pattern in patterns {
        if node.kind() == pattern.node_kind {
            return node
                .child_by_field_name(pattern.field_name)
                .and_then(|n| n.utf8_text(source.as_bytes()).ok())
                .map(|s| s.to_string());
        }
    }
    None
}
