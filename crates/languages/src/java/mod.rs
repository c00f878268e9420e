//! Java language front-end module

mod context;
mod declarations;
mod locate;
pub(crate) mod queries;
mod scope;
mod types;

#[cfg(test)]
mod tests;

use crate::qualified_name::{ScopeConfiguration, ScopePattern};
use crate::{Analyzer, LanguageDescriptor};
use context::JavaContext;
use copyqn_core::element::{CandidateDeclaration, SourceElement};
use copyqn_core::error::{Error, Result, ResultExt};
use std::path::Path;
use tracing::{debug, warn};
use tree_sitter::{Parser, Tree};

pub(crate) const LANGUAGE_NAME: &str = "java";

/// Scope patterns for Java qualified name building
const JAVA_SCOPE_PATTERNS: &[ScopePattern] = &[
    ScopePattern {
        node_kind: "class_declaration",
        field_name: "name",
    },
    ScopePattern {
        node_kind: "interface_declaration",
        field_name: "name",
    },
    ScopePattern {
        node_kind: "enum_declaration",
        field_name: "name",
    },
    ScopePattern {
        node_kind: "record_declaration",
        field_name: "name",
    },
    ScopePattern {
        node_kind: "annotation_type_declaration",
        field_name: "name",
    },
];

inventory::submit! {
    ScopeConfiguration {
        language: LANGUAGE_NAME,
        separator: ".",
        patterns: JAVA_SCOPE_PATTERNS,
        boundaries: &[
            "block",
            "constructor_body",
            "static_initializer",
            "object_creation_expression",
            "enum_constant",
        ],
    }
}

inventory::submit! {
    LanguageDescriptor {
        name: LANGUAGE_NAME,
        extensions: &["java"],
        factory: create_java_analyzer,
    }
}

fn create_java_analyzer() -> Result<Box<dyn Analyzer>> {
    Ok(Box::new(JavaAnalyzer))
}

/// Locates elements in Java compilation units
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaAnalyzer;

impl Analyzer for JavaAnalyzer {
    fn element_at(
        &self,
        source: &str,
        file_path: &Path,
        offset: usize,
    ) -> Result<Option<SourceElement>> {
        if offset > source.len() {
            return Err(Error::invalid_input(format!(
                "Offset {offset} is past the end of {} ({} bytes)",
                file_path.display(),
                source.len()
            )));
        }

        let tree = parse_java(source, file_path)?;
        let context = JavaContext::new(tree.root_node(), source);
        let element = context.element_at(offset);

        debug!(
            file = %file_path.display(),
            offset,
            kind = element.as_ref().map(|e| e.kind().to_string()).as_deref().unwrap_or("none"),
            "Located element under caret"
        );
        Ok(element)
    }

    fn top_level_declarations(
        &self,
        source: &str,
        file_path: &Path,
    ) -> Result<Vec<CandidateDeclaration>> {
        let tree = parse_java(source, file_path)?;
        let context = JavaContext::new(tree.root_node(), source);
        Ok(context.top_level_declarations())
    }
}

/// Parse a Java source file, tolerating syntax errors
fn parse_java(source: &str, file_path: &Path) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .context("Failed to load the Java grammar")?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| {
            Error::parse(file_path.display().to_string(), "Failed to parse source code")
        })?;

    if tree.root_node().has_error() {
        warn!(
            file = %file_path.display(),
            "Syntax errors in Java source, continuing with partial tree"
        );
    }
    Ok(tree)
}
