//! Tree-sitter queries for Java source files

/// Query for the compilation unit header: package and imports
pub(crate) const FILE_HEADER_QUERY: &str = r#"
    (package_declaration) @package

    (import_declaration) @import
"#;
