//! Integration tests for Java language support

use copyqn_core::caret::Caret;
use copyqn_core::resolver::ResolutionOrigin;
use copyqn_core::ElementKind;
use copyqn_languages::{create_analyzer, detect_language, supported_languages};
use std::path::Path;

const SOURCE: &str = r#"package pkg;

import java.util.List;

public class Foo {
    private List<String> names;

    public void add(int a, java.util.List<String> b) {
        names.addAll(b);
    }
}

class Bar {}
"#;

#[test]
fn test_java_analyzer_creation() {
    let result = create_analyzer(Path::new("Foo.java"));
    assert!(result.is_ok());
    assert!(result.unwrap().is_some());
}

#[test]
fn test_extension_is_case_insensitive() {
    assert_eq!(detect_language(Path::new("src/Legacy.JAVA")), Some("java"));
}

#[test]
fn test_unsupported_files() {
    assert!(create_analyzer(Path::new("notes.txt")).unwrap().is_none());
    assert!(create_analyzer(Path::new("Makefile")).unwrap().is_none());
    assert_eq!(detect_language(Path::new("main.rs")), None);
}

#[test]
fn test_java_is_registered() {
    assert!(supported_languages().contains(&"java"));
}

#[test]
fn test_resolve_method_at_line_and_column() {
    let analyzer = create_analyzer(Path::new("Foo.java"))
        .expect("Failed to create analyzer")
        .expect("No analyzer for .java");

    let offset = Caret::LineColumn {
        line: 8,
        column: 17,
    }
    .to_byte_offset(SOURCE)
    .expect("Caret is inside the file");

    let resolution = analyzer
        .resolve(SOURCE, Path::new("Foo.java"), Some(offset))
        .expect("Resolution should not fail")
        .expect("Method is resolvable");

    assert_eq!(resolution.qualified_name, "pkg.Foo#add(int, List)");
    assert_eq!(
        resolution.origin,
        ResolutionOrigin::Element(ElementKind::Method)
    );
}

#[test]
fn test_resolve_field() {
    let analyzer = create_analyzer(Path::new("Foo.java"))
        .expect("Failed to create analyzer")
        .expect("No analyzer for .java");

    let offset = SOURCE.find("names;").expect("Field is declared");
    let resolution = analyzer
        .resolve(SOURCE, Path::new("Foo.java"), Some(offset))
        .expect("Resolution should not fail")
        .expect("Field is resolvable");

    assert_eq!(resolution.qualified_name, "List<String>.names");
}

#[test]
fn test_resolve_without_caret_uses_public_type() {
    let analyzer = create_analyzer(Path::new("Foo.java"))
        .expect("Failed to create analyzer")
        .expect("No analyzer for .java");

    let resolution = analyzer
        .resolve(SOURCE, Path::new("Foo.java"), None)
        .expect("Resolution should not fail")
        .expect("File declares types");

    assert_eq!(resolution.qualified_name, "pkg.Foo");
    assert_eq!(resolution.origin, ResolutionOrigin::File);
}

#[test]
fn test_multibyte_source_offsets() {
    let source = "// héllo wörld\nclass Ünïcode {\n    int größe;\n}\n";
    let analyzer = create_analyzer(Path::new("Unicode.java"))
        .expect("Failed to create analyzer")
        .expect("No analyzer for .java");

    let char_offset = source
        .find("größe")
        .map(|byte| source[..byte].chars().count())
        .expect("Field is declared");
    let from_offset = Caret::Offset(char_offset)
        .to_byte_offset(source)
        .expect("Offset is inside the file");
    let from_line = Caret::LineColumn { line: 3, column: 9 }
        .to_byte_offset(source)
        .expect("Position is inside the file");
    assert_eq!(from_offset, from_line);

    let resolution = analyzer
        .resolve(source, Path::new("Unicode.java"), Some(from_offset))
        .expect("Resolution should not fail")
        .expect("Field is resolvable");
    assert_eq!(resolution.qualified_name, "int.größe");
}
