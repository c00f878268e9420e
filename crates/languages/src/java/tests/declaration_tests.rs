//! Tests for top-level declaration listing and file-level fallback

use super::*;
use copyqn_core::element::CandidateDeclaration;
use pretty_assertions::assert_eq;

fn declarations(source: &str) -> Vec<CandidateDeclaration> {
    JavaAnalyzer
        .top_level_declarations(source, Path::new("Test.java"))
        .expect("Listing declarations should not fail")
}

#[test]
fn test_top_level_declarations_in_file_order() {
    let source = r#"
package com.example;

import java.util.List;

class Helper {}

public interface Service {}

enum Mode { ON, OFF }

record Pair(int a, int b) {}

@interface Marker {}
"#;

    assert_eq!(
        declarations(source),
        vec![
            CandidateDeclaration::new("com.example.Helper", false),
            CandidateDeclaration::new("com.example.Service", true),
            CandidateDeclaration::new("com.example.Mode", false),
            CandidateDeclaration::new("com.example.Pair", false),
            CandidateDeclaration::new("com.example.Marker", false),
        ]
    );
}

#[test]
fn test_nested_types_are_not_top_level() {
    let source = r#"
public class Outer {
    public static class Inner {}
}
"#;

    assert_eq!(
        declarations(source),
        vec![CandidateDeclaration::new("Outer", true)]
    );
}

#[test]
fn test_public_modifier_among_annotations() {
    let source = r#"
package pkg;

@Deprecated
final public class Legacy {}
"#;

    assert_eq!(
        declarations(source),
        vec![CandidateDeclaration::new("pkg.Legacy", true)]
    );
}

#[test]
fn test_file_without_declarations() {
    let source = "package pkg;\n\nimport java.util.List;\n";

    assert_eq!(declarations(source), Vec::new());
    assert_eq!(
        JavaAnalyzer
            .resolve(source, Path::new("package-info.java"), None)
            .expect("Resolution should not fail"),
        None
    );
}

#[test]
fn test_no_caret_uses_first_public_declaration() {
    let source = r#"
package pkg;

class First {}

public class Second {}
"#;

    let resolution = JavaAnalyzer
        .resolve(source, Path::new("Second.java"), None)
        .expect("Resolution should not fail")
        .expect("File has declarations");

    assert_eq!(resolution.qualified_name, "pkg.Second");
}

#[test]
fn test_no_public_declaration_uses_first() {
    let source = r#"
package pkg;

class First {}

class Second {}
"#;

    let resolution = JavaAnalyzer
        .resolve(source, Path::new("First.java"), None)
        .expect("Resolution should not fail")
        .expect("File has declarations");

    assert_eq!(resolution.qualified_name, "pkg.First");
}

#[test]
fn test_element_takes_precedence_over_file() {
    let source = r#"
package pkg;

public class Main {}

class <caret>Other {}
"#;

    assert_eq!(resolved_name(source), Some("pkg.Other".to_string()));
}
