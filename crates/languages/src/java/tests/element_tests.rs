//! Tests for locating and naming the element under the caret

use super::*;
use copyqn_core::element::TypeRef;
use pretty_assertions::assert_eq;

#[test]
fn test_class_declaration_name() {
    let source = r#"
package com.example;

public class <caret>Widget {
}
"#;

    assert_eq!(element_name(source), Some("com.example.Widget".to_string()));
}

#[test]
fn test_nested_type_declaration_names() {
    let source = r#"
package com.example;

public class Outer {
    static class Middle {
        interface <caret>Inner {}
    }
}
"#;

    assert_eq!(
        element_name(source),
        Some("com.example.Outer.Middle.Inner".to_string())
    );
}

#[test]
fn test_default_package_type() {
    let source = "enum <caret>Color { RED, GREEN }";

    assert_eq!(element_name(source), Some("Color".to_string()));
}

#[test]
fn test_method_declaration_with_qualified_generic_parameter() {
    let source = r#"
package pkg;

public class Foo {
    public void <caret>add(int a, java.util.List<String> b) {
    }
}
"#;

    assert_eq!(element_name(source), Some("pkg.Foo#add(int, List)".to_string()));
}

#[test]
fn test_method_parameter_kinds() {
    let source = r#"
package pkg;

import java.util.Map;

class Store {
    <T> void <caret>put(T value, Map<String, T> index, byte[] raw, String... tags) {
    }
}
"#;

    let element = element_at(source).expect("Caret is on a method name");
    assert_eq!(
        element,
        SourceElement::method(
            "pkg.Store",
            "put",
            vec![
                TypeRef::type_variable("T"),
                TypeRef::declared("Map", "Map<String, T>"),
                TypeRef::array("byte[]"),
                TypeRef::array("String..."),
            ],
        )
    );
    assert_eq!(
        resolve_for_element(&element),
        Some("pkg.Store#put(T, Map, byte[], String...)".to_string())
    );
}

#[test]
fn test_method_without_parameters() {
    let source = r#"
package pkg;

class Task {
    void <caret>run() {}
}
"#;

    assert_eq!(element_name(source), Some("pkg.Task#run()".to_string()));
}

#[test]
fn test_caret_right_after_method_name() {
    let source = r#"
package pkg;

class Task {
    void run<caret>() {}
}
"#;

    assert_eq!(element_name(source), Some("pkg.Task#run()".to_string()));
}

#[test]
fn test_constructor_declaration() {
    let source = r#"
package pkg;

public class Point {
    public <caret>Point(int x, String label, int[] extra) {
    }
}
"#;

    assert_eq!(
        element_name(source),
        Some("pkg.Point(int, String, int[])".to_string())
    );
}

#[test]
fn test_record_compact_constructor_uses_components() {
    let source = r#"
package geo;

public record Range(int low, int high) {
    public <caret>Range {
    }
}
"#;

    assert_eq!(element_name(source), Some("geo.Range(int, int)".to_string()));
}

#[test]
fn test_field_declaration_keeps_source_type() {
    let source = r#"
package pkg;

import java.util.Map;

class Counter {
    private final Map<String,   Integer> <caret>counts = null;
}
"#;

    assert_eq!(
        element_name(source),
        Some("Map<String, Integer>.counts".to_string())
    );
}

#[test]
fn test_field_with_declarator_dimensions() {
    let source = r#"
class Grid {
    int <caret>cells[];
}
"#;

    assert_eq!(element_name(source), Some("int[].cells".to_string()));
}

#[test]
fn test_interface_constant() {
    let source = r#"
interface Limits {
    long <caret>MAX = 10L;
}
"#;

    assert_eq!(element_name(source), Some("long.MAX".to_string()));
}

#[test]
fn test_enum_constant_declaration() {
    let source = r#"
package pkg;

enum Color {
    RED, <caret>GREEN
}
"#;

    assert_eq!(element_name(source), Some("Color.GREEN".to_string()));
}

#[test]
fn test_local_variable_use() {
    let source = r#"
class Calc {
    int twice(int x) {
        int y = x * 2;
        return <caret>y;
    }
}
"#;

    assert_eq!(element_name(source), Some("int.y".to_string()));
}

#[test]
fn test_parameter_use() {
    let source = r#"
class Calc {
    int twice(int x) {
        int y = <caret>x * 2;
        return y;
    }
}
"#;

    assert_eq!(element_name(source), Some("int.x".to_string()));
}

#[test]
fn test_local_shadows_field() {
    let source = r#"
class Shadow {
    String value;

    void show() {
        int value = 1;
        System.out.println(<caret>value);
    }
}
"#;

    assert_eq!(element_name(source), Some("int.value".to_string()));
}

#[test]
fn test_field_use_without_qualifier() {
    let source = r#"
class Shadow {
    String value;

    void show() {
        System.out.println(<caret>value);
    }
}
"#;

    assert_eq!(element_name(source), Some("String.value".to_string()));
}

#[test]
fn test_this_field_access() {
    let source = r#"
class Account {
    private long balance;

    void reset() {
        this.<caret>balance = 0;
    }
}
"#;

    assert_eq!(element_name(source), Some("long.balance".to_string()));
}

#[test]
fn test_enhanced_for_variable() {
    let source = r#"
import java.util.List;

class Loop {
    void each(List<String> items) {
        for (String item : items) {
            System.out.println(<caret>item);
        }
    }
}
"#;

    assert_eq!(element_name(source), Some("String.item".to_string()));
}

#[test]
fn test_catch_parameter() {
    let source = r#"
import java.io.IOException;

class Reader {
    void read() {
        try {
            open();
        } catch (IOException <caret>e) {
        }
    }
}
"#;

    assert_eq!(element_name(source), Some("IOException.e".to_string()));
}

#[test]
fn test_var_local_with_constructor_initializer() {
    let source = r#"
import java.util.ArrayList;

class Builder {
    void build() {
        var <caret>names = new ArrayList<String>();
    }
}
"#;

    assert_eq!(element_name(source), Some("ArrayList<String>.names".to_string()));
}

#[test]
fn test_var_local_without_visible_type_is_other() {
    let source = r#"
class Builder {
    void build() {
        var <caret>count = compute();
    }
}
"#;

    assert_eq!(element_at(source), Some(SourceElement::Other));
}

#[test]
fn test_untyped_lambda_parameter_is_other() {
    let source = r#"
class Lambdas {
    Runnable make() {
        return java.util.List.of(1).forEach(<caret>n -> {});
    }
}
"#;

    assert_eq!(element_at(source), Some(SourceElement::Other));
}

#[test]
fn test_imported_type_usage() {
    let source = r#"
package pkg;

import java.util.List;

class Holder {
    <caret>List<String> items;
}
"#;

    assert_eq!(element_name(source), Some("java.util.List".to_string()));
}

#[test]
fn test_java_lang_type_usage() {
    let source = r#"
package pkg;

class Holder {
    <caret>String name;
}
"#;

    assert_eq!(element_name(source), Some("java.lang.String".to_string()));
}

#[test]
fn test_unknown_type_assumed_in_same_package() {
    let source = r#"
package pkg;

class Holder {
    <caret>Widget widget;
}
"#;

    assert_eq!(element_name(source), Some("pkg.Widget".to_string()));
}

#[test]
fn test_nested_type_usage() {
    let source = r#"
package pkg;

class Outer {
    static class Inner {}

    <caret>Inner inner;
}
"#;

    assert_eq!(element_name(source), Some("pkg.Outer.Inner".to_string()));
}

#[test]
fn test_qualified_type_usage() {
    let source = r#"
class Holder {
    java.util.<caret>Map<String, String> map;
}
"#;

    assert_eq!(element_name(source), Some("java.util.Map".to_string()));
}

#[test]
fn test_type_variable_usage_is_other() {
    let source = r#"
class Box<T> {
    <caret>T value;
}
"#;

    assert_eq!(element_at(source), Some(SourceElement::Other));
}

#[test]
fn test_static_receiver_type() {
    let source = r#"
class Numbers {
    int biggest(int a, int b) {
        return <caret>Math.max(a, b);
    }
}
"#;

    assert_eq!(element_name(source), Some("java.lang.Math".to_string()));
}

#[test]
fn test_import_declaration_segments() {
    let type_segment = r#"
package pkg;

import java.util.<caret>List;

class Holder {}
"#;
    let package_segment = r#"
package pkg;

import java.<caret>util.List;

class Holder {}
"#;

    assert_eq!(element_name(type_segment), Some("java.util.List".to_string()));
    assert_eq!(element_at(package_segment), Some(SourceElement::Other));
}

#[test]
fn test_package_declaration_falls_back_to_file() {
    let source = r#"
package com.<caret>example;

public class App {}
"#;

    assert_eq!(element_at(source), Some(SourceElement::Other));
    assert_eq!(resolved_name(source), Some("com.example.App".to_string()));
}

#[test]
fn test_unqualified_method_invocation() {
    let source = r#"
package pkg;

class Adder {
    int add(int a, int b) {
        return a + b;
    }

    int add(int a, int b, int c) {
        return <caret>add(a, b) + c;
    }
}
"#;

    assert_eq!(element_name(source), Some("pkg.Adder#add(int, int)".to_string()));
}

#[test]
fn test_varargs_invocation_arity() {
    let source = r#"
package pkg;

class Logger {
    void log(String message) {}

    void log(String format, Object... args) {}

    void run() {
        <caret>log("{} {}", 1, 2);
    }
}
"#;

    assert_eq!(
        element_name(source),
        Some("pkg.Logger#log(String, Object...)".to_string())
    );
}

#[test]
fn test_invocation_on_typed_variable() {
    let source = r#"
package pkg;

class Helper {
    void help(String topic) {}
}

class User {
    void ask() {
        Helper helper = new Helper();
        helper.<caret>help("rust");
    }
}
"#;

    assert_eq!(element_name(source), Some("pkg.Helper#help(String)".to_string()));
}

#[test]
fn test_invocation_of_unknown_method_falls_back_to_file() {
    let source = r#"
package pkg;

public class Printer {
    void print() {
        System.out.<caret>println("hi");
    }
}
"#;

    assert_eq!(element_at(source), Some(SourceElement::Other));
    assert_eq!(resolved_name(source), Some("pkg.Printer".to_string()));
}

#[test]
fn test_method_reference_on_this() {
    let source = r#"
package p;

class A {
    void g(String value) {}

    void run(java.util.List<String> values) {
        values.forEach(this::<caret>g);
    }
}
"#;

    assert_eq!(element_name(source), Some("p.A#g(String)".to_string()));
}

#[test]
fn test_method_reference_on_type() {
    let source = r#"
package p;

class Parser {
    static int parse(String text) {
        return 0;
    }
}

class User {
    void run(java.util.List<String> values) {
        values.stream().map(Parser::<caret>parse);
    }
}
"#;

    assert_eq!(element_name(source), Some("p.Parser#parse(String)".to_string()));
}

#[test]
fn test_method_reference_to_other_file_falls_back_to_file() {
    let source = r#"
package p;

public class Printer {
    void run(java.util.List<String> values) {
        values.forEach(System.out::<caret>println);
    }
}
"#;

    assert_eq!(element_at(source), Some(SourceElement::Other));
    assert_eq!(resolved_name(source), Some("p.Printer".to_string()));
}

#[test]
fn test_object_creation_resolves_constructor() {
    let source = r#"
package pkg;

class Point {
    Point() {}

    Point(int x, int y) {}
}

class Factory {
    Point origin() {
        return <caret>new Point(0, 0);
    }
}
"#;

    assert_eq!(element_name(source), Some("pkg.Point(int, int)".to_string()));
}

#[test]
fn test_object_creation_of_class_without_constructors() {
    let source = r#"
package pkg;

class Plain {}

class Factory {
    Plain make() {
        return <caret>new Plain();
    }
}
"#;

    assert_eq!(element_name(source), Some("pkg.Plain()".to_string()));
}

#[test]
fn test_explicit_this_constructor_call() {
    let source = r#"
package pkg;

class Span {
    Span(int start, int end) {}

    Span(int start) {
        <caret>this(start, start);
    }
}
"#;

    assert_eq!(element_name(source), Some("pkg.Span(int, int)".to_string()));
}

#[test]
fn test_anonymous_class_method_has_empty_enclosing_name() {
    let source = r#"
package pkg;

class Scheduler {
    Runnable task = new Runnable() {
        public void <caret>run() {}
    };
}
"#;

    assert_eq!(element_name(source), Some("#run()".to_string()));
}

#[test]
fn test_local_class_uses_simple_name() {
    let source = r#"
package pkg;

class Host {
    void work() {
        class <caret>Step {}
    }
}
"#;

    assert_eq!(element_name(source), Some("Step".to_string()));
}

#[test]
fn test_caret_in_method_body_falls_back_to_public_type() {
    let source = r#"
package pkg;

class Helper {}

public class Main {
    void run() {
        <caret>
    }
}
"#;

    assert_eq!(element_at(source), Some(SourceElement::Other));
    assert_eq!(resolved_name(source), Some("pkg.Main".to_string()));
}

#[test]
fn test_caret_between_members_names_enclosing_type() {
    let source = r#"
package pkg;

class Members {
    int a;
<caret>
    int b;
}
"#;

    assert_eq!(element_name(source), Some("pkg.Members".to_string()));
}

#[test]
fn test_caret_on_field_type_keyword_names_field() {
    let source = r#"
class Members {
    <caret>int count;
}
"#;

    assert_eq!(element_name(source), Some("int.count".to_string()));
}

#[test]
fn test_caret_outside_declarations() {
    let source = "<caret>\n\npackage pkg;\n\nclass A {}\n";

    assert_eq!(element_at(source), None);
}

#[test]
fn test_caret_at_end_of_file() {
    let source = "class Last {}\n<caret>";

    assert_eq!(element_at(source), None);
    assert_eq!(resolved_name(source), Some("Last".to_string()));
}

#[test]
fn test_offset_past_end_is_error() {
    let result = JavaAnalyzer.element_at("class A {}", Path::new("A.java"), 100);

    assert!(result.is_err());
}

#[test]
fn test_syntax_errors_are_tolerated() {
    let source = r#"
package pkg;

public class Broken {
    void <caret>ok() {}

    void bad( {
}
"#;

    let (plain, offset) = split_caret(source);
    let result = JavaAnalyzer.resolve(&plain, Path::new("Broken.java"), Some(offset));

    assert!(result.is_ok());
}
