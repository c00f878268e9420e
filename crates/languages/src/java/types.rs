//! Type names: resolution to qualified names and parameter classification

use copyqn_core::element::{SourceElement, TypeRef};
use tree_sitter::Node;

use super::context::JavaContext;
use crate::common::{ancestors_inclusive, normalize_type_text, significant_children};

/// Types of `java.lang` that need no import
const JAVA_LANG_TYPES: &[&str] = &[
    "AssertionError",
    "AutoCloseable",
    "Boolean",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "ClassCastException",
    "ClassLoader",
    "CloneNotSupportedException",
    "Cloneable",
    "Comparable",
    "Deprecated",
    "Double",
    "Enum",
    "Error",
    "Exception",
    "Float",
    "FunctionalInterface",
    "IllegalArgumentException",
    "IllegalStateException",
    "IndexOutOfBoundsException",
    "Integer",
    "InterruptedException",
    "Iterable",
    "Long",
    "Math",
    "NullPointerException",
    "Number",
    "NumberFormatException",
    "Object",
    "OutOfMemoryError",
    "Override",
    "Process",
    "Record",
    "Runnable",
    "Runtime",
    "RuntimeException",
    "SafeVarargs",
    "SecurityException",
    "Short",
    "StackOverflowError",
    "String",
    "StringBuffer",
    "StringBuilder",
    "SuppressWarnings",
    "System",
    "Thread",
    "ThreadLocal",
    "Throwable",
    "UnsupportedOperationException",
    "Void",
];

/// Declarations that can introduce type parameters
const GENERIC_DECLARATION_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "record_declaration",
    "method_declaration",
    "constructor_declaration",
];

/// What a simple type name refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeLookup {
    /// A class, interface, enum, record or annotation type
    Type(String),
    /// A type parameter in scope
    TypeVariable,
}

pub(crate) fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Qualified name of an already absolute dotted path
///
/// The path names a type only when its last segment looks like one;
/// otherwise it is a package or a member.
pub(crate) fn absolute_type_path(names: &[&str]) -> SourceElement {
    match names.last() {
        Some(last) if starts_uppercase(last) => SourceElement::type_element(names.join(".")),
        _ => SourceElement::Other,
    }
}

/// Identifier and type identifier segments of a dotted name, in order
pub(crate) fn path_segments(node: Node) -> Vec<Node> {
    match node.kind() {
        "identifier" | "type_identifier" => vec![node],
        "scoped_type_identifier" | "scoped_identifier" | "generic_type" => {
            significant_children(node)
                .into_iter()
                .flat_map(path_segments)
                .collect()
        }
        _ => Vec::new(),
    }
}

impl<'a> JavaContext<'a> {
    /// Look a simple type name up from `at`, without guessing
    pub(crate) fn lookup_type_name(&self, name: &str, at: Node<'a>) -> Option<TypeLookup> {
        if self.is_type_variable(name, at) {
            return Some(TypeLookup::TypeVariable);
        }
        if let Some(decl) = self.visible_type_declaration(name, at) {
            return Some(TypeLookup::Type(self.type_qualified_name(decl)));
        }
        if let Some(imported) = self.imported(name) {
            return Some(TypeLookup::Type(imported.to_string()));
        }
        if JAVA_LANG_TYPES.contains(&name) {
            return Some(TypeLookup::Type(format!("java.lang.{name}")));
        }
        None
    }

    /// Resolve a simple type name, assuming the file's package when unknown
    pub(crate) fn resolve_type_name(&self, name: &str, at: Node<'a>) -> TypeLookup {
        self.lookup_type_name(name, at)
            .unwrap_or_else(|| TypeLookup::Type(self.qualify(name)))
    }

    /// Element named by a dotted path such as `Outer.Inner` or `java.util.List`
    pub(crate) fn resolve_dotted(&self, names: &[&str], at: Node<'a>) -> SourceElement {
        let Some((first, rest)) = names.split_first() else {
            return SourceElement::Other;
        };

        let base = match self.lookup_type_name(first, at) {
            Some(TypeLookup::Type(qualified_name)) => qualified_name,
            Some(TypeLookup::TypeVariable) => return SourceElement::Other,
            None if starts_uppercase(first) => self.qualify(first),
            None => return absolute_type_path(names),
        };

        let mut qualified_name = base;
        for segment in rest {
            qualified_name.push('.');
            qualified_name.push_str(segment);
        }
        SourceElement::type_element(qualified_name)
    }

    /// Whether `name` is a type parameter of a declaration enclosing `at`
    fn is_type_variable(&self, name: &str, at: Node<'a>) -> bool {
        ancestors_inclusive(at)
            .filter(|node| GENERIC_DECLARATION_KINDS.contains(&node.kind()))
            .filter_map(|node| node.child_by_field_name("type_parameters"))
            .flat_map(significant_children)
            .filter(|param| param.kind() == "type_parameter")
            .filter_map(|param| {
                significant_children(param)
                    .into_iter()
                    .find(|child| matches!(child.kind(), "type_identifier" | "identifier"))
            })
            .any(|param_name| self.text(param_name) == name)
    }

    /// Classify a parameter's type for rendering in a parameter list
    ///
    /// `dimensions` holds brackets written after the parameter name
    /// (`String args[]`); `is_varargs` marks a `T...` parameter.
    pub(crate) fn type_ref(&self, type_node: Node<'a>, dimensions: &str, is_varargs: bool) -> TypeRef {
        let text = normalize_type_text(self.text(type_node));
        if is_varargs {
            return TypeRef::array(format!("{text}{dimensions}..."));
        }
        if !dimensions.is_empty() {
            return TypeRef::array(format!("{text}{dimensions}"));
        }

        let type_node = unannotated(type_node);
        match type_node.kind() {
            "integral_type" | "floating_point_type" | "boolean_type" | "void_type" => {
                TypeRef::primitive(text)
            }
            "array_type" => TypeRef::array(text),
            "type_identifier" if self.is_type_variable(self.text(type_node), type_node) => {
                TypeRef::type_variable(text)
            }
            _ => match self.simple_type_name(type_node) {
                Some(simple_name) => TypeRef::declared(simple_name, text),
                None => TypeRef::declared(text.clone(), text),
            },
        }
    }

    /// Simple name of a class type: last identifier, type arguments dropped
    pub(crate) fn simple_type_name(&self, type_node: Node<'a>) -> Option<&'a str> {
        let type_node = unannotated(type_node);
        match type_node.kind() {
            "type_identifier" => Some(self.text(type_node)),
            "scoped_type_identifier" => significant_children(type_node)
                .into_iter()
                .rev()
                .find(|child| child.kind() == "type_identifier")
                .map(|child| self.text(child)),
            "generic_type" => type_node
                .named_child(0)
                .and_then(|base| self.simple_type_name(base)),
            _ => None,
        }
    }

    /// Declaration in this file of the class type written at `type_node`
    pub(crate) fn type_declaration_for(&self, type_node: Node<'a>) -> Option<Node<'a>> {
        let type_node = unannotated(type_node);
        let resolved = match type_node.kind() {
            "type_identifier" => match self.lookup_type_name(self.text(type_node), type_node)? {
                TypeLookup::Type(qualified_name) => qualified_name,
                TypeLookup::TypeVariable => return None,
            },
            "scoped_type_identifier" => {
                let names: Vec<&str> = path_segments(type_node)
                    .into_iter()
                    .map(|segment| self.text(segment))
                    .collect();
                match self.resolve_dotted(&names, type_node) {
                    SourceElement::Type { qualified_name } => qualified_name,
                    _ => return None,
                }
            }
            "generic_type" => return self.type_declaration_for(type_node.named_child(0)?),
            _ => return None,
        };
        self.type_declaration_named(&resolved)
    }
}

/// The type inside an `annotated_type`, or the node itself
fn unannotated(type_node: Node) -> Node {
    if type_node.kind() == "annotated_type" {
        significant_children(type_node)
            .into_iter()
            .rev()
            .find(|child| !child.kind().ends_with("annotation"))
            .unwrap_or(type_node)
    } else {
        type_node
    }
}
