//! Host-independent model of the program element under the caret.
//!
//! Front-ends build these values from whatever syntax or symbol API they
//! have; the resolver only ever sees this closed set of variants.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Kind of a [`SourceElement`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ElementKind {
    Type,
    Variable,
    Method,
    Constructor,
    Other,
}

/// Declared type of a method or constructor parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// Class, interface, enum, record or annotation type
    Declared {
        /// Simple name of the type, without package, enclosing types or type arguments
        simple_name: String,
        /// Type as written in source
        text: String,
    },
    /// Primitive type such as `int` or `boolean`
    Primitive { text: String },
    /// Array type, including varargs written as `T...`
    Array { text: String },
    /// Type variable such as `T`
    TypeVariable { text: String },
}

impl TypeRef {
    /// Creates a declared type reference
    pub fn declared(simple_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Declared {
            simple_name: simple_name.into(),
            text: text.into(),
        }
    }

    pub fn primitive(text: impl Into<String>) -> Self {
        Self::Primitive { text: text.into() }
    }

    pub fn array(text: impl Into<String>) -> Self {
        Self::Array { text: text.into() }
    }

    pub fn type_variable(text: impl Into<String>) -> Self {
        Self::TypeVariable { text: text.into() }
    }

    /// Rendering used inside a parameter list
    ///
    /// Declared types render by simple name; everything else renders its
    /// full textual form.
    pub fn parameter_display(&self) -> &str {
        match self {
            TypeRef::Declared { simple_name, .. } => simple_name,
            TypeRef::Primitive { text }
            | TypeRef::Array { text }
            | TypeRef::TypeVariable { text } => text,
        }
    }
}

/// One named program entity, as handed to the resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceElement {
    /// Class, interface, enum, record or annotation type
    Type { qualified_name: String },
    /// Field, local variable, parameter or enum constant
    Variable {
        /// Static type rendered as text, e.g. `List<String>`
        declared_type: String,
        simple_name: String,
    },
    Method {
        /// Qualified name of the type declaring the method
        enclosing_type: String,
        simple_name: String,
        parameters: Vec<TypeRef>,
    },
    Constructor {
        /// Qualified name of the constructed type
        enclosing_type: String,
        parameters: Vec<TypeRef>,
    },
    /// Anything else: packages, type variables, statements
    Other,
}

impl SourceElement {
    pub fn type_element(qualified_name: impl Into<String>) -> Self {
        Self::Type {
            qualified_name: qualified_name.into(),
        }
    }

    pub fn variable(declared_type: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self::Variable {
            declared_type: declared_type.into(),
            simple_name: simple_name.into(),
        }
    }

    pub fn method(
        enclosing_type: impl Into<String>,
        simple_name: impl Into<String>,
        parameters: Vec<TypeRef>,
    ) -> Self {
        Self::Method {
            enclosing_type: enclosing_type.into(),
            simple_name: simple_name.into(),
            parameters,
        }
    }

    pub fn constructor(enclosing_type: impl Into<String>, parameters: Vec<TypeRef>) -> Self {
        Self::Constructor {
            enclosing_type: enclosing_type.into(),
            parameters,
        }
    }

    /// Kind of this element
    pub fn kind(&self) -> ElementKind {
        match self {
            SourceElement::Type { .. } => ElementKind::Type,
            SourceElement::Variable { .. } => ElementKind::Variable,
            SourceElement::Method { .. } => ElementKind::Method,
            SourceElement::Constructor { .. } => ElementKind::Constructor,
            SourceElement::Other => ElementKind::Other,
        }
    }
}

/// A top-level type declaration of a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDeclaration {
    pub qualified_name: String,
    pub is_public: bool,
}

impl CandidateDeclaration {
    pub fn new(qualified_name: impl Into<String>, is_public: bool) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            is_public,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_element_kind_string_forms() {
        assert_eq!(ElementKind::Constructor.to_string(), "constructor");
        assert_eq!(
            ElementKind::from_str("variable").expect("should parse"),
            ElementKind::Variable
        );
        assert!(ElementKind::from_str("package").is_err());
    }

    #[test]
    fn test_parameter_display() {
        assert_eq!(
            TypeRef::declared("List", "java.util.List<String>").parameter_display(),
            "List"
        );
        assert_eq!(TypeRef::array("String[]").parameter_display(), "String[]");
        assert_eq!(TypeRef::type_variable("T").parameter_display(), "T");
        assert_eq!(TypeRef::primitive("long").parameter_display(), "long");
    }

    #[test]
    fn test_element_serializes_with_kind_tag() {
        let element = SourceElement::variable("int", "count");
        let json = serde_json::to_value(&element).expect("should serialize");
        assert_eq!(json["kind"], "variable");
        assert_eq!(json["declared_type"], "int");
        assert_eq!(json["simple_name"], "count");
    }
}
