//! Type declarations: qualified names, enclosing scopes, file-level candidates

use copyqn_core::element::CandidateDeclaration;
use tree_sitter::Node;

use super::context::JavaContext;
use super::LANGUAGE_NAME;
use crate::common::{ancestors_inclusive, significant_children};
use crate::qualified_name::build_scope_path_from_ast;

/// Node kinds that declare a class, interface, enum, record or annotation type
pub(crate) const TYPE_DECLARATION_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

/// Node kinds whose direct children may be type declarations
const MEMBER_CONTAINER_KINDS: &[&str] = &[
    "program",
    "class_body",
    "interface_body",
    "enum_body",
    "enum_body_declarations",
    "annotation_type_body",
    "block",
    "constructor_body",
    "switch_block_statement_group",
];

pub(crate) fn is_type_declaration(node: Node) -> bool {
    TYPE_DECLARATION_KINDS.contains(&node.kind())
}

/// Whether `body` is the body of an anonymous class (`new T() { ... }` or an enum constant body)
pub(crate) fn is_anonymous_body(node: Node) -> bool {
    node.kind() == "class_body"
        && node
            .parent()
            .is_some_and(|p| matches!(p.kind(), "object_creation_expression" | "enum_constant"))
}

/// Whether `node` is the `field` child of `parent`
pub(crate) fn is_field(parent: Node, field: &str, node: Node) -> bool {
    parent.child_by_field_name(field) == Some(node)
}

/// Body holding the members of a type scope
///
/// A type scope is either a type declaration or an anonymous class body.
pub(crate) fn type_body(scope: Node) -> Option<Node> {
    if scope.kind() == "class_body" {
        Some(scope)
    } else {
        scope.child_by_field_name("body")
    }
}

/// Members of a type body, with enum body declarations flattened in
pub(crate) fn body_members(body: Node) -> Vec<Node> {
    let mut members = Vec::new();
    for child in significant_children(body) {
        if child.kind() == "enum_body_declarations" {
            members.extend(significant_children(child));
        } else {
            members.push(child);
        }
    }
    members
}

impl<'a> JavaContext<'a> {
    /// Top-level type declarations in file order
    pub(crate) fn top_level_declarations(&self) -> Vec<CandidateDeclaration> {
        significant_children(self.root)
            .into_iter()
            .filter(|node| is_type_declaration(*node))
            .map(|decl| {
                CandidateDeclaration::new(self.type_qualified_name(decl), self.is_public(decl))
            })
            .collect()
    }

    /// Qualified name of a type declaration
    ///
    /// Local types (declared in a method body or anonymous class) are named
    /// relative to the nearest local boundary, without a package.
    pub(crate) fn type_qualified_name(&self, decl: Node<'a>) -> String {
        let path = build_scope_path_from_ast(decl, self.source, LANGUAGE_NAME);
        if path.is_local {
            path.joined()
        } else {
            self.qualify(&path.joined())
        }
    }

    /// Qualified name of a type scope; anonymous classes have an empty name
    pub(crate) fn scope_qualified_name(&self, scope: Node<'a>) -> String {
        if is_anonymous_body(scope) {
            String::new()
        } else {
            self.type_qualified_name(scope)
        }
    }

    /// Nearest type declaration or anonymous class body strictly enclosing `node`
    pub(crate) fn enclosing_type_scope(&self, node: Node<'a>) -> Option<Node<'a>> {
        ancestors_inclusive(node)
            .skip(1)
            .find(|n| is_type_declaration(*n) || is_anonymous_body(*n))
    }

    /// Nearest named type declaration strictly enclosing `node`
    pub(crate) fn enclosing_type_declaration(&self, node: Node<'a>) -> Option<Node<'a>> {
        ancestors_inclusive(node)
            .skip(1)
            .find(|n| is_type_declaration(*n))
    }

    /// Type declaration named `name` visible from `at`
    ///
    /// Looks at enclosing declarations, their member types, local types of
    /// enclosing blocks and finally the top-level types of the file.
    pub(crate) fn visible_type_declaration(&self, name: &str, at: Node<'a>) -> Option<Node<'a>> {
        for node in ancestors_inclusive(at) {
            if is_type_declaration(node) && self.declaration_name(node) == Some(name) {
                return Some(node);
            }
            if MEMBER_CONTAINER_KINDS.contains(&node.kind()) {
                let member = body_members(node).into_iter().find(|member| {
                    is_type_declaration(*member) && self.declaration_name(*member) == Some(name)
                });
                if member.is_some() {
                    return member;
                }
            }
        }
        None
    }

    /// Every type declaration in the file, outermost first
    pub(crate) fn all_type_declarations(&self) -> Vec<Node<'a>> {
        let mut declarations = Vec::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if is_type_declaration(node) {
                declarations.push(node);
            }
            let mut children = significant_children(node);
            children.reverse();
            stack.extend(children);
        }
        declarations
    }

    /// Type declaration of this file with the given qualified name
    pub(crate) fn type_declaration_named(&self, qualified_name: &str) -> Option<Node<'a>> {
        self.all_type_declarations()
            .into_iter()
            .find(|decl| self.type_qualified_name(*decl) == qualified_name)
    }

    /// Simple name of a declaration
    pub(crate) fn declaration_name(&self, decl: Node<'a>) -> Option<&'a str> {
        decl.child_by_field_name("name").map(|name| self.text(name))
    }

    /// Whether a declaration carries the `public` modifier
    pub(crate) fn is_public(&self, decl: Node<'a>) -> bool {
        let mut cursor = decl.walk();
        let modifiers = decl
            .children(&mut cursor)
            .find(|child| child.kind() == "modifiers");
        let Some(modifiers) = modifiers else {
            return false;
        };

        let mut cursor = modifiers.walk();
        let is_public = modifiers
            .children(&mut cursor)
            .any(|child| child.kind() == "public");
        is_public
    }
}
