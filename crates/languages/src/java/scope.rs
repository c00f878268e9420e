//! Declarations visible from a position: variables, fields, methods, constructors

use copyqn_core::element::{SourceElement, TypeRef};
use tree_sitter::Node;

use super::context::JavaContext;
use super::declarations::{body_members, is_anonymous_body, is_field, is_type_declaration, type_body};
use crate::common::{normalize_type_text, significant_children};

/// Statement lists that can hold local variable declarations
const BLOCK_KINDS: &[&str] = &["block", "constructor_body", "switch_block_statement_group"];

/// Constructs whose earlier operands may bind pattern variables for later ones
const PATTERN_SCOPE_KINDS: &[&str] = &[
    "if_statement",
    "while_statement",
    "for_statement",
    "binary_expression",
    "ternary_expression",
];

/// Declared type of a variable
pub(crate) struct DeclaredType<'a> {
    /// Type node, when the type is written in source
    pub(crate) node: Option<Node<'a>>,
    /// Type rendered as text
    pub(crate) text: String,
}

impl<'a> JavaContext<'a> {
    /// Whether `name` is the name of a variable declaration of any kind
    pub(crate) fn is_variable_declaration_name(&self, name: Node<'a>) -> bool {
        let Some(parent) = name.parent() else {
            return false;
        };
        match parent.kind() {
            "variable_declarator"
            | "formal_parameter"
            | "catch_formal_parameter"
            | "enhanced_for_statement"
            | "resource"
            | "instanceof_expression"
            | "enum_constant" => is_field(parent, "name", name),
            "lambda_expression" => is_field(parent, "parameters", name),
            "inferred_parameters" => true,
            "type_pattern" => type_pattern_name(parent) == Some(name),
            _ => false,
        }
    }

    /// Element for a variable declaration name
    ///
    /// Variables whose type is inferred and cannot be read from source
    /// (untyped lambda parameters, most `var` locals) are `Other`.
    pub(crate) fn variable_element(&self, name: Node<'a>) -> SourceElement {
        match self.declared_type(name) {
            Some(declared) => SourceElement::variable(declared.text, self.text(name)),
            None => SourceElement::Other,
        }
    }

    /// Declared type of a variable declaration name
    pub(crate) fn declared_type(&self, name: Node<'a>) -> Option<DeclaredType<'a>> {
        if !self.is_variable_declaration_name(name) {
            return None;
        }
        let parent = name.parent()?;

        match parent.kind() {
            "variable_declarator" => {
                let declaration = parent.parent()?;
                let dimensions = self.dimensions(parent);
                match declaration.kind() {
                    "field_declaration" | "constant_declaration" | "local_variable_declaration" => {
                        let type_node = declaration.child_by_field_name("type")?;
                        if self.text(type_node) == "var" {
                            return self.inferred_type(parent);
                        }
                        Some(self.written_type(type_node, &dimensions, false))
                    }
                    "spread_parameter" => {
                        let type_node = spread_parameter_type(declaration)?;
                        Some(self.written_type(type_node, &dimensions, true))
                    }
                    _ => None,
                }
            }
            "formal_parameter" => {
                let type_node = parent.child_by_field_name("type")?;
                Some(self.written_type(type_node, &self.dimensions(parent), false))
            }
            "catch_formal_parameter" => {
                let catch_type = significant_children(parent)
                    .into_iter()
                    .find(|child| child.kind() == "catch_type")?;
                Some(DeclaredType {
                    node: None,
                    text: normalize_type_text(self.text(catch_type)),
                })
            }
            "enhanced_for_statement" | "resource" => {
                let type_node = parent.child_by_field_name("type")?;
                if self.text(type_node) == "var" {
                    return None;
                }
                Some(self.written_type(type_node, &self.dimensions(parent), false))
            }
            "instanceof_expression" => {
                let type_node = parent.child_by_field_name("right")?;
                Some(self.written_type(type_node, "", false))
            }
            "type_pattern" => {
                let type_node = parent.named_child(0)?;
                Some(self.written_type(type_node, "", false))
            }
            "enum_constant" => {
                let enum_declaration = self.enclosing_type_declaration(parent)?;
                let enum_name = self.declaration_name(enum_declaration)?;
                Some(DeclaredType {
                    node: None,
                    text: enum_name.to_string(),
                })
            }
            _ => None,
        }
    }

    fn written_type(&self, type_node: Node<'a>, dimensions: &str, is_varargs: bool) -> DeclaredType<'a> {
        let mut text = normalize_type_text(self.text(type_node));
        text.push_str(dimensions);
        if is_varargs {
            text.push_str("...");
        }
        DeclaredType {
            node: Some(type_node),
            text,
        }
    }

    /// Type of a `var` local initialized with `new T(...)`
    fn inferred_type(&self, declarator: Node<'a>) -> Option<DeclaredType<'a>> {
        let value = declarator.child_by_field_name("value")?;
        if value.kind() != "object_creation_expression" {
            return None;
        }
        let type_node = value.child_by_field_name("type")?;
        Some(self.written_type(type_node, "", false))
    }

    /// Brackets written after a declarator name, e.g. `[]` in `int x[]`
    fn dimensions(&self, declarator: Node<'a>) -> String {
        declarator
            .child_by_field_name("dimensions")
            .map(|dims| normalize_type_text(self.text(dims)))
            .unwrap_or_default()
    }

    /// Declaration name of the variable `name` visible from `at`
    ///
    /// Walks outward: locals declared earlier in enclosing blocks, loop and
    /// resource variables, pattern bindings, parameters of enclosing lambdas
    /// and methods, then fields of enclosing types.
    pub(crate) fn find_variable(&self, name: &str, at: Node<'a>) -> Option<Node<'a>> {
        let mut current = at;
        while let Some(parent) = current.parent() {
            let found = match parent.kind() {
                kind if BLOCK_KINDS.contains(&kind) => self.find_local_before(parent, current, name),
                "method_declaration" | "constructor_declaration" => parent
                    .child_by_field_name("parameters")
                    .and_then(|params| self.find_parameter(params, name)),
                "lambda_expression" => self.find_lambda_parameter(parent, name),
                "catch_clause" => significant_children(parent)
                    .into_iter()
                    .find(|child| child.kind() == "catch_formal_parameter")
                    .and_then(|param| self.named(param.child_by_field_name("name"), name)),
                "enhanced_for_statement" => self.named(parent.child_by_field_name("name"), name),
                "try_with_resources_statement" => parent
                    .child_by_field_name("resources")
                    .and_then(|resources| {
                        significant_children(resources)
                            .into_iter()
                            .find_map(|resource| self.named(resource.child_by_field_name("name"), name))
                    }),
                _ if is_type_declaration(parent) || is_anonymous_body(parent) => {
                    self.find_field(parent, name)
                }
                _ => None,
            };

            let found = found.or_else(|| {
                if PATTERN_SCOPE_KINDS.contains(&parent.kind()) {
                    self.find_in_earlier_siblings(parent, current, name)
                } else {
                    None
                }
            });

            if found.is_some() {
                return found;
            }
            current = parent;
        }
        None
    }

    /// Field, record component or enum constant `name` declared by a type scope
    pub(crate) fn find_field(&self, scope: Node<'a>, name: &str) -> Option<Node<'a>> {
        if scope.kind() == "record_declaration" {
            let component = scope
                .child_by_field_name("parameters")
                .and_then(|params| self.find_parameter(params, name));
            if component.is_some() {
                return component;
            }
        }

        let body = type_body(scope)?;
        body_members(body).into_iter().find_map(|member| match member.kind() {
            "field_declaration" | "constant_declaration" => declarators(member)
                .into_iter()
                .find_map(|declarator| self.named(declarator.child_by_field_name("name"), name)),
            "enum_constant" => self.named(member.child_by_field_name("name"), name),
            _ => None,
        })
    }

    /// Enum constant `name` of any enum in the file
    pub(crate) fn find_enum_constant(&self, name: &str) -> Option<Node<'a>> {
        self.all_type_declarations()
            .into_iter()
            .filter(|decl| decl.kind() == "enum_declaration")
            .filter_map(|decl| type_body(decl))
            .flat_map(body_members)
            .filter(|member| member.kind() == "enum_constant")
            .find_map(|constant| self.named(constant.child_by_field_name("name"), name))
    }

    /// Method `name` of a type scope, preferring one whose arity fits
    pub(crate) fn find_method(&self, scope: Node<'a>, name: &str, arity: usize) -> Option<Node<'a>> {
        let candidates = self.methods_named(scope, name);
        candidates
            .iter()
            .copied()
            .find(|method| {
                method
                    .child_by_field_name("parameters")
                    .is_some_and(|params| accepts_arity(params, arity))
            })
            .or_else(|| candidates.first().copied())
    }

    /// Methods declared directly in a type scope, in source order
    pub(crate) fn methods_named(&self, scope: Node<'a>, name: &str) -> Vec<Node<'a>> {
        let Some(body) = type_body(scope) else {
            return Vec::new();
        };
        body_members(body)
            .into_iter()
            .filter(|member| member.kind() == "method_declaration")
            .filter(|method| self.declaration_name(*method) == Some(name))
            .collect()
    }

    /// Constructor of a type scope invoked with `arity` arguments
    ///
    /// Records without an explicit canonical constructor get an implicit
    /// one; classes without constructors get the implicit no-argument one.
    pub(crate) fn find_constructor(&self, scope: Node<'a>, arity: usize) -> Option<SourceElement> {
        let body = type_body(scope)?;
        let constructors: Vec<Node<'a>> = body_members(body)
            .into_iter()
            .filter(|member| {
                matches!(
                    member.kind(),
                    "constructor_declaration" | "compact_constructor_declaration"
                )
            })
            .collect();

        let record_components = if scope.kind() == "record_declaration" {
            scope.child_by_field_name("parameters")
        } else {
            None
        };

        let matching = constructors.iter().copied().find(|constructor| {
            let params = if constructor.kind() == "compact_constructor_declaration" {
                record_components
            } else {
                constructor.child_by_field_name("parameters")
            };
            params.is_some_and(|params| accepts_arity(params, arity))
        });
        if let Some(constructor) = matching {
            return Some(self.constructor_element(constructor));
        }

        let enclosing_type = self.scope_qualified_name(scope);
        if let Some(components) = record_components {
            if accepts_arity(components, arity) {
                return Some(SourceElement::constructor(
                    enclosing_type,
                    self.parameter_types(components),
                ));
            }
        }

        let declares_constructor = constructors
            .iter()
            .any(|constructor| constructor.kind() == "constructor_declaration");
        if !declares_constructor && arity == 0 && scope.kind() == "class_declaration" {
            return Some(SourceElement::constructor(enclosing_type, Vec::new()));
        }

        constructors
            .first()
            .map(|constructor| self.constructor_element(*constructor))
    }

    /// Element for a method or annotation element declaration
    pub(crate) fn method_element(&self, method: Node<'a>) -> SourceElement {
        let enclosing_type = self
            .enclosing_type_scope(method)
            .map(|scope| self.scope_qualified_name(scope))
            .unwrap_or_default();
        let parameters = method
            .child_by_field_name("parameters")
            .map(|params| self.parameter_types(params))
            .unwrap_or_default();

        SourceElement::method(
            enclosing_type,
            self.declaration_name(method).unwrap_or_default(),
            parameters,
        )
    }

    /// Element for a constructor or compact canonical constructor declaration
    pub(crate) fn constructor_element(&self, constructor: Node<'a>) -> SourceElement {
        let scope = self.enclosing_type_scope(constructor);
        let enclosing_type = scope
            .map(|scope| self.scope_qualified_name(scope))
            .unwrap_or_default();

        let params = if constructor.kind() == "compact_constructor_declaration" {
            scope.and_then(|record| record.child_by_field_name("parameters"))
        } else {
            constructor.child_by_field_name("parameters")
        };
        let parameters = params
            .map(|params| self.parameter_types(params))
            .unwrap_or_default();

        SourceElement::constructor(enclosing_type, parameters)
    }

    /// Parameter types of a `formal_parameters` node, in declaration order
    pub(crate) fn parameter_types(&self, params: Node<'a>) -> Vec<TypeRef> {
        parameter_nodes(params)
            .into_iter()
            .filter_map(|param| match param.kind() {
                "formal_parameter" => {
                    let type_node = param.child_by_field_name("type")?;
                    Some(self.type_ref(type_node, &self.dimensions(param), false))
                }
                "spread_parameter" => {
                    let type_node = spread_parameter_type(param)?;
                    let dimensions = significant_children(param)
                        .into_iter()
                        .find(|child| child.kind() == "variable_declarator")
                        .map(|declarator| self.dimensions(declarator))
                        .unwrap_or_default();
                    Some(self.type_ref(type_node, &dimensions, true))
                }
                _ => None,
            })
            .collect()
    }

    fn find_parameter(&self, params: Node<'a>, name: &str) -> Option<Node<'a>> {
        parameter_nodes(params)
            .into_iter()
            .find_map(|param| match param.kind() {
                "formal_parameter" => self.named(param.child_by_field_name("name"), name),
                "spread_parameter" => significant_children(param)
                    .into_iter()
                    .find(|child| child.kind() == "variable_declarator")
                    .and_then(|declarator| self.named(declarator.child_by_field_name("name"), name)),
                _ => None,
            })
    }

    fn find_lambda_parameter(&self, lambda: Node<'a>, name: &str) -> Option<Node<'a>> {
        let params = lambda.child_by_field_name("parameters")?;
        match params.kind() {
            "identifier" => self.named(Some(params), name),
            "formal_parameters" => self.find_parameter(params, name),
            "inferred_parameters" => significant_children(params)
                .into_iter()
                .find_map(|param| self.named(Some(param), name)),
            _ => None,
        }
    }

    /// Locals declared in `block` before the statement containing `current`
    fn find_local_before(&self, block: Node<'a>, current: Node<'a>, name: &str) -> Option<Node<'a>> {
        significant_children(block)
            .into_iter()
            .take_while(|statement| statement.start_byte() < current.start_byte())
            .filter(|statement| statement.kind() == "local_variable_declaration")
            .flat_map(declarators)
            .find_map(|declarator| self.named(declarator.child_by_field_name("name"), name))
            .or_else(|| self.find_in_earlier_siblings(block, current, name))
    }

    /// Pattern bindings and loop variables introduced by siblings before `current`
    fn find_in_earlier_siblings(&self, parent: Node<'a>, current: Node<'a>, name: &str) -> Option<Node<'a>> {
        let earlier: Vec<Node<'a>> = significant_children(parent)
            .into_iter()
            .take_while(|sibling| sibling.start_byte() < current.start_byte())
            .collect();

        earlier.into_iter().find_map(|sibling| {
            if parent.kind() == "for_statement" && sibling.kind() == "local_variable_declaration" {
                return declarators(sibling)
                    .into_iter()
                    .find_map(|declarator| self.named(declarator.child_by_field_name("name"), name));
            }
            if BLOCK_KINDS.contains(&parent.kind()) {
                // Flow scoping: `if (!(o instanceof T t)) return;` binds `t` afterwards
                if sibling.kind() != "if_statement" {
                    return None;
                }
                return sibling
                    .child_by_field_name("condition")
                    .and_then(|condition| self.find_pattern_binding(condition, name));
            }
            self.find_pattern_binding(sibling, name)
        })
    }

    /// Pattern variable `name` bound anywhere inside `node`
    fn find_pattern_binding(&self, node: Node<'a>, name: &str) -> Option<Node<'a>> {
        match node.kind() {
            "instanceof_expression" => {
                if let Some(found) = self.named(node.child_by_field_name("name"), name) {
                    return Some(found);
                }
            }
            "type_pattern" => {
                if let Some(found) = self.named(type_pattern_name(node), name) {
                    return Some(found);
                }
            }
            "lambda_expression" | "class_body" | "block" => return None,
            _ => {}
        }
        significant_children(node)
            .into_iter()
            .find_map(|child| self.find_pattern_binding(child, name))
    }

    /// `node` if it is an identifier spelled `name`
    fn named(&self, node: Option<Node<'a>>, name: &str) -> Option<Node<'a>> {
        node.filter(|n| n.kind() == "identifier" && self.text(*n) == name)
    }
}

/// Variable declarators of a field or local variable declaration
fn declarators(declaration: Node) -> Vec<Node> {
    let mut cursor = declaration.walk();
    let declarators = declaration
        .children_by_field_name("declarator", &mut cursor)
        .collect();
    declarators
}

/// Type of a `T... name` parameter
fn spread_parameter_type(param: Node) -> Option<Node> {
    significant_children(param).into_iter().find(|child| {
        !matches!(child.kind(), "modifiers" | "variable_declarator")
            && !child.kind().ends_with("annotation")
    })
}

/// Formal and spread parameters, without the receiver parameter
fn parameter_nodes(params: Node) -> Vec<Node> {
    significant_children(params)
        .into_iter()
        .filter(|param| matches!(param.kind(), "formal_parameter" | "spread_parameter"))
        .collect()
}

/// Whether a parameter list accepts `arity` arguments
fn accepts_arity(params: Node, arity: usize) -> bool {
    let params = parameter_nodes(params);
    match params.last() {
        Some(last) if last.kind() == "spread_parameter" => arity + 1 >= params.len(),
        _ => arity == params.len(),
    }
}

/// Variable bound by a `T name` pattern
fn type_pattern_name(pattern: Node) -> Option<Node> {
    pattern
        .child_by_field_name("name")
        .or_else(|| significant_children(pattern).pop())
        .filter(|name| name.kind() == "identifier")
}
