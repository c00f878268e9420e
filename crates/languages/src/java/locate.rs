//! Mapping a caret position to the element under it

use copyqn_core::element::SourceElement;
use tracing::trace;
use tree_sitter::Node;

use super::context::JavaContext;
use super::declarations::{is_anonymous_body, is_field, is_type_declaration};
use super::types::{absolute_type_path, path_segments, starts_uppercase, TypeLookup};
use crate::common::{ancestors_inclusive, significant_children};

/// Nodes that make up a dotted name
const PATH_KINDS: &[&str] = &["scoped_identifier", "scoped_type_identifier", "generic_type"];

impl<'a> JavaContext<'a> {
    /// Element under the caret at byte `offset`
    ///
    /// `None` when the caret is outside every declaration.
    pub(crate) fn element_at(&self, offset: usize) -> Option<SourceElement> {
        let end = if offset < self.source.len() {
            offset + 1
        } else {
            offset
        };
        let token = self.root.descendant_for_byte_range(offset, end)?;
        trace!(kind = token.kind(), offset, "Token under caret");

        if let Some(element) = self.classify_token(token) {
            return Some(element);
        }

        // Caret right after a name, e.g. `foo|(`
        if offset > 0 {
            let previous = self
                .root
                .descendant_for_byte_range(offset - 1, offset)
                .filter(|node| node.end_byte() == offset && is_name_token(*node));
            if let Some(element) = previous.and_then(|node| self.classify_token(node)) {
                return Some(element);
            }
        }

        self.enclosing_element(token)
    }

    fn classify_token(&self, token: Node<'a>) -> Option<SourceElement> {
        let parent = token.parent()?;
        match token.kind() {
            "identifier" | "type_identifier" => Some(self.classify_name(token)),
            "new" if parent.kind() == "object_creation_expression" => {
                Some(self.classify_creation(parent))
            }
            "this" | "super" if parent.kind() == "explicit_constructor_invocation" => {
                Some(self.classify_explicit_constructor(parent, token))
            }
            _ => None,
        }
    }

    /// Element named by an identifier, by its syntactic role
    fn classify_name(&self, name: Node<'a>) -> SourceElement {
        let Some(parent) = name.parent() else {
            return SourceElement::Other;
        };
        let is_name_of = |kinds: &[&str]| kinds.contains(&parent.kind()) && is_field(parent, "name", name);

        if is_type_declaration(parent) && is_field(parent, "name", name) {
            return SourceElement::type_element(self.type_qualified_name(parent));
        }
        if is_name_of(&["method_declaration", "annotation_type_element_declaration"]) {
            return self.method_element(parent);
        }
        if is_name_of(&["constructor_declaration", "compact_constructor_declaration"]) {
            return self.constructor_element(parent);
        }
        if self.is_variable_declaration_name(name) {
            return self.variable_element(name);
        }

        for ancestor in ancestors_inclusive(parent) {
            match ancestor.kind() {
                "package_declaration" => return SourceElement::Other,
                "import_declaration" => return absolute_type_path(&self.path_up_to(name)),
                _ => {}
            }
        }

        if PATH_KINDS.contains(&parent.kind()) {
            let names = self.path_up_to(name);
            if names.len() > 1 {
                return self.resolve_dotted(&names, name);
            }
        }

        match parent.kind() {
            "field_access" if is_field(parent, "field", name) => {
                return self.classify_field_access(parent, name);
            }
            "method_invocation" if is_field(parent, "name", name) => {
                return self.classify_invocation(parent);
            }
            "method_reference" if parent.named_child(0) != Some(name) => {
                return self.classify_method_reference(parent, name);
            }
            "type_parameter" | "labeled_statement" | "break_statement" | "continue_statement" => {
                return SourceElement::Other;
            }
            "element_value_pair" if is_field(parent, "key", name) => {
                return SourceElement::Other;
            }
            "switch_label" => {
                if let Some(constant) = self.find_enum_constant(self.text(name)) {
                    return self.variable_element(constant);
                }
            }
            _ => {}
        }

        if name.kind() == "type_identifier" {
            return self.classify_type_usage(name);
        }

        let text = self.text(name);
        if let Some(declaration) = self.find_variable(text, name) {
            return self.variable_element(declaration);
        }
        if starts_uppercase(text) {
            return self.classify_type_usage(name);
        }
        SourceElement::Other
    }

    fn classify_type_usage(&self, name: Node<'a>) -> SourceElement {
        let text = self.text(name);
        if text == "var" {
            return SourceElement::Other;
        }
        match self.resolve_type_name(text, name) {
            TypeLookup::Type(qualified_name) => SourceElement::type_element(qualified_name),
            TypeLookup::TypeVariable => SourceElement::Other,
        }
    }

    /// Segment texts of the dotted name containing `name`, up to and including it
    fn path_up_to(&self, name: Node<'a>) -> Vec<&'a str> {
        let mut top = name;
        while let Some(parent) = top.parent() {
            if !PATH_KINDS.contains(&parent.kind()) {
                break;
            }
            top = parent;
        }

        let segments = path_segments(top);
        let end = segments
            .iter()
            .position(|segment| *segment == name)
            .map_or(segments.len(), |index| index + 1);
        segments[..end]
            .iter()
            .map(|segment| self.text(*segment))
            .collect()
    }

    fn classify_field_access(&self, access: Node<'a>, field: Node<'a>) -> SourceElement {
        if let Some(names) = self.identifier_path(access) {
            if self.variable_path_root(access).is_none() {
                if let SourceElement::Type { qualified_name } = self.resolve_dotted(&names, access) {
                    if self.type_declaration_named(&qualified_name).is_some() {
                        return SourceElement::type_element(qualified_name);
                    }
                }
            }
        }

        access
            .child_by_field_name("object")
            .and_then(|object| self.receiver_scope(object))
            .and_then(|scope| self.find_field(scope, self.text(field)))
            .map_or(SourceElement::Other, |declaration| {
                self.variable_element(declaration)
            })
    }

    fn classify_invocation(&self, invocation: Node<'a>) -> SourceElement {
        self.invoked_method(invocation)
            .map_or(SourceElement::Other, |method| self.method_element(method))
    }

    /// `Receiver::name`; overloads are told apart by the functional
    /// interface, which is not known here, so the first declaration wins
    fn classify_method_reference(&self, reference: Node<'a>, name: Node<'a>) -> SourceElement {
        let Some(receiver) = reference.named_child(0) else {
            return SourceElement::Other;
        };
        let scope = match receiver.kind() {
            "type_identifier" | "scoped_type_identifier" | "generic_type" => {
                self.type_declaration_for(receiver)
            }
            _ => self.receiver_scope(receiver),
        };

        scope
            .and_then(|scope| self.methods_named(scope, self.text(name)).first().copied())
            .map_or(SourceElement::Other, |method| self.method_element(method))
    }

    fn classify_creation(&self, creation: Node<'a>) -> SourceElement {
        let arity = argument_count(creation);
        creation
            .child_by_field_name("type")
            .and_then(|type_node| self.type_declaration_for(type_node))
            .and_then(|scope| self.find_constructor(scope, arity))
            .unwrap_or(SourceElement::Other)
    }

    /// `this(...)` or `super(...)` inside a constructor
    fn classify_explicit_constructor(&self, invocation: Node<'a>, keyword: Node<'a>) -> SourceElement {
        let Some(current) = self.enclosing_type_declaration(invocation) else {
            return SourceElement::Other;
        };
        let target = if keyword.kind() == "this" {
            Some(current)
        } else {
            self.superclass_declaration(current)
        };

        target
            .and_then(|scope| self.find_constructor(scope, argument_count(invocation)))
            .unwrap_or(SourceElement::Other)
    }

    /// Method declaration a call resolves to, when it is declared in this file
    fn invoked_method(&self, invocation: Node<'a>) -> Option<Node<'a>> {
        let name = self.text(invocation.child_by_field_name("name")?);
        let arity = argument_count(invocation);

        match invocation.child_by_field_name("object") {
            Some(object) => {
                let scope = self.receiver_scope(object)?;
                self.find_method(scope, name, arity)
            }
            None => ancestors_inclusive(invocation)
                .skip(1)
                .filter(|node| is_type_declaration(*node) || is_anonymous_body(*node))
                .find_map(|scope| self.find_method(scope, name, arity)),
        }
    }

    /// Type scope declared in this file that an expression evaluates to
    fn receiver_scope(&self, object: Node<'a>) -> Option<Node<'a>> {
        match object.kind() {
            "this" => self.enclosing_type_scope(object),
            "super" => {
                let current = self.enclosing_type_declaration(object)?;
                self.superclass_declaration(current)
            }
            "identifier" => {
                let name = self.text(object);
                match self.find_variable(name, object) {
                    Some(declaration) => self.variable_type_declaration(declaration),
                    None => match self.lookup_type_name(name, object)? {
                        TypeLookup::Type(qualified_name) => self.type_declaration_named(&qualified_name),
                        TypeLookup::TypeVariable => None,
                    },
                }
            }
            "field_access" => {
                if self.variable_path_root(object).is_none() {
                    if let Some(names) = self.identifier_path(object) {
                        if let SourceElement::Type { qualified_name } = self.resolve_dotted(&names, object) {
                            if let Some(declaration) = self.type_declaration_named(&qualified_name) {
                                return Some(declaration);
                            }
                        }
                    }
                }
                let scope = self.receiver_scope(object.child_by_field_name("object")?)?;
                let field = self.find_field(scope, self.text(object.child_by_field_name("field")?))?;
                self.variable_type_declaration(field)
            }
            "method_invocation" => {
                let method = self.invoked_method(object)?;
                self.type_declaration_for(method.child_by_field_name("type")?)
            }
            "object_creation_expression" => {
                self.type_declaration_for(object.child_by_field_name("type")?)
            }
            "parenthesized_expression" => self.receiver_scope(object.named_child(0)?),
            "cast_expression" => self.type_declaration_for(object.child_by_field_name("type")?),
            _ => None,
        }
    }

    /// Declaration in this file of a variable's declared type
    fn variable_type_declaration(&self, declaration: Node<'a>) -> Option<Node<'a>> {
        if let Some(type_node) = self.declared_type(declaration)?.node {
            return self.type_declaration_for(type_node);
        }
        // Enum constants have their enum as type
        let parent = declaration.parent()?;
        if parent.kind() == "enum_constant" {
            return self.enclosing_type_declaration(parent);
        }
        None
    }

    fn superclass_declaration(&self, declaration: Node<'a>) -> Option<Node<'a>> {
        let superclass = declaration.child_by_field_name("superclass")?;
        let type_node = significant_children(superclass).into_iter().next()?;
        self.type_declaration_for(type_node)
    }

    /// Identifier texts of a `a.b.c` field access chain
    fn identifier_path(&self, node: Node<'a>) -> Option<Vec<&'a str>> {
        match node.kind() {
            "identifier" => Some(vec![self.text(node)]),
            "field_access" => {
                let mut names = self.identifier_path(node.child_by_field_name("object")?)?;
                names.push(self.text(node.child_by_field_name("field")?));
                Some(names)
            }
            _ => None,
        }
    }

    /// Variable declaration the leftmost identifier of a field access chain refers to
    fn variable_path_root(&self, access: Node<'a>) -> Option<Node<'a>> {
        let mut node = access;
        while node.kind() == "field_access" {
            node = node.child_by_field_name("object")?;
        }
        if node.kind() != "identifier" {
            return None;
        }
        self.find_variable(self.text(node), node)
    }

    /// Innermost declaration around a caret that is not on a name
    ///
    /// Crossing a block, statement or expression means the caret sits in
    /// code rather than on a declaration.
    fn enclosing_element(&self, start: Node<'a>) -> Option<SourceElement> {
        for node in ancestors_inclusive(start) {
            let kind = node.kind();
            match kind {
                "program" => return None,
                _ if is_type_declaration(node) => {
                    return Some(SourceElement::type_element(self.type_qualified_name(node)));
                }
                "method_declaration" | "annotation_type_element_declaration" => {
                    return Some(self.method_element(node));
                }
                "constructor_declaration" | "compact_constructor_declaration" => {
                    return Some(self.constructor_element(node));
                }
                "field_declaration" | "constant_declaration" | "local_variable_declaration" => {
                    return Some(self.single_declarator_element(node));
                }
                "variable_declarator" | "formal_parameter" | "catch_formal_parameter" | "enum_constant" => {
                    if let Some(name) = node.child_by_field_name("name") {
                        return Some(self.variable_element(name));
                    }
                }
                "package_declaration" | "import_declaration" => return Some(SourceElement::Other),
                "block" | "constructor_body" | "static_initializer" => {
                    return Some(SourceElement::Other);
                }
                _ if is_anonymous_body(node) => return Some(SourceElement::Other),
                _ if kind.ends_with("_statement")
                    || kind.ends_with("_expression")
                    || kind.ends_with("_literal") =>
                {
                    return Some(SourceElement::Other);
                }
                _ => {}
            }
        }
        None
    }

    /// Variable of a declaration with exactly one declarator, else `Other`
    fn single_declarator_element(&self, declaration: Node<'a>) -> SourceElement {
        let mut cursor = declaration.walk();
        let declarators: Vec<Node<'a>> = declaration
            .children_by_field_name("declarator", &mut cursor)
            .collect();
        match declarators.as_slice() {
            [declarator] => declarator
                .child_by_field_name("name")
                .map_or(SourceElement::Other, |name| self.variable_element(name)),
            _ => SourceElement::Other,
        }
    }
}

fn is_name_token(node: Node) -> bool {
    matches!(node.kind(), "identifier" | "type_identifier")
}

/// Number of arguments of a call, creation or explicit constructor invocation
fn argument_count(node: Node) -> usize {
    node.child_by_field_name("arguments")
        .map_or(0, |arguments| significant_children(arguments).len())
}
