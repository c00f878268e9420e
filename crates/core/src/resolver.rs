//! Qualified name resolution for the element under the caret.
//!
//! Pure functions over [`SourceElement`] and [`CandidateDeclaration`]. No
//! state survives a call, and "nothing resolvable" is `None`, never an error.

use serde::Serialize;
use tracing::debug;

use crate::element::{CandidateDeclaration, ElementKind, SourceElement, TypeRef};

/// Where a resolved name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", content = "kind", rename_all = "snake_case")]
pub enum ResolutionOrigin {
    /// The element under the caret
    Element(ElementKind),
    /// The file's primary top-level type
    File,
}

/// A resolved qualified name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub qualified_name: String,
    #[serde(flatten)]
    pub origin: ResolutionOrigin,
}

/// Qualified name for a caret-resolved element
///
/// Returns `None` for [`SourceElement::Other`] so the caller can fall back to
/// [`resolve_for_file`].
pub fn resolve_for_element(element: &SourceElement) -> Option<String> {
    match element {
        SourceElement::Type { qualified_name } => Some(qualified_name.clone()),
        SourceElement::Variable {
            declared_type,
            simple_name,
        } => Some(format!("{declared_type}.{simple_name}")),
        SourceElement::Method {
            enclosing_type,
            simple_name,
            parameters,
        } => Some(format!(
            "{enclosing_type}#{simple_name}{}",
            render_parameter_list(parameters)
        )),
        SourceElement::Constructor {
            enclosing_type,
            parameters,
        } => Some(format!(
            "{enclosing_type}{}",
            render_parameter_list(parameters)
        )),
        SourceElement::Other => None,
    }
}

/// Qualified name of a file's primary type
///
/// The first public declaration wins wherever it appears; otherwise the
/// first declaration in file order.
pub fn resolve_for_file(declarations: &[CandidateDeclaration]) -> Option<String> {
    declarations
        .iter()
        .find(|decl| decl.is_public)
        .or_else(|| declarations.first())
        .map(|decl| decl.qualified_name.clone())
}

/// Resolve the element if there is one, falling back to the file's declarations
///
/// `declarations` is only evaluated when the element does not resolve.
pub fn resolve<F>(element: Option<&SourceElement>, declarations: F) -> Option<Resolution>
where
    F: FnOnce() -> Vec<CandidateDeclaration>,
{
    if let Some(element) = element {
        if let Some(qualified_name) = resolve_for_element(element) {
            return Some(Resolution {
                qualified_name,
                origin: ResolutionOrigin::Element(element.kind()),
            });
        }
        debug!(kind = %element.kind(), "Element has no qualified form, using file declarations");
    }

    resolve_for_file(&declarations()).map(|qualified_name| Resolution {
        qualified_name,
        origin: ResolutionOrigin::File,
    })
}

/// Render `(A, int, T[])` for a method or constructor
pub fn render_parameter_list(parameters: &[TypeRef]) -> String {
    let rendered: Vec<&str> = parameters.iter().map(TypeRef::parameter_display).collect();
    format!("({})", rendered.join(", "))
}
