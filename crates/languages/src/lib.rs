#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use copyqn_core::element::{CandidateDeclaration, SourceElement};
use copyqn_core::error::Result;
use copyqn_core::resolver::{self, Resolution};
use std::path::Path;

// All internal modules are private
mod java;

// Public modules
pub mod common;
pub mod qualified_name;

/// Trait for locating program elements in source files
///
/// Implementations are stateless: every call parses the source it is given
/// and keeps nothing afterwards.
pub trait Analyzer: Send + Sync {
    /// Element under the byte offset `offset`
    ///
    /// Returns `Ok(None)` when nothing sits under the caret and
    /// `Ok(Some(SourceElement::Other))` when something does but has no
    /// qualified form.
    fn element_at(
        &self,
        source: &str,
        file_path: &Path,
        offset: usize,
    ) -> Result<Option<SourceElement>>;

    /// Top-level type declarations in file order
    fn top_level_declarations(
        &self,
        source: &str,
        file_path: &Path,
    ) -> Result<Vec<CandidateDeclaration>>;

    /// Resolve the element at `offset`, or the file's primary type
    ///
    /// Without an offset only the file's declarations are considered.
    fn resolve(
        &self,
        source: &str,
        file_path: &Path,
        offset: Option<usize>,
    ) -> Result<Option<Resolution>> {
        let element = match offset {
            Some(offset) => self.element_at(source, file_path, offset)?,
            None => None,
        };

        let mut failure = None;
        let resolution = resolver::resolve(element.as_ref(), || {
            self.top_level_declarations(source, file_path)
                .unwrap_or_else(|e| {
                    failure = Some(e);
                    Vec::new()
                })
        });

        match failure {
            Some(e) => Err(e),
            None => Ok(resolution),
        }
    }
}

/// Language descriptor for automatic registration
pub struct LanguageDescriptor {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub factory: fn() -> Result<Box<dyn Analyzer>>,
}

inventory::collect!(LanguageDescriptor);

/// Create an appropriate analyzer for a file based on its extension
///
/// Returns Ok(None) if the file type is not supported, Err if analyzer creation fails
pub fn create_analyzer(file_path: &Path) -> Result<Option<Box<dyn Analyzer>>> {
    let Some(extension) = file_path.extension().and_then(|e| e.to_str()) else {
        return Ok(None);
    };

    let ext_lower = extension.to_lowercase();

    // Find matching language descriptor
    for descriptor in inventory::iter::<LanguageDescriptor> {
        if descriptor.extensions.contains(&ext_lower.as_str()) {
            return Ok(Some((descriptor.factory)()?));
        }
    }

    Ok(None)
}

/// Get the language identifier from a file path
///
/// This is a utility function for determining language from file extension
pub fn detect_language(file_path: &Path) -> Option<&'static str> {
    let extension = file_path.extension()?.to_str()?;
    let ext_lower = extension.to_lowercase();

    for descriptor in inventory::iter::<LanguageDescriptor> {
        if descriptor.extensions.contains(&ext_lower.as_str()) {
            return Some(descriptor.name);
        }
    }

    None
}

/// Names of all registered languages
pub fn supported_languages() -> Vec<&'static str> {
    inventory::iter::<LanguageDescriptor>()
        .map(|descriptor| descriptor.name)
        .collect()
}
