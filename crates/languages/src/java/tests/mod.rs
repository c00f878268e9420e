//! Test suite for the Java front-end

mod declaration_tests;
mod element_tests;

use super::JavaAnalyzer;
use crate::Analyzer;
use copyqn_core::element::SourceElement;
use copyqn_core::resolver::resolve_for_element;
use std::path::Path;

/// Marks the caret position in test sources
const CARET: &str = "<caret>";

/// Split a marked source into plain source and caret byte offset
pub fn split_caret(marked: &str) -> (String, usize) {
    let offset = marked.find(CARET).expect("Test source should contain a caret marker");
    (marked.replacen(CARET, "", 1), offset)
}

/// Element under the marked caret
pub fn element_at(marked: &str) -> Option<SourceElement> {
    let (source, offset) = split_caret(marked);
    JavaAnalyzer
        .element_at(&source, Path::new("Test.java"), offset)
        .expect("Locating an element should not fail")
}

/// Qualified name of the element under the marked caret, without file fallback
pub fn element_name(marked: &str) -> Option<String> {
    element_at(marked).and_then(|element| resolve_for_element(&element))
}

/// Qualified name copied for the marked caret, with file fallback
pub fn resolved_name(marked: &str) -> Option<String> {
    let (source, offset) = split_caret(marked);
    JavaAnalyzer
        .resolve(&source, Path::new("Test.java"), Some(offset))
        .expect("Resolution should not fail")
        .map(|resolution| resolution.qualified_name)
}
