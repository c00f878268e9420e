//! The copy qualified name command and its read-only variants

use crate::clipboard::Clipboard;
use anyhow::{Context, Result};
use copyqn_core::caret::Caret;
use copyqn_core::config::ClipboardConfig;
use copyqn_core::element::CandidateDeclaration;
use copyqn_core::resolver::Resolution;
use copyqn_languages::create_analyzer;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Result of resolving a file and caret
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No front-end handles this file
    Unsupported,
    /// Nothing under the caret or in the file has a qualified name
    Unresolved,
    Resolved(Resolution),
}

impl Outcome {
    pub fn qualified_name(&self) -> Option<&str> {
        match self {
            Outcome::Resolved(resolution) => Some(&resolution.qualified_name),
            Outcome::Unsupported | Outcome::Unresolved => None,
        }
    }

    /// Short status line shown to the user
    ///
    /// Empty when nothing was resolved.
    pub fn status(&self, path: &Path) -> String {
        match self {
            Outcome::Unsupported => format!("It isn't a Java file: {}", path.display()),
            Outcome::Unresolved => String::new(),
            Outcome::Resolved(resolution) => resolution.qualified_name.clone(),
        }
    }
}

/// Resolve the qualified name for `caret` in the file at `path`
///
/// Without a caret the file's primary type is used.
pub fn resolve_path(path: &Path, caret: Option<Caret>) -> Result<Outcome> {
    let Some(analyzer) = create_analyzer(path)? else {
        debug!(path = %path.display(), "No analyzer for file");
        return Ok(Outcome::Unsupported);
    };

    let source = read_source(path)?;
    let offset = caret
        .map(|caret| caret.to_byte_offset(&source))
        .transpose()
        .with_context(|| format!("Invalid caret position for {}", path.display()))?;

    let resolution = analyzer
        .resolve(&source, path, offset)
        .with_context(|| format!("Failed to analyze {}", path.display()))?;

    Ok(match resolution {
        Some(resolution) => Outcome::Resolved(resolution),
        None => Outcome::Unresolved,
    })
}

/// Resolve and publish the qualified name to `clipboard`
///
/// Unsupported files leave the clipboard untouched. Unresolved carets clear
/// it only when configured to.
pub fn copy_qualified_name(
    path: &Path,
    caret: Option<Caret>,
    clipboard: &mut dyn Clipboard,
    config: &ClipboardConfig,
) -> Result<Outcome> {
    let outcome = resolve_path(path, caret)?;

    match &outcome {
        Outcome::Resolved(resolution) => {
            clipboard
                .set_contents(Some(&resolution.qualified_name))
                .context("Failed to write to clipboard")?;
            debug!(
                qualified_name = %resolution.qualified_name,
                origin = ?resolution.origin,
                "Copied qualified name"
            );
        }
        Outcome::Unresolved if config.clear_on_unresolved => {
            clipboard
                .set_contents(None)
                .context("Failed to clear clipboard")?;
            debug!("Nothing resolvable, cleared clipboard");
        }
        Outcome::Unresolved => debug!("Nothing resolvable, clipboard left untouched"),
        Outcome::Unsupported => {}
    }

    Ok(outcome)
}

/// Top-level type declarations of a file, `None` when unsupported
pub fn list_declarations(path: &Path) -> Result<Option<Vec<CandidateDeclaration>>> {
    let Some(analyzer) = create_analyzer(path)? else {
        return Ok(None);
    };

    let source = read_source(path)?;
    let declarations = analyzer
        .top_level_declarations(&source, path)
        .with_context(|| format!("Failed to analyze {}", path.display()))?;
    Ok(Some(declarations))
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
