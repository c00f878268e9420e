//! Caret positions and their conversion to byte offsets

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Text cursor position in a source file
///
/// Offsets and columns count characters, the way an editor reports its
/// caret; tree-sitter works in bytes, hence [`Caret::to_byte_offset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Caret {
    /// Zero-based character offset from the start of the file
    Offset(usize),
    /// One-based line and column
    LineColumn { line: usize, column: usize },
}

impl Caret {
    /// Byte offset of this caret within `source`
    ///
    /// A caret may sit just past the last character of a line or of the
    /// file. Anything further is rejected.
    pub fn to_byte_offset(&self, source: &str) -> Result<usize> {
        match *self {
            Caret::Offset(offset) => char_offset_to_byte(source, offset).ok_or_else(|| {
                Error::invalid_input(format!(
                    "offset {offset} is past the end of the file ({} characters)",
                    source.chars().count()
                ))
            }),
            Caret::LineColumn { line, column } => {
                if line == 0 || column == 0 {
                    return Err(Error::invalid_input(
                        "line and column are 1-based".to_string(),
                    ));
                }
                let line_start = line_start_byte(source, line).ok_or_else(|| {
                    Error::invalid_input(format!("line {line} is past the end of the file"))
                })?;
                let line_text = source[line_start..]
                    .split('\n')
                    .next()
                    .unwrap_or_default()
                    .trim_end_matches('\r');
                char_offset_to_byte(line_text, column - 1)
                    .map(|within| line_start + within)
                    .ok_or_else(|| {
                        Error::invalid_input(format!(
                            "column {column} is past the end of line {line}"
                        ))
                    })
            }
        }
    }
}

fn char_offset_to_byte(text: &str, offset: usize) -> Option<usize> {
    text.char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(text.len()))
        .nth(offset)
}

fn line_start_byte(source: &str, line: usize) -> Option<usize> {
    if line == 1 {
        return Some(0);
    }
    source
        .match_indices('\n')
        .nth(line - 2)
        .map(|(index, _)| index + 1)
}
