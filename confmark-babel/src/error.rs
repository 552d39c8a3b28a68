//! Error types for format and edit operations

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Format does not support the requested direction
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

/// Typed failure reasons for structural edits and exact-substring patches.
///
/// These are expected outcomes, not exceptional states: every editor operation
/// returns one of them instead of panicking when the request cannot be honored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("table index {index} is out of range (document has {count} tables)")]
    TableOutOfRange { index: usize, count: usize },

    #[error("row index {index} is out of range (table has {count} rows)")]
    RowOutOfRange { index: usize, count: usize },

    #[error("column index {index} is out of range (row has {count} cells)")]
    ColumnOutOfRange { index: usize, count: usize },

    /// The targeted row or table uses merged cells, so the edit could corrupt
    /// the layout.
    #[error("{0}; use an exact-substring patch instead")]
    UnsupportedStructure(String),

    /// The fragment to replace is not a literal substring of the document.
    #[error("fragment not found verbatim in the document; re-read the page and copy the exact markup")]
    NoMatch,
}

impl EditError {
    /// Short machine-readable name of the failure category.
    pub fn kind(&self) -> &'static str {
        match self {
            EditError::TableOutOfRange { .. }
            | EditError::RowOutOfRange { .. }
            | EditError::ColumnOutOfRange { .. } => "out-of-range",
            EditError::UnsupportedStructure(_) => "unsupported-structure",
            EditError::NoMatch => "no-match",
        }
    }
}
