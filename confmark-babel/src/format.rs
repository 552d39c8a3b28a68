//! Format trait definition
//!
//! Every format converts to and from the storage format, which acts as the hub:
//! converting Markdown to anything else goes Markdown → storage → target.

use crate::error::FormatError;

/// Trait for document formats
///
/// `parse` turns source text of this format into storage markup and
/// `serialize` turns storage markup into this format. Formats can support one
/// direction or both.
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Format for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, storage: &str) -> Result<String, FormatError> {
///         Ok(storage.to_uppercase())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "storage")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → storage)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (storage → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Convert source text of this format into storage markup
    fn parse(&self, _source: &str) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Convert storage markup into this format
    fn serialize(&self, _storage: &str) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
