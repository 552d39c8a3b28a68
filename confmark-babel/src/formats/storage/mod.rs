//! Storage format
//!
//! The hub every other format converts through. Parsing and serializing are
//! the identity: the markup is opaque and passed along byte for byte.

use crate::error::FormatError;
use crate::format::Format;

/// Format implementation for storage markup
#[derive(Debug, Clone, Copy, Default)]
pub struct StorageFormat;

impl Format for StorageFormat {
    fn name(&self) -> &str {
        "storage"
    }

    fn description(&self) -> &str {
        "XHTML-based storage format with vendor macros"
    }

    fn file_extensions(&self) -> &[&str] {
        &["xhtml", "storage", "html"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<String, FormatError> {
        Ok(source.to_string())
    }

    fn serialize(&self, storage: &str) -> Result<String, FormatError> {
        Ok(storage.to_string())
    }
}
