//! Markdown format implementation
//!
//! Bidirectional, line-oriented conversion between Markdown and the storage
//! format. No Markdown AST is built: the compiler is a single pass over input
//! lines and the decompiler is an ordered list of regex rewrites.
//!
//! # Element Mapping Table
//!
//! | Markdown                | Storage format                                   | Notes                                 |
//! |-------------------------|--------------------------------------------------|---------------------------------------|
//! | `#`..`######` heading   | `<h1>`..`<h6>`                                   | Checked from 6 down to 1              |
//! | Paragraph line          | `<p>`                                            | One `<p>` per line                    |
//! | `> quote`               | `<blockquote><p>`                                | Single line only                      |
//! | `- item` / `1. item`    | `<ul>` / `<ol>` + `<li>`                         | Kind change reopens the wrapper       |
//! | Pipe table              | `<table><tbody>` + `<tr>`                        | First row `th`, rest `td`             |
//! | Fenced block            | `ac:structured-macro` with CDATA body            | mermaid / plantuml / code             |
//! | `**b**` `*i*` `` `c` `` | `<strong>` `<em>` `<code>`                       |                                       |
//! | `[t](u)` / `![a](u)`    | `<a href>` / `<ac:image><ri:url>`                | Alt text is dropped                   |
//!
//! # Lossy Conversions
//!
//! - Ordered lists come back as `-` items.
//! - Cell formatting inside tables is stripped to plain text.
//! - Attachment images and unknown macros degrade to text.
//! - Runs of blank lines collapse to one.

pub mod parser;
pub mod serializer;

use crate::common::macros::MacroNames;
use crate::error::FormatError;
use crate::format::Format;

/// Format implementation for Markdown
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    macros: MacroNames,
}

impl MarkdownFormat {
    /// Use installation-specific macro names in both directions.
    pub fn with_macros(macros: MacroNames) -> Self {
        Self { macros }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown with pipe tables and fenced blocks"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<String, FormatError> {
        Ok(parser::markdown_to_storage_with(source, &self.macros))
    }

    fn serialize(&self, storage: &str) -> Result<String, FormatError> {
        Ok(serializer::storage_to_markdown_with(storage, &self.macros))
    }
}
