//! Free-form edits: exact-substring replacement and whole-document insertion.
//!
//! These are the escape hatch for changes the table editor cannot express.

use crate::common::macros::MacroNames;
use crate::error::EditError;
use crate::formats::markdown::parser::markdown_to_storage_with;
use crate::table::content::{content_kind, ContentKind};
use tracing::debug;

/// Where [`insert_content`] puts the new block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPosition {
    Prepend,
    #[default]
    Append,
}

/// Replace the first literal occurrence of `old` with `new`.
///
/// `new` is compiled from Markdown unless it is blank or already starts with a
/// tag.
pub fn patch(doc: &str, old: &str, new: &str) -> Result<String, EditError> {
    patch_with(doc, old, new, &MacroNames::default())
}

pub fn patch_with(doc: &str, old: &str, new: &str, macros: &MacroNames) -> Result<String, EditError> {
    if old.is_empty() {
        return Err(EditError::NoMatch);
    }
    let start = doc.find(old).ok_or(EditError::NoMatch)?;

    let replacement = if new.trim().is_empty() || content_kind(new) == ContentKind::Markup {
        new.to_string()
    } else {
        markdown_to_storage_with(new, macros)
    };

    debug!(at = start, removed = old.len(), inserted = replacement.len(), "patching");
    let mut out = String::with_capacity(doc.len() - old.len() + replacement.len());
    out.push_str(&doc[..start]);
    out.push_str(&replacement);
    out.push_str(&doc[start + old.len()..]);
    Ok(out)
}

/// Compile `markdown` and add it before or after the existing content.
pub fn insert_content(
    doc: &str,
    markdown: &str,
    position: InsertPosition,
    macros: &MacroNames,
) -> String {
    let block = markdown_to_storage_with(markdown, macros);
    match position {
        InsertPosition::Prepend => block + doc,
        InsertPosition::Append => format!("{doc}{block}"),
    }
}
