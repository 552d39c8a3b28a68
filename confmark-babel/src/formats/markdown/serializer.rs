//! Storage format → Markdown decompiler
//!
//! A fixed sequence of whole-document rewrites. Each stage runs to completion
//! before the next one starts and later stages assume earlier tags are gone:
//!
//! 1. diagram and code macros, set aside as finished fences
//! 2. headings, h6 down to h1
//! 3. strong/emphasis/code/anchors
//! 4. external images
//! 5. list items and list wrappers
//! 6. blockquotes
//! 7. tables
//! 8. paragraphs
//! 9. every remaining tag (other CDATA bodies are kept as text)
//! 10. entity decoding
//! 11. blank-line collapsing and trimming
//! 12. fences put back
//!
//! Fence bodies skip stages 2 to 11, so code containing `<`, `&amp;` or
//! `**` comes back byte for byte.
//!
//! The result is lossy. Vendor macros without a dedicated stage degrade to
//! their text content.

use crate::common::inline;
use crate::common::macros::{MacroNames, MacroPatterns};
use crate::common::markup;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static HEADINGS: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    (1..=6)
        .rev()
        .map(|level| {
            let pattern = format!(r"(?s)<h{level}(?:\s[^>]*)?>(.*?)</h{level}>");
            let replacement = format!("{} ${{1}}\n", "#".repeat(level));
            (
                Regex::new(&pattern).expect("valid heading regex"),
                replacement,
            )
        })
        .collect()
});

static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<li(?:\s[^>]*)?>(.*?)</li>").expect("valid list item regex"));

static LIST_WRAPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[uo]l(?:\s[^>]*)?>").expect("valid list wrapper regex"));

static BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<blockquote(?:\s[^>]*)?>(.*?)</blockquote>").expect("valid blockquote regex")
});

static TABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<table(?:\s[^>]*)?>.*?</table>").expect("valid table regex"));

static ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<tr(?:\s[^>]*)?>(.*?)</tr>").expect("valid row regex"));

static CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<t[hd](?:\s[^>]*)?>(.*?)</t[hd]>").expect("valid cell regex"));

static PARAGRAPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<p(?:\s[^>]*)?>(.*?)</p>").expect("valid paragraph regex"));

/// Stand-in for a set-aside fence. U+E000 is a private-use character.
static FENCE_SLOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x{E000}(\d+)\x{E000}").expect("valid fence slot regex"));

static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("valid newline regex"));

/// Decompile storage markup using the default macro names.
pub fn storage_to_markdown(markup: &str) -> String {
    decompile(markup, MacroPatterns::defaults())
}

/// Decompile storage markup, recognizing macros by the given names.
pub fn storage_to_markdown_with(markup: &str, macros: &MacroNames) -> String {
    decompile(markup, &MacroPatterns::new(macros))
}

fn decompile(markup: &str, macros: &MacroPatterns) -> String {
    let mut fences = Vec::new();
    let mut content = macros.to_fences(markup, |fence| {
        fences.push(fence);
        format!("\u{E000}{}\u{E000}", fences.len() - 1)
    });

    for (pattern, replacement) in HEADINGS.iter() {
        content = pattern
            .replace_all(&content, replacement.as_str())
            .into_owned();
    }

    content = inline::from_storage_inline(&content);

    content = LIST_ITEM.replace_all(&content, "- ${1}\n").into_owned();
    content = LIST_WRAPPER.replace_all(&content, "").into_owned();

    content = BLOCKQUOTE.replace_all(&content, "> ${1}\n").into_owned();

    content = TABLE
        .replace_all(&content, |caps: &Captures| table_to_markdown(&caps[0]))
        .into_owned();

    content = PARAGRAPH.replace_all(&content, "${1}\n").into_owned();

    let content = markup::unwrap_cdata(&content);
    let content = markup::strip_tags(&content);
    let content = markup::decode_entities(&content);
    let content = EXCESS_NEWLINES.replace_all(&content, "\n\n");

    restore_fences(content.trim(), &fences)
}

fn restore_fences(text: &str, fences: &[String]) -> String {
    FENCE_SLOT
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|slot| fences.get(slot))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}

/// One storage table → a pipe table with a `---` separator after the first row.
fn table_to_markdown(table: &str) -> String {
    let mut lines = Vec::new();
    for (index, row) in ROW.captures_iter(table).enumerate() {
        let cells: Vec<String> = CELL
            .captures_iter(&row[1])
            .map(|cell| markup::strip_tags(&cell[1]).trim().to_string())
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
        if index == 0 {
            lines.push(format!("|{}|", vec!["---"; cells.len()].join("|")));
        }
    }
    lines.join("\n") + "\n"
}
