//! Markdown → storage format compiler
//!
//! Input is read one line at a time. Each line is classified into a
//! [`LineEvent`] and fed to a small state machine whose [`Mode`] tracks the one
//! multi-line construct that can be open at a time: a fenced block, a table,
//! or a list. Everything else maps to a single output block.
//!
//! Output blocks are joined with `\n`. Raw text is HTML-escaped before inline
//! formatting so literal `<`, `&` and `>` are never reinterpreted as markup.
//! Fenced block bodies are the exception: they are embedded verbatim inside a
//! CDATA section.

use crate::common::inline;
use crate::common::macros::{BlockKind, MacroNames};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s").expect("valid ordered item regex"));

static UNORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*]\s").expect("valid unordered item regex"));

/// List flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// One classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent<'a> {
    /// A line starting with three backticks; carries the info string.
    Fence(&'a str),
    /// A pipe row made only of `-`, `:` and spaces.
    TableSeparator,
    TableRow(Vec<&'a str>),
    ListItem(ListKind, &'a str),
    Heading(usize, &'a str),
    Quote(&'a str),
    Blank,
    Text(&'a str),
}

/// Classify a single line of Markdown.
pub fn classify(line: &str) -> LineEvent<'_> {
    let stripped = line.trim();

    if let Some(info) = stripped.strip_prefix("```") {
        return LineEvent::Fence(info.trim());
    }

    if stripped.starts_with('|') && stripped.ends_with('|') {
        let inner = stripped
            .get(1..stripped.len().saturating_sub(1))
            .unwrap_or_default();
        let cells: Vec<&str> = inner.split('|').map(str::trim).collect();
        if cells
            .iter()
            .all(|cell| cell.chars().all(|c| matches!(c, '-' | ':' | ' ')))
        {
            return LineEvent::TableSeparator;
        }
        return LineEvent::TableRow(cells);
    }

    if stripped.is_empty() {
        return LineEvent::Blank;
    }

    for level in (1..=6).rev() {
        let marker = format!("{} ", "#".repeat(level));
        if let Some(text) = line.strip_prefix(marker.as_str()) {
            return LineEvent::Heading(level, text);
        }
    }

    if let Some(text) = line.strip_prefix("> ") {
        return LineEvent::Quote(text);
    }

    if let Some(marker) = UNORDERED_ITEM.find(stripped) {
        return LineEvent::ListItem(ListKind::Unordered, &stripped[marker.end()..]);
    }
    if let Some(marker) = ORDERED_ITEM.find(stripped) {
        return LineEvent::ListItem(ListKind::Ordered, &stripped[marker.end()..]);
    }

    LineEvent::Text(stripped)
}

/// Which multi-line construct is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    None,
    CodeBlock,
    Table,
    List(ListKind),
}

struct Compiler<'a> {
    macros: &'a MacroNames,
    mode: Mode,
    fence_language: String,
    code_lines: Vec<&'a str>,
    out: Vec<String>,
}

impl<'a> Compiler<'a> {
    fn new(macros: &'a MacroNames) -> Self {
        Self {
            macros,
            mode: Mode::None,
            fence_language: String::new(),
            code_lines: Vec::new(),
            out: Vec::new(),
        }
    }

    fn feed(&mut self, line: &'a str) {
        let event = classify(line);

        if self.mode == Mode::CodeBlock {
            match event {
                LineEvent::Fence(_) => self.close_code_block(),
                _ => self.code_lines.push(line),
            }
            return;
        }

        match event {
            LineEvent::Fence(info) => {
                self.close_container();
                self.fence_language = info.to_lowercase();
                self.code_lines.clear();
                self.enter(Mode::CodeBlock);
            }
            LineEvent::TableSeparator => {
                // Alignment rows carry no content; they only end an open list.
                if matches!(self.mode, Mode::List(_)) {
                    self.close_container();
                }
            }
            LineEvent::TableRow(cells) => {
                let tag = if self.mode == Mode::Table {
                    "td"
                } else {
                    self.close_container();
                    self.out.push("<table><tbody>".to_string());
                    self.enter(Mode::Table);
                    "th"
                };
                let row: String = cells
                    .iter()
                    .map(|cell| format!("<{tag}>{}</{tag}>", inline::escape_and_format(cell)))
                    .collect();
                self.out.push(format!("<tr>{row}</tr>"));
            }
            LineEvent::ListItem(kind, text) => {
                if self.mode != Mode::List(kind) {
                    self.close_container();
                    self.out.push(format!("<{}>", kind.tag()));
                    self.enter(Mode::List(kind));
                }
                self.out
                    .push(format!("<li>{}</li>", inline::escape_and_format(text)));
            }
            LineEvent::Blank => self.close_container(),
            LineEvent::Heading(level, text) => {
                self.close_container();
                self.out.push(format!(
                    "<h{level}>{}</h{level}>",
                    inline::escape_and_format(text)
                ));
            }
            LineEvent::Quote(text) => {
                self.close_container();
                self.out.push(format!(
                    "<blockquote><p>{}</p></blockquote>",
                    inline::escape_and_format(text)
                ));
            }
            LineEvent::Text(text) => {
                self.close_container();
                self.out
                    .push(format!("<p>{}</p>", inline::escape_and_format(text)));
            }
        }
    }

    fn enter(&mut self, mode: Mode) {
        trace!(from = ?self.mode, to = ?mode, "compiler mode change");
        self.mode = mode;
    }

    /// Close an open table or list. No-op in any other mode.
    fn close_container(&mut self) {
        match self.mode {
            Mode::Table => self.out.push("</tbody></table>".to_string()),
            Mode::List(kind) => self.out.push(format!("</{}>", kind.tag())),
            Mode::None | Mode::CodeBlock => return,
        }
        self.enter(Mode::None);
    }

    fn close_code_block(&mut self) {
        let body = self.code_lines.join("\n");
        let kind = BlockKind::from_language(&self.fence_language);
        self.out.push(self.macros.render(kind, &body));
        self.code_lines.clear();
        self.fence_language.clear();
        self.enter(Mode::None);
    }

    fn finish(mut self) -> String {
        if self.mode == Mode::CodeBlock {
            self.close_code_block();
        }
        self.close_container();
        self.out.join("\n")
    }
}

/// Compile Markdown into storage markup using the default macro names.
pub fn markdown_to_storage(source: &str) -> String {
    markdown_to_storage_with(source, &MacroNames::default())
}

/// Compile Markdown into storage markup.
pub fn markdown_to_storage_with(source: &str, macros: &MacroNames) -> String {
    let mut compiler = Compiler::new(macros);
    for line in source.lines() {
        compiler.feed(line);
    }
    compiler.finish()
}
