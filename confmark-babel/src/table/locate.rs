//! Table, row and cell spans.
//!
//! Every span is an absolute byte range into the document that was scanned, so
//! a located region can be spliced without re-scanning its parents. Matching
//! is lazy and non-nesting: a table inside a cell closes its parent early.

use crate::common::markup;
use crate::error::EditError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static TABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)(<table(?:\s[^>]*)?>).*?</table>").expect("valid table regex")
});

static ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(<tr(?:\s[^>]*)?>)(.*?)</tr>").expect("valid row regex"));

static CELL_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(t[hd])((?:\s[^>]*?)?)(/?)>").expect("valid cell regex"));

static TBODY_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<tbody(?:\s[^>]*)?>").expect("valid tbody regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Position among all tables of the document.
    pub index: usize,
    pub span: Range<usize>,
    pub open_tag: Range<usize>,
}

/// Whether a row takes part in column edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Simple,
    /// A banner row: column edits adjust its `colspan` instead of its cells.
    Merged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRef {
    /// Position within its table.
    pub index: usize,
    pub span: Range<usize>,
    pub open_tag: Range<usize>,
    pub content: Range<usize>,
    /// The first cell is a `th`.
    pub is_header: bool,
    pub kind: RowKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellTag {
    Header,
    Data,
}

impl CellTag {
    pub fn name(self) -> &'static str {
        match self {
            CellTag::Header => "th",
            CellTag::Data => "td",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRef {
    /// Position within its row.
    pub index: usize,
    pub tag: CellTag,
    pub span: Range<usize>,
    pub open_tag: Range<usize>,
    /// Inner markup. Empty and positioned at the end of the tag for `<td/>`.
    pub content: Range<usize>,
    pub attributes: Vec<(String, String)>,
}

impl CellRef {
    pub fn is_self_closing(&self) -> bool {
        self.span.end == self.open_tag.end
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// All tables of `doc`, in encounter order.
pub fn list_tables(doc: &str) -> Vec<TableRef> {
    TABLE
        .captures_iter(doc)
        .enumerate()
        .filter_map(|(index, caps)| {
            Some(TableRef {
                index,
                span: caps.get(0)?.range(),
                open_tag: caps.get(1)?.range(),
            })
        })
        .collect()
}

/// All rows of `table`, with header and merge classification.
pub fn rows(doc: &str, table: &TableRef) -> Vec<RowRef> {
    let base = table.span.start;
    ROW.captures_iter(&doc[table.span.clone()])
        .enumerate()
        .filter_map(|(index, caps)| {
            let whole = caps.get(0)?.range();
            let open = caps.get(1)?.range();
            let content = caps.get(2)?.range();
            let mut row = RowRef {
                index,
                span: shift(whole, base),
                open_tag: shift(open, base),
                content: shift(content, base),
                is_header: false,
                kind: RowKind::Simple,
            };
            let cells = cells(doc, &row);
            row.is_header = cells.first().map(|c| c.tag) == Some(CellTag::Header);
            row.kind = classify_row(doc, &cells);
            Some(row)
        })
        .collect()
}

/// All `th`/`td` cells of `row`, in document order.
///
/// A cell ends at the first closing tag with its own name. An opening tag
/// without a matching close is skipped.
pub fn cells(doc: &str, row: &RowRef) -> Vec<CellRef> {
    let base = row.content.start;
    let text = &doc[row.content.clone()];
    let mut found = Vec::new();
    let mut at = 0;

    while let Some(caps) = CELL_OPEN.captures_at(text, at) {
        let (Some(open), Some(name), Some(slash)) = (caps.get(0), caps.get(1), caps.get(3)) else {
            break;
        };
        let tag = if name.as_str() == "th" {
            CellTag::Header
        } else {
            CellTag::Data
        };

        let (content, end) = if slash.is_empty() {
            let close = format!("</{}>", tag.name());
            match text[open.end()..].find(&close) {
                Some(offset) => {
                    let content_end = open.end() + offset;
                    (open.end()..content_end, content_end + close.len())
                }
                None => {
                    at = open.end();
                    continue;
                }
            }
        } else {
            (open.end()..open.end(), open.end())
        };

        found.push(CellRef {
            index: found.len(),
            tag,
            span: shift(open.start()..end, base),
            open_tag: shift(open.range(), base),
            content: shift(content, base),
            attributes: markup::attributes(open.as_str()),
        });
        at = end;
    }

    found
}

/// Banner heuristic: the first cell spans columns and the row has at most two
/// cells. A genuine two-column row whose first cell spans is misclassified.
pub fn classify_row(doc: &str, cells: &[CellRef]) -> RowKind {
    match cells.first() {
        Some(first) if cells.len() <= 2 && colspan(doc, first).is_some() => RowKind::Merged,
        _ => RowKind::Simple,
    }
}

/// The row markup mentions `colspan` or `rowspan`.
pub fn row_has_span(row_text: &str) -> bool {
    let lower = row_text.to_ascii_lowercase();
    lower.contains("colspan") || lower.contains("rowspan")
}

pub fn row_has_rowspan(row_text: &str) -> bool {
    row_text.to_ascii_lowercase().contains("rowspan")
}

/// Numeric `colspan` of a cell and the absolute range of its value.
pub fn colspan(doc: &str, cell: &CellRef) -> Option<(Range<usize>, usize)> {
    let open = &doc[cell.open_tag.clone()];
    let range = markup::attribute_value_range(open, "colspan")?;
    let value = open[range.clone()].trim().parse().ok()?;
    Some((shift(range, cell.open_tag.start), value))
}

/// Where a row goes in a table that has none: just inside `<tbody>` when
/// present, otherwise right after the `<table>` tag.
pub fn empty_table_insertion_point(doc: &str, table: &TableRef) -> usize {
    TBODY_OPEN
        .find(&doc[table.span.clone()])
        .map(|tbody| table.span.start + tbody.end())
        .unwrap_or(table.open_tag.end)
}

pub fn table_at(doc: &str, index: usize) -> Result<TableRef, EditError> {
    let mut tables = list_tables(doc);
    let count = tables.len();
    if index >= count {
        return Err(EditError::TableOutOfRange { index, count });
    }
    Ok(tables.swap_remove(index))
}

pub fn row_at(rows: &[RowRef], index: usize) -> Result<&RowRef, EditError> {
    rows.get(index).ok_or(EditError::RowOutOfRange {
        index,
        count: rows.len(),
    })
}

fn shift(range: Range<usize>, by: usize) -> Range<usize> {
    range.start + by..range.end + by
}
