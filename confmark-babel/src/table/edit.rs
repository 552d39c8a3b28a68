//! Structural table edits.
//!
//! Each operation locates its target, collects a list of [`Splice`]s in
//! document order and applies them in one pass over the untouched input. Bytes
//! outside the spliced ranges are copied verbatim, so the result differs from
//! the input only inside the targeted table.

use super::content::process_cell_content;
use super::locate::{self, CellRef, CellTag, RowKind, RowRef};
use crate::common::markup;
use crate::error::EditError;
use std::ops::Range;
use tracing::{debug, warn};

/// Replace `range` of the input with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Splice {
    range: Range<usize>,
    text: String,
}

impl Splice {
    fn insert(at: usize, text: String) -> Self {
        Self { range: at..at, text }
    }

    fn remove(range: Range<usize>) -> Self {
        Self {
            range,
            text: String::new(),
        }
    }
}

/// Splices must be sorted and non-overlapping.
fn apply(doc: &str, splices: &[Splice]) -> String {
    let extra: usize = splices.iter().map(|s| s.text.len()).sum();
    let mut out = String::with_capacity(doc.len() + extra);
    let mut cursor = 0;
    for splice in splices {
        debug_assert!(splice.range.start >= cursor, "overlapping splices");
        out.push_str(&doc[cursor..splice.range.start]);
        out.push_str(&splice.text);
        cursor = splice.range.end;
    }
    out.push_str(&doc[cursor..]);
    out
}

/// Widest simple row of the table, or `None` when every row is a banner.
fn column_count(doc: &str, rows: &[RowRef]) -> Option<usize> {
    rows.iter()
        .filter(|row| row.kind == RowKind::Simple)
        .map(|row| locate::cells(doc, row).len())
        .max()
}

/// Column edits address cells by physical position. That only matches the
/// logical column when no cell spans rows and only banner rows span columns.
fn ensure_column_grid(doc: &str, table_index: usize, rows: &[RowRef]) -> Result<(), EditError> {
    for row in rows {
        let text = &doc[row.span.clone()];
        let spans_rows = locate::row_has_rowspan(text);
        if spans_rows || (row.kind == RowKind::Simple && locate::row_has_span(text)) {
            warn!(table = table_index, row = row.index, "refusing column edit across merged cells");
            let reason = if spans_rows {
                "a row-spanning cell (rowspan)"
            } else {
                "a column-spanning cell outside a banner row (colspan)"
            };
            return Err(EditError::UnsupportedStructure(format!(
                "row {} contains {reason}",
                row.index
            )));
        }
    }
    Ok(())
}

fn colspan_splice(doc: &str, cell: &CellRef, delta: isize) -> Option<Splice> {
    let (range, value) = locate::colspan(doc, cell)?;
    let updated = value.checked_add_signed(delta).filter(|v| *v >= 1)?;
    if updated == value {
        return None;
    }
    Some(Splice {
        range,
        text: updated.to_string(),
    })
}

/// Insert a column before `position` in every row of a table.
///
/// Banner rows widen their `colspan` instead. A header row gets
/// `<th style="…">header_name</th>`, its style taken from `header_style` or
/// the neighbouring cell. A data row gets a `td` holding `default_value` that
/// copies the neighbour's `class`, `style` and `data-highlight-colour`. The
/// neighbour is the cell left of the insertion point, or the first cell.
/// Tables with any other spanning cell are refused.
pub fn insert_column(
    doc: &str,
    table_index: usize,
    position: usize,
    header_name: &str,
    default_value: &str,
    header_style: Option<&str>,
) -> Result<String, EditError> {
    let table = locate::table_at(doc, table_index)?;
    let rows = locate::rows(doc, &table);
    if let Some(count) = column_count(doc, &rows) {
        if position > count {
            return Err(EditError::ColumnOutOfRange {
                index: position,
                count,
            });
        }
    }
    ensure_column_grid(doc, table_index, &rows)?;

    let mut splices = Vec::new();
    for row in &rows {
        let cells = locate::cells(doc, row);
        if cells.is_empty() {
            continue;
        }

        if row.kind == RowKind::Merged {
            debug!(row = row.index, "widening banner row");
            splices.extend(colspan_splice(doc, &cells[0], 1));
            continue;
        }

        let insert_at = position.min(cells.len());
        let reference = &cells[insert_at.saturating_sub(1)];
        let cell = if row.is_header {
            let style = header_style
                .map(|style| markup::escape(style).into_owned())
                .or_else(|| reference.attribute("style").map(str::to_string))
                .unwrap_or_default();
            header_cell(&style, header_name)
        } else {
            data_cell(reference, default_value)
        };

        let at = if insert_at == 0 {
            row.content.start
        } else if insert_at >= cells.len() {
            row.content.end
        } else {
            cells[insert_at].span.start
        };
        splices.push(Splice::insert(at, cell));
    }

    debug!(table = table_index, position, splices = splices.len(), "inserting column");
    Ok(apply(doc, &splices))
}

fn header_cell(style: &str, name: &str) -> String {
    let name = markup::escape(name);
    if style.is_empty() {
        format!("<th>{name}</th>")
    } else {
        format!(r#"<th style="{style}">{name}</th>"#)
    }
}

fn data_cell(reference: &CellRef, value: &str) -> String {
    let mut cell = String::from("<td");
    for name in ["class", "style", "data-highlight-colour"] {
        if let Some(value) = reference.attribute(name).filter(|v| !v.is_empty()) {
            cell.push_str(&format!(r#" {name}="{value}""#));
        }
    }
    cell.push('>');
    cell.push_str(&markup::escape(value));
    cell.push_str("</td>");
    cell
}

/// Remove the cell at `position` from every row of a table.
///
/// Banner rows shrink their `colspan` (never below 1). Rows too short to
/// have the column are left alone. Tables with any other spanning cell are
/// refused.
pub fn delete_column(doc: &str, table_index: usize, position: usize) -> Result<String, EditError> {
    let table = locate::table_at(doc, table_index)?;
    let rows = locate::rows(doc, &table);
    if let Some(count) = column_count(doc, &rows) {
        if position >= count {
            return Err(EditError::ColumnOutOfRange {
                index: position,
                count,
            });
        }
    }
    ensure_column_grid(doc, table_index, &rows)?;

    let mut splices = Vec::new();
    for row in &rows {
        let cells = locate::cells(doc, row);
        if cells.is_empty() {
            continue;
        }

        if row.kind == RowKind::Merged {
            debug!(row = row.index, "narrowing banner row");
            splices.extend(colspan_splice(doc, &cells[0], -1));
            continue;
        }

        if let Some(cell) = cells.get(position) {
            splices.push(Splice::remove(cell.span.clone()));
        }
    }

    debug!(table = table_index, position, splices = splices.len(), "deleting column");
    Ok(apply(doc, &splices))
}

/// Insert one row built from `values` before the row at `position`, or after
/// the last row when `position` equals the row count.
pub fn insert_row<S: AsRef<str>>(
    doc: &str,
    table_index: usize,
    position: usize,
    values: &[S],
    is_header: bool,
) -> Result<String, EditError> {
    let table = locate::table_at(doc, table_index)?;
    let rows = locate::rows(doc, &table);
    if position > rows.len() {
        return Err(EditError::RowOutOfRange {
            index: position,
            count: rows.len(),
        });
    }

    let tag = if is_header {
        CellTag::Header
    } else {
        CellTag::Data
    };
    let tag = tag.name();
    let cells: String = values
        .iter()
        .map(|value| format!("<{tag}>{}</{tag}>", process_cell_content(value.as_ref())))
        .collect();
    let row = format!("<tr>{cells}</tr>");

    let at = match rows.get(position) {
        Some(next) => next.span.start,
        None => match rows.last() {
            Some(last) => last.span.end,
            None => locate::empty_table_insertion_point(doc, &table),
        },
    };

    debug!(table = table_index, position, at, "inserting row");
    Ok(apply(doc, &[Splice::insert(at, row)]))
}

/// Remove the row at `row_index`. Rows with a `rowspan` are refused: the
/// rows below would lose the cell they share. So are rows with a `colspan`
/// outside a banner, whose cells do not line up with the columns.
pub fn delete_row(doc: &str, table_index: usize, row_index: usize) -> Result<String, EditError> {
    let table = locate::table_at(doc, table_index)?;
    let rows = locate::rows(doc, &table);
    let row = locate::row_at(&rows, row_index)?;
    let text = &doc[row.span.clone()];

    if locate::row_has_rowspan(text) {
        warn!(table = table_index, row = row_index, "refusing to delete row with rowspan");
        return Err(EditError::UnsupportedStructure(format!(
            "row {row_index} contains a row-spanning cell (rowspan)"
        )));
    }
    if row.kind == RowKind::Simple && locate::row_has_span(text) {
        warn!(table = table_index, row = row_index, "refusing to delete row with colspan");
        return Err(EditError::UnsupportedStructure(format!(
            "row {row_index} contains a column-spanning cell outside a banner row (colspan)"
        )));
    }

    debug!(table = table_index, row = row_index, "deleting row");
    Ok(apply(doc, &[Splice::remove(row.span.clone())]))
}

/// Replace, or append to, the content of one cell. The cell keeps its tag and
/// attributes. Rows with merged cells are refused because the column index is
/// ambiguous there.
pub fn update_cell(
    doc: &str,
    table_index: usize,
    row_index: usize,
    column_index: usize,
    content: &str,
    append: bool,
) -> Result<String, EditError> {
    let table = locate::table_at(doc, table_index)?;
    let rows = locate::rows(doc, &table);
    let row = locate::row_at(&rows, row_index)?;

    if locate::row_has_span(&doc[row.span.clone()]) {
        warn!(table = table_index, row = row_index, "refusing to update cell in merged row");
        return Err(EditError::UnsupportedStructure(format!(
            "row {row_index} contains merged cells (colspan/rowspan)"
        )));
    }

    let cells = locate::cells(doc, row);
    let cell = cells.get(column_index).ok_or(EditError::ColumnOutOfRange {
        index: column_index,
        count: cells.len(),
    })?;

    let processed = process_cell_content(content);
    let splice = if cell.is_self_closing() {
        Splice {
            range: cell.span.clone(),
            text: expand_self_closing(doc, cell, &processed),
        }
    } else if append {
        Splice::insert(cell.content.end, processed)
    } else {
        Splice {
            range: cell.content.clone(),
            text: processed,
        }
    };

    debug!(table = table_index, row = row_index, column = column_index, append, "updating cell");
    Ok(apply(doc, &[splice]))
}

/// `<td class="x"/>` → `<td class="x">content</td>`.
fn expand_self_closing(doc: &str, cell: &CellRef, content: &str) -> String {
    let open = doc[cell.open_tag.clone()]
        .trim_end_matches('>')
        .trim_end_matches('/')
        .trim_end();
    format!("{open}>{content}</{}>", cell.tag.name())
}
