//! One-line overviews of the tables in a document, for choosing an index.

use super::locate;
use crate::common::markup;
use serde::Serialize;

const HEADER_CELL_CHARS: usize = 30;
const PREVIEW_CELLS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub index: usize,
    /// Text of the first row that has cells, each cell cut to 30 characters.
    pub header_row: Vec<String>,
    pub row_count: usize,
    pub col_count: usize,
    /// The first five header cells joined with ` | `, `...` if there are more.
    pub preview: String,
}

pub fn summarize_tables(doc: &str) -> Vec<TableSummary> {
    locate::list_tables(doc)
        .iter()
        .map(|table| {
            let rows = locate::rows(doc, table);
            let header_row: Vec<String> = rows
                .iter()
                .map(|row| locate::cells(doc, row))
                .find(|cells| !cells.is_empty())
                .map(|cells| {
                    cells
                        .iter()
                        .map(|cell| {
                            markup::strip_tags(&doc[cell.content.clone()])
                                .trim()
                                .chars()
                                .take(HEADER_CELL_CHARS)
                                .collect()
                        })
                        .collect()
                })
                .unwrap_or_default();

            let mut preview = header_row
                .iter()
                .take(PREVIEW_CELLS)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" | ");
            if header_row.len() > PREVIEW_CELLS {
                preview.push_str("...");
            }

            TableSummary {
                index: table.index,
                row_count: rows.len(),
                col_count: header_row.len(),
                header_row,
                preview,
            }
        })
        .collect()
}
