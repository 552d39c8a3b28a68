//! A single edit request, as data.

use crate::common::macros::MacroNames;
use crate::error::EditError;
use crate::patch::{self, InsertPosition};
use crate::table;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    InsertColumn {
        table: usize,
        position: usize,
        header_name: String,
        default_value: String,
        header_style: Option<String>,
    },
    DeleteColumn {
        table: usize,
        position: usize,
    },
    InsertRow {
        table: usize,
        position: usize,
        values: Vec<String>,
        is_header: bool,
    },
    DeleteRow {
        table: usize,
        row: usize,
    },
    UpdateCell {
        table: usize,
        row: usize,
        column: usize,
        content: String,
        append: bool,
    },
    Patch {
        old: String,
        new: String,
    },
    InsertContent {
        markdown: String,
        position: InsertPosition,
    },
}

impl EditOp {
    /// Run the edit against `doc`. `macros` only matters for Markdown that
    /// gets compiled along the way.
    pub fn apply_to(&self, doc: &str, macros: &MacroNames) -> Result<String, EditError> {
        match self {
            EditOp::InsertColumn {
                table,
                position,
                header_name,
                default_value,
                header_style,
            } => table::insert_column(
                doc,
                *table,
                *position,
                header_name,
                default_value,
                header_style.as_deref(),
            ),
            EditOp::DeleteColumn { table, position } => {
                table::delete_column(doc, *table, *position)
            }
            EditOp::InsertRow {
                table,
                position,
                values,
                is_header,
            } => table::insert_row(doc, *table, *position, values, *is_header),
            EditOp::DeleteRow { table, row } => table::delete_row(doc, *table, *row),
            EditOp::UpdateCell {
                table,
                row,
                column,
                content,
                append,
            } => table::update_cell(doc, *table, *row, *column, content, *append),
            EditOp::Patch { old, new } => patch::patch_with(doc, old, new, macros),
            EditOp::InsertContent { markdown, position } => {
                Ok(patch::insert_content(doc, markdown, *position, macros))
            }
        }
    }

    /// Human-readable summary of a successful edit.
    pub fn describe(&self) -> String {
        match self {
            EditOp::InsertColumn {
                table,
                position,
                header_name,
                ..
            } => format!("inserted column '{header_name}' at position {position} of table {table}"),
            EditOp::DeleteColumn { table, position } => {
                format!("deleted column {position} of table {table}")
            }
            EditOp::InsertRow { table, position, .. } => {
                format!("inserted row at position {position} of table {table}")
            }
            EditOp::DeleteRow { table, row } => format!("deleted row {row} of table {table}"),
            EditOp::UpdateCell {
                table,
                row,
                column,
                append,
                ..
            } => {
                let verb = if *append { "appended to" } else { "updated" };
                format!("{verb} row {row}, column {column} of table {table}")
            }
            EditOp::Patch { .. } => "replaced the exact fragment".to_string(),
            EditOp::InsertContent { position, .. } => match position {
                InsertPosition::Prepend => "prepended content".to_string(),
                InsertPosition::Append => "appended content".to_string(),
            },
        }
    }
}
