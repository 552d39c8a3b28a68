//! Table location and minimal-diff table edits on storage markup.
//!
//! No parse tree is built. [`locate`] finds tables, rows and cells as byte
//! ranges into the document, and [`edit`] splices new text into exactly those
//! ranges. Everything outside the targeted table is returned byte for byte.
//!
//! Row and column indexes are 0-based and count header rows: row 0 is usually
//! the header.

pub mod content;
pub mod edit;
pub mod locate;
pub mod summary;

pub use content::{content_kind, process_cell_content, ContentKind};
pub use edit::{delete_column, delete_row, insert_column, insert_row, update_cell};
pub use locate::{list_tables, CellRef, CellTag, RowKind, RowRef, TableRef};
pub use summary::{summarize_tables, TableSummary};
