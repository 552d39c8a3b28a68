//! Minimal-diff and index-bound properties over generated tables.

use confmark_babel::table::{delete_column, delete_row, insert_column, insert_row, update_cell};
use confmark_babel::EditError;
use proptest::prelude::*;

fn build_table(rows: usize, cols: usize) -> String {
    let mut table = String::from(r#"<table class="wrapped"><tbody>"#);
    for r in 0..rows {
        table.push_str("<tr>");
        for c in 0..cols {
            if r == 0 {
                table.push_str(&format!(r#"<th style="w{c}">h{c}</th>"#));
            } else {
                table.push_str(&format!("<td>r{r}c{c}</td>"));
            }
        }
        table.push_str("</tr>");
    }
    table.push_str("</tbody></table>");
    table
}

fn surrounding() -> impl Strategy<Value = String> {
    "[a-z .\n]{0,40}".prop_map(|text| format!("<p>{text}</p>"))
}

proptest! {
    #[test]
    fn edits_leave_surroundings_untouched(
        prefix in surrounding(),
        suffix in surrounding(),
        rows in 1usize..5,
        cols in 1usize..5,
        row_seed in 0usize..100,
        col_seed in 0usize..100,
        op in 0usize..5,
    ) {
        let doc = format!("{prefix}{}{suffix}", build_table(rows, cols));
        let row = row_seed % rows;
        let col = col_seed % cols;

        let out = match op {
            0 => insert_column(&doc, 0, col, "New", "v", None),
            1 => delete_column(&doc, 0, col),
            2 => insert_row(&doc, 0, row, &["x", "**y**"], false),
            3 => delete_row(&doc, 0, row),
            _ => update_cell(&doc, 0, row, col, "`z`", false),
        };
        let out = out.expect("in-range edit succeeds");

        prop_assert!(out.starts_with(&prefix));
        prop_assert!(out.ends_with(&suffix));
        prop_assert_ne!(&out, &doc);
    }

    #[test]
    fn out_of_range_indexes_are_errors(
        rows in 1usize..5,
        cols in 1usize..5,
        extra in 0usize..5,
    ) {
        let doc = build_table(rows, cols);

        prop_assert_eq!(
            delete_row(&doc, 1 + extra, 0),
            Err(EditError::TableOutOfRange { index: 1 + extra, count: 1 })
        );
        prop_assert_eq!(
            delete_row(&doc, 0, rows + extra),
            Err(EditError::RowOutOfRange { index: rows + extra, count: rows })
        );
        prop_assert_eq!(
            insert_row(&doc, 0, rows + 1 + extra, &["x"], false),
            Err(EditError::RowOutOfRange { index: rows + 1 + extra, count: rows })
        );
        prop_assert_eq!(
            update_cell(&doc, 0, 0, cols + extra, "x", false),
            Err(EditError::ColumnOutOfRange { index: cols + extra, count: cols })
        );
        prop_assert_eq!(
            delete_column(&doc, 0, cols + extra),
            Err(EditError::ColumnOutOfRange { index: cols + extra, count: cols })
        );
        prop_assert_eq!(
            insert_column(&doc, 0, cols + 1 + extra, "x", "", None),
            Err(EditError::ColumnOutOfRange { index: cols + 1 + extra, count: cols })
        );
    }
}
