//! Structural edits against a realistic page.
//!
//! Expected documents are built by replacing one unique fragment of the input,
//! so every assertion also checks that nothing else changed.

use confmark_babel::table::{delete_column, delete_row, insert_column, insert_row, update_cell};
use confmark_babel::EditError;
use pretty_assertions::assert_eq;

fn page() -> String {
    crate::fixture("page.xhtml")
}

#[test]
fn test_insert_column_scenario() {
    let doc = concat!(
        "<p>before</p><table><tbody>",
        r#"<tr><th style="width: 80px;">A</th><th>B</th></tr>"#,
        r#"<tr><td class="highlight-grey" data-highlight-colour="grey">1</td><td>2</td></tr>"#,
        "</tbody></table><p>after</p>",
    );
    let out = insert_column(doc, 0, 1, "C", "", None).unwrap();
    assert_eq!(
        out,
        concat!(
            "<p>before</p><table><tbody>",
            r#"<tr><th style="width: 80px;">A</th><th style="width: 80px;">C</th><th>B</th></tr>"#,
            r#"<tr><td class="highlight-grey" data-highlight-colour="grey">1</td><td class="highlight-grey" data-highlight-colour="grey"></td><td>2</td></tr>"#,
            "</tbody></table><p>after</p>",
        )
    );
}

const BANNER_TABLE: &str = concat!(
    "<p>x</p><table><tbody>",
    r#"<tr><th colspan="2">Q3 Goals</th></tr>"#,
    r#"<tr><th style="width: 120.0px;">Item</th><th>Status</th></tr>"#,
    r#"<tr><td class="highlight-green" data-highlight-colour="green">Search</td><td>Done</td></tr>"#,
    "</tbody></table>",
);

#[test]
fn test_insert_column_widens_banner() {
    let out = insert_column(BANNER_TABLE, 0, 1, "Owner", "-", None).unwrap();
    let expected = BANNER_TABLE
        .replace(r#"colspan="2""#, r#"colspan="3""#)
        .replace(
            "<th>Status</th>",
            r#"<th style="width: 120.0px;">Owner</th><th>Status</th>"#,
        )
        .replace(
            "<td>Done</td>",
            r#"<td class="highlight-green" data-highlight-colour="green">-</td><td>Done</td>"#,
        );
    assert_eq!(out, expected);
}

#[test]
fn test_delete_column_narrows_banner() {
    let out = delete_column(BANNER_TABLE, 0, 1).unwrap();
    let expected = BANNER_TABLE
        .replace(r#"colspan="2""#, r#"colspan="1""#)
        .replace("<th>Status</th>", "")
        .replace("<td>Done</td>", "");
    assert_eq!(out, expected);
}

#[test]
fn test_column_edits_refuse_rowspan_tables() {
    let doc = concat!(
        "<table><tbody>",
        "<tr><th>Item</th><th>Status</th><th>Notes</th></tr>",
        r#"<tr><td rowspan="2">Billing</td><td>In progress</td><td/></tr>"#,
        "<tr><td>Blocked</td><td>waiting</td></tr>",
        "</tbody></table>",
    );
    let err = insert_column(doc, 0, 1, "Owner", "-", None).unwrap_err();
    assert!(matches!(err, EditError::UnsupportedStructure(_)));
    assert!(err.to_string().contains("rowspan"));
    assert!(matches!(
        delete_column(doc, 0, 2),
        Err(EditError::UnsupportedStructure(_))
    ));

    let page = page();
    assert!(matches!(
        insert_column(&page, 0, 1, "Owner", "-", None),
        Err(EditError::UnsupportedStructure(_))
    ));
    assert!(matches!(
        delete_column(&page, 0, 2),
        Err(EditError::UnsupportedStructure(_))
    ));
}

#[test]
fn test_column_edits_refuse_span_in_wide_row() {
    let doc = concat!(
        "<table>",
        "<tr><th>A</th><th>B</th><th>C</th><th>D</th></tr>",
        r#"<tr><td>1</td><td>2</td><td colspan="2">3</td></tr>"#,
        "</table>",
    );
    let err = delete_column(doc, 0, 3).unwrap_err();
    assert!(matches!(err, EditError::UnsupportedStructure(_)));
    assert!(err.to_string().contains("colspan"));
    assert!(matches!(
        insert_column(doc, 0, 0, "Z", "", None),
        Err(EditError::UnsupportedStructure(_))
    ));
}

#[test]
fn test_insert_column_in_second_table_keeps_page() {
    let page = page();
    let out = insert_column(&page, 1, 1, "Owner", "", None).unwrap();
    let expected = page
        .replace("<th>Risk</th>", "<th>Risk</th><th>Owner</th>")
        .replace("<td>None</td>", "<td>None</td><td></td>");
    assert_eq!(out, expected);
}

#[test]
fn test_column_index_bounds() {
    let page = page();
    assert_eq!(
        delete_column(&page, 0, 3),
        Err(EditError::ColumnOutOfRange { index: 3, count: 3 })
    );
    assert_eq!(
        insert_column(&page, 0, 4, "X", "", None),
        Err(EditError::ColumnOutOfRange { index: 4, count: 3 })
    );
    assert_eq!(
        delete_column(&page, 2, 0),
        Err(EditError::TableOutOfRange { index: 2, count: 2 })
    );
}

#[test]
fn test_delete_row_refuses_rowspan() {
    let page = page();
    let err = delete_row(&page, 0, 3).unwrap_err();
    assert!(matches!(err, EditError::UnsupportedStructure(_)));
    assert_eq!(err.kind(), "unsupported-structure");
    assert!(err.to_string().contains("exact-substring patch"));
}

#[test]
fn test_delete_row() {
    let page = page();
    let out = delete_row(&page, 0, 4).unwrap();
    assert_eq!(
        out,
        page.replace("<tr><td>Blocked</td><td>waiting on API</td></tr>", "")
    );
    assert_eq!(
        delete_row(&page, 1, 2),
        Err(EditError::RowOutOfRange { index: 2, count: 2 })
    );
}

#[test]
fn test_update_cell_replaces_content() {
    let page = page();
    let out = update_cell(&page, 0, 2, 1, "**Shipped**", false).unwrap();
    assert_eq!(
        out,
        page.replace("<td>Done</td>", "<td><strong>Shipped</strong></td>")
    );

    let out = update_cell(&page, 1, 1, 0, "Low", false).unwrap();
    assert_eq!(out, page.replace("<td>None</td>", "<td>Low</td>"));
}

#[test]
fn test_update_cell_appends_and_keeps_attributes() {
    let page = page();
    let out = update_cell(&page, 0, 2, 2, " v2", true).unwrap();
    assert_eq!(
        out,
        page.replace("<td><p>shipped</p></td>", "<td><p>shipped</p> v2</td>")
    );

    let out = update_cell(&page, 0, 2, 0, "Find", false).unwrap();
    assert_eq!(
        out,
        page.replace(r#"green">Search</td>"#, r#"green">Find</td>"#)
    );
}

#[test]
fn test_update_cell_refuses_merged_rows() {
    let page = page();
    for row in [0, 3] {
        assert!(matches!(
            update_cell(&page, 0, row, 0, "x", false),
            Err(EditError::UnsupportedStructure(_))
        ));
    }
    assert_eq!(
        update_cell(&page, 0, 1, 5, "x", false),
        Err(EditError::ColumnOutOfRange { index: 5, count: 3 })
    );
}

#[test]
fn test_insert_row_positions() {
    let page = page();

    let out = insert_row(&page, 1, 1, &["Scope creep"], false).unwrap();
    assert_eq!(
        out,
        page.replace(
            "<tr><td>None</td></tr>",
            "<tr><td>Scope creep</td></tr><tr><td>None</td></tr>"
        )
    );

    let out = insert_row(&page, 1, 2, &["[image:risk.png]"], false).unwrap();
    assert_eq!(
        out,
        page.replace(
            "<tr><td>None</td></tr>",
            r#"<tr><td>None</td></tr><tr><td><ac:image><ri:attachment ri:filename="risk.png"/></ac:image></td></tr>"#
        )
    );

    let out = insert_row(&page, 0, 0, &["X"], true).unwrap();
    assert_eq!(
        out,
        page.replace(
            "<tbody>\n<tr><th colspan",
            "<tbody>\n<tr><th>X</th></tr><tr><th colspan"
        )
    );

    assert_eq!(
        insert_row(&page, 1, 3, &["x"], false),
        Err(EditError::RowOutOfRange { index: 3, count: 2 })
    );
}

#[test]
fn test_insert_row_into_empty_tables() {
    assert_eq!(
        insert_row("<p>a</p><table><tbody></tbody></table>", 0, 0, &["1", "2"], false).unwrap(),
        "<p>a</p><table><tbody><tr><td>1</td><td>2</td></tr></tbody></table>"
    );
    assert_eq!(
        insert_row(r#"<table class="t"></table>"#, 0, 0, &["1"], false).unwrap(),
        r#"<table class="t"><tr><td>1</td></tr></table>"#
    );
}
