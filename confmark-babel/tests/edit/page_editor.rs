use confmark_babel::store::{DocumentStore, MemoryStore, PageEditor, StoredPage};
use confmark_babel::{EditOp, ImageOptions, InsertPosition};
use pretty_assertions::assert_eq;

const URL: &str = "https://wiki.example.com/pages/viewpage.action?pageId=4242";

fn editor() -> PageEditor<MemoryStore> {
    let mut store = MemoryStore::new();
    store.insert(StoredPage {
        id: "4242".to_string(),
        title: "Sprint Board".to_string(),
        html: crate::fixture("page.xhtml"),
        version: 3,
        url: URL.to_string(),
    });
    PageEditor::new(store)
}

#[test]
fn test_edits_accumulate_versions() {
    let mut editor = editor();

    let result = editor.apply(
        URL,
        &EditOp::InsertColumn {
            table: 1,
            position: 1,
            header_name: "Owner".to_string(),
            default_value: String::new(),
            header_style: None,
        },
    );
    assert!(result.success);
    assert_eq!(
        result.message.as_deref(),
        Some("inserted column 'Owner' at position 1 of table 1")
    );
    assert_eq!(result.url.as_deref(), Some(URL));

    let result = editor.apply(
        "4242",
        &EditOp::InsertContent {
            markdown: "Reviewed".to_string(),
            position: InsertPosition::Append,
        },
    );
    assert!(result.success);

    let page = editor.store().read("4242").unwrap();
    assert_eq!(page.version, 5);
    assert!(page.html.contains("<th>Risk</th><th>Owner</th>"));
    assert!(page.html.ends_with("<p>Reviewed</p>"));
}

#[test]
fn test_refused_edit_reports_reason() {
    let mut editor = editor();
    let result = editor.apply("4242", &EditOp::DeleteRow { table: 0, row: 3 });

    assert!(!result.success);
    assert!(result.error.unwrap().contains("rowspan"));
    assert_eq!(editor.store().read("4242").unwrap().version, 3);
}

#[test]
fn test_column_edit_across_rowspan_is_refused() {
    let mut editor = editor();
    let result = editor.apply(
        "4242",
        &EditOp::DeleteColumn {
            table: 0,
            position: 1,
        },
    );

    assert!(!result.success);
    assert!(result.error.unwrap().contains("row 3"));
    let page = editor.store().read("4242").unwrap();
    assert_eq!(page.version, 3);
    assert_eq!(page.html, crate::fixture("page.xhtml"));
}

#[test]
fn test_view() {
    let editor = editor();
    let view = editor
        .view(URL, &ImageOptions::new("https://wiki.example.com"))
        .unwrap();
    assert_eq!(view.page.title, "Sprint Board");
    assert!(view.markdown.starts_with("# Sprint Board"));
    assert_eq!(view.images.len(), 1);
}
