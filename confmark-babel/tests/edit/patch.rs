use confmark_babel::patch::{insert_content, patch, patch_with, InsertPosition};
use confmark_babel::{EditError, MacroNames};
use pretty_assertions::assert_eq;

#[test]
fn test_only_first_occurrence_is_replaced() {
    let doc = "<h1>T</h1><p>old</p><p>mid</p><p>old</p>";
    assert_eq!(
        patch(doc, "<p>old</p>", "<p>new</p>").unwrap(),
        "<h1>T</h1><p>new</p><p>mid</p><p>old</p>"
    );
}

#[test]
fn test_match_is_exact() {
    let page = crate::fixture("page.xhtml");
    assert_eq!(
        patch(&page, "<td>Done</td> ", "<td>x</td>"),
        Err(EditError::NoMatch)
    );
    assert_eq!(
        patch(&page, "<TD>Done</TD>", "<td>x</td>"),
        Err(EditError::NoMatch)
    );
    assert_eq!(
        patch(&page, "<td>Done</td>", "<td>x</td>").unwrap(),
        page.replacen("<td>Done</td>", "<td>x</td>", 1)
    );
}

#[test]
fn test_markdown_replacement_uses_macro_names() {
    let names = MacroNames {
        code: "code-block".to_string(),
        ..MacroNames::default()
    };
    let out = patch_with("<p>later</p>", "<p>later</p>", "```\nls\n```", &names).unwrap();
    assert_eq!(
        out,
        r#"<ac:structured-macro ac:name="code-block"><ac:plain-text-body><![CDATA[ls]]></ac:plain-text-body></ac:structured-macro>"#
    );
}

#[test]
fn test_insert_content() {
    let page = crate::fixture("page.xhtml");
    let names = MacroNames::default();

    let out = insert_content(&page, "## Notes\n\n- a", InsertPosition::Append, &names);
    assert_eq!(out, format!("{page}<h2>Notes</h2>\n<ul>\n<li>a</li>\n</ul>"));

    let out = insert_content(&page, "Draft", InsertPosition::Prepend, &names);
    assert_eq!(out, format!("<p>Draft</p>{page}"));
}
