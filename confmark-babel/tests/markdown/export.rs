//! Export tests for Markdown format (storage → Markdown)

use confmark_babel::format::Format;
use confmark_babel::formats::markdown::MarkdownFormat;
use confmark_babel::{storage_to_markdown, storage_to_markdown_with, MacroNames};
use pretty_assertions::assert_eq;

#[test]
fn test_page_fixture() {
    let page = crate::fixture("page.xhtml");
    let md = MarkdownFormat::default()
        .serialize(&page)
        .expect("storage serializes");

    assert!(md.starts_with(
        "# Sprint Board\n\nOwner: [Ana](https://wiki.example.com/display/~ana)\n"
    ));
    assert!(md.contains("Updated weekly."));
    assert!(md.contains(
        "| Q3 Goals |\n|---|\n| Item | Status | Notes |\n| Search | Done | shipped |\n| Billing | In progress |\n| Blocked | waiting on API |"
    ));
    assert!(md.contains("| Risk |\n|---|\n| None |"));
    assert!(!md.contains("burndown"), "attachment images degrade to nothing");
    assert!(!md.contains('<'));
}

#[test]
fn test_html_image_tag() {
    assert_eq!(
        storage_to_markdown(r#"<p><img class="c" src="https://x/y.png"/></p>"#),
        "![](https://x/y.png)"
    );
}

#[test]
fn test_plantuml_macro_with_parameters() {
    let storage = concat!(
        r#"<ac:structured-macro ac:name="plantuml" ac:schema-version="1" ac:macro-id="abc">"#,
        r#"<ac:parameter ac:name="atlassian-macro-output-type">INLINE</ac:parameter>"#,
        "<ac:plain-text-body><![CDATA[@startuml\nA -> B\n@enduml]]></ac:plain-text-body>",
        "</ac:structured-macro>",
    );
    assert_eq!(
        storage_to_markdown(storage),
        "```plantuml\n@startuml\nA -> B\n@enduml\n```"
    );
}

#[test]
fn test_configured_mermaid_name() {
    let storage = r#"<ac:structured-macro ac:name="mermaid-cloud"><ac:plain-text-body><![CDATA[graph LR;]]></ac:plain-text-body></ac:structured-macro>"#;
    let names = MacroNames {
        mermaid: "mermaid-cloud".to_string(),
        ..MacroNames::default()
    };
    assert_eq!(
        storage_to_markdown_with(storage, &names),
        "```mermaid\ngraph LR;\n```"
    );
    // Unknown to the defaults, so only the body text survives.
    assert_eq!(storage_to_markdown(storage), "graph LR;");
}

#[test]
fn test_nested_inline_tags() {
    assert_eq!(
        storage_to_markdown("<p><strong>a <em>b</em></strong> <code>c</code></p>"),
        "**a *b*** `c`"
    );
}
