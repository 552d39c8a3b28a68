//! Import tests for Markdown format (Markdown → storage)

use confmark_babel::format::Format;
use confmark_babel::formats::markdown::MarkdownFormat;
use confmark_babel::{markdown_to_storage, MacroNames};
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

#[test]
fn test_kitchensink() {
    let md = crate::fixture("kitchensink.md");
    let storage = MarkdownFormat::default().parse(&md).expect("markdown parses");

    assert_snapshot!(storage, @r###"
    <h1>Release Plan</h1>
    <p>Intro with <strong>bold</strong>, <em>italic</em>, <code>code</code> and a <a href="https://example.com">link</a>.</p>
    <h2>Tasks</h2>
    <ul>
    <li>first</li>
    <li>second</li>
    </ul>
    <ol>
    <li>one</li>
    <li>two</li>
    </ol>
    <blockquote><p>Heads up &amp; beware</p></blockquote>
    <table><tbody>
    <tr><th>Name</th><th>Owner</th></tr>
    <tr><td>Build</td><td><em>ci</em></td></tr>
    </tbody></table>
    <ac:structured-macro ac:name="code"><ac:parameter ac:name="language">rust</ac:parameter><ac:plain-text-body><![CDATA[fn main() {}]]></ac:plain-text-body></ac:structured-macro>
    <ac:structured-macro ac:name="mermaid-macro"><ac:plain-text-body><![CDATA[graph TD;
    A-->B]]></ac:plain-text-body></ac:structured-macro>
    "###);
}

#[test]
fn test_table_cells_are_escaped() {
    assert_eq!(
        markdown_to_storage("| a<b | c&d |"),
        "<table><tbody>\n<tr><th>a&lt;b</th><th>c&amp;d</th></tr>\n</tbody></table>"
    );
}

#[test]
fn test_ordered_markers_are_stripped() {
    assert_eq!(
        markdown_to_storage("3. three\n10. ten"),
        "<ol>\n<li>three</li>\n<li>ten</li>\n</ol>"
    );
    assert_eq!(markdown_to_storage("* star"), "<ul>\n<li>star</li>\n</ul>");
}

#[test]
fn test_not_quite_block_syntax_is_a_paragraph() {
    assert_eq!(markdown_to_storage("#Title"), "<p>#Title</p>");
    assert_eq!(markdown_to_storage(">no space"), "<p>&gt;no space</p>");
    assert_eq!(markdown_to_storage("  # indented"), "<p># indented</p>");
}

#[test]
fn test_images_and_links_in_paragraph() {
    assert_eq!(
        markdown_to_storage("See ![chart](https://x.io/c.png) and [docs](https://x.io)"),
        r#"<p>See <ac:image><ri:url ri:value="https://x.io/c.png"/></ac:image> and <a href="https://x.io">docs</a></p>"#
    );
}

#[test]
fn test_configured_macro_names() {
    let format = MarkdownFormat::with_macros(MacroNames {
        plantuml: "plantuml-render".to_string(),
        ..MacroNames::default()
    });
    let storage = format
        .parse("```plantuml\n@startuml\n@enduml\n```")
        .expect("markdown parses");
    assert_eq!(
        storage,
        "<ac:structured-macro ac:name=\"plantuml-render\"><ac:plain-text-body><![CDATA[@startuml\n@enduml]]></ac:plain-text-body></ac:structured-macro>"
    );
}

#[test]
fn test_cdata_terminator_in_code_is_split() {
    let storage = markdown_to_storage("```\na]]>b\n```");
    assert!(storage.contains("<![CDATA[a]]]]><![CDATA[>b]]>"));
}
