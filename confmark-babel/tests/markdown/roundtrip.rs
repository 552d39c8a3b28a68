//! Markdown → storage → Markdown
//!
//! The first pass is lossy, the second must not change anything.

use confmark_babel::{markdown_to_storage, storage_to_markdown};
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn round_trip(md: &str) -> String {
    storage_to_markdown(&markdown_to_storage(md))
}

#[test]
fn test_kitchensink_stabilizes() {
    let first = round_trip(&crate::fixture("kitchensink.md"));

    assert_snapshot!(first, @r###"
    # Release Plan

    Intro with **bold**, *italic*, `code` and a [link](https://example.com).

    ## Tasks

    - first

    - second

    - one

    - two

    > Heads up & beware

    | Name | Owner |
    |---|---|
    | Build | *ci* |

    ```rust
    fn main() {}
    ```

    ```mermaid
    graph TD;
    A-->B
    ```
    "###);

    assert_eq!(round_trip(&first), first);
}

#[test]
fn test_simple_table_is_exact() {
    let md = "| A | B |\n|---|---|\n| 1 | 2 |";
    assert_eq!(round_trip(md), md);
}

#[test]
fn test_code_with_markup_characters_is_exact() {
    let md = "```rust\nlet v: Vec<String> = names.iter().map(|n| n.to_string()).collect();\n```\n\n```html\n<b>x</b> &amp; **y**\n```";
    assert_eq!(round_trip(md), md);
}

fn canonical_line() -> impl Strategy<Value = String> {
    let word = "[a-z]{1,8}";
    prop_oneof![
        (1usize..=6, word).prop_map(|(level, w)| format!("{} {w}", "#".repeat(level))),
        (word, word).prop_map(|(a, b)| format!("{a} {b}")),
        (word, word).prop_map(|(a, b)| format!("{a} **{b}**")),
        (word, word).prop_map(|(a, b)| format!("{a} *{b}*")),
        (word, word).prop_map(|(a, b)| format!("{a} `{b}`")),
        (word, word).prop_map(|(a, b)| format!("[{a}](https://example.com/{b})")),
        (word, word).prop_map(|(a, b)| format!("| {a} | {b} |\n|---|---|\n| {b} | {a} |")),
        (word, word).prop_map(|(lang, body)| format!("```{lang}\n{body}\n```")),
    ]
}

proptest! {
    #[test]
    fn canonical_subset_is_stable_after_one_pass(lines in prop::collection::vec(canonical_line(), 1..8)) {
        let md = lines.join("\n\n");
        let first = round_trip(&md);
        prop_assert_eq!(round_trip(&first), first);
    }
}
