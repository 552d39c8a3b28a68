//! Small helpers for working with storage-format tags as plain text.
//!
//! Nothing here builds a tree. Tags are located with linear-time regular
//! expressions and handled as byte ranges over the original string.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::ops::Range;

static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

static CDATA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("valid CDATA regex"));

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][\w:.-]*)\s*=\s*"([^"]*)""#).expect("valid attribute regex")
});

/// Remove every tag, keeping only the text between them.
pub fn strip_tags(markup: &str) -> Cow<'_, str> {
    ANY_TAG.replace_all(markup, "")
}

/// Replace `<![CDATA[...]]>` sections with their literal body.
pub fn unwrap_cdata(markup: &str) -> Cow<'_, str> {
    CDATA.replace_all(markup, "${1}")
}

/// Wrap raw text in a CDATA section, splitting any embedded terminator.
pub fn cdata(body: &str) -> String {
    format!("<![CDATA[{}]]>", body.replace("]]>", "]]]]><![CDATA[>"))
}

/// Undo the terminator splitting done by [`cdata`] on a captured body.
pub fn join_cdata(body: &str) -> String {
    body.replace("]]]]><![CDATA[>", "]]>")
}

/// Escape text for element content or a double-quoted attribute value.
pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

/// Decode HTML/XML character references.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(text)
}

/// All `name="value"` pairs of an opening tag, in source order.
pub fn attributes(open_tag: &str) -> Vec<(String, String)> {
    ATTRIBUTE
        .captures_iter(open_tag)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Value of a single attribute of an opening tag.
pub fn attribute<'a>(open_tag: &'a str, name: &str) -> Option<&'a str> {
    attribute_value_range(open_tag, name).map(|range| &open_tag[range])
}

/// Byte range of an attribute value, relative to `open_tag`.
pub fn attribute_value_range(open_tag: &str, name: &str) -> Option<Range<usize>> {
    ATTRIBUTE
        .captures_iter(open_tag)
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .and_then(|caps| caps.get(2))
        .map(|value| value.range())
}
