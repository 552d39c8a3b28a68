//! Cell values: plain text, Markdown or raw markup, used interchangeably.

use crate::common::{inline, media};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static BRACKET_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[image:([^\]]+)\]").expect("valid bracket image regex"));

static MARKDOWN_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("valid image regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Starts with a tag; taken as storage markup.
    Markup,
    Markdown,
}

pub fn content_kind(text: &str) -> ContentKind {
    if text.trim_start().starts_with('<') {
        ContentKind::Markup
    } else {
        ContentKind::Markdown
    }
}

/// Turn a cell value into cell markup.
///
/// Images are resolved first: `[image:file]` and `![alt](file)` become
/// attachment images, `![alt](https://…)` a plain `<img>`. Bold and italic
/// follow. If the value now starts with a tag it is returned as is, otherwise
/// inline code and links are converted too.
pub fn process_cell_content(content: &str) -> String {
    let text = BRACKET_IMAGE.replace_all(content, |caps: &Captures| media::attachment_image(&caps[1]));
    let text = MARKDOWN_IMAGE.replace_all(&text, |caps: &Captures| {
        let target = &caps[2];
        if media::is_url(target) {
            media::html_image(target)
        } else {
            media::attachment_image(target)
        }
    });
    let text = inline::italic(&inline::bold(&text));

    match content_kind(&text) {
        ContentKind::Markup => text,
        ContentKind::Markdown => inline::links(&inline::code(&text)),
    }
}
