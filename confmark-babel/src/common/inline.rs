//! Inline span conversion between Markdown and storage-format tags.
//!
//! Markdown → storage applies its rules in a fixed order: images, links, bold,
//! italic, inline code. Later rules must never re-match text produced by an
//! earlier one, which is why images run before links (`![x](y)` contains a
//! link-shaped suffix) and bold runs before italic.
//!
//! Storage → Markdown is an approximate inverse. Anchors and images are
//! matched on their `href`/`ri:value` attribute only, so extra attributes on
//! those tags are tolerated and dropped.

use super::markup;
use super::media;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("valid image regex"));

static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));

static BOLD_STARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold regex"));

static BOLD_UNDERSCORES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__(.+?)__").expect("valid bold regex"));

static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").expect("valid italic regex"));

static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid code regex"));

static STRONG_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:strong|b)(?:\s[^>]*)?>(.*?)</(?:strong|b)>").expect("valid strong regex")
});

static EM_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:em|i)(?:\s[^>]*)?>(.*?)</(?:em|i)>").expect("valid emphasis regex")
});

static CODE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<code(?:\s[^>]*)?>(.*?)</code>").expect("valid code regex"));

static ANCHOR_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<a\s[^>]*?href="([^"]*)"[^>]*>(.*?)</a>"#).expect("valid anchor regex")
});

static AC_IMAGE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<ac:image(?:\s[^>]*)?>(.*?)</ac:image>").expect("valid image tag regex")
});

static RI_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<ri:url\s+ri:value="([^"]+)""#).expect("valid ri:url regex"));

static IMG_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<img\s[^>]*?src="([^"]*)"[^>]*/?>"#).expect("valid img regex")
});

/// Convert inline Markdown spans of already-escaped text to storage tags.
pub fn to_storage_inline(escaped: &str) -> String {
    let text = IMAGE.replace_all(escaped, |caps: &Captures| media::external_image(&caps[2]));
    let text = links(&text);
    let text = bold(&text);
    let text = italic(&text);
    code(&text)
}

/// Convert inline storage tags back to their Markdown spelling.
///
/// Attachment-only images have no resolvable URL and are left in place for the
/// caller's image-extraction step.
pub fn from_storage_inline(markup: &str) -> String {
    let text = STRONG_TAG.replace_all(markup, "**${1}**");
    let text = EM_TAG.replace_all(&text, "*${1}*");
    let text = CODE_TAG.replace_all(&text, "`${1}`");
    let text = ANCHOR_TAG.replace_all(&text, "[${2}](${1})");
    let text = AC_IMAGE_TAG.replace_all(&text, |caps: &Captures| match RI_URL.captures(&caps[1]) {
        Some(url) => format!("![]({})", &url[1]),
        None => caps[0].to_string(),
    });
    IMG_TAG.replace_all(&text, "![](${1})").into_owned()
}

/// `[text](target)` → anchor.
pub(crate) fn links(text: &str) -> String {
    LINK.replace_all(text, r#"<a href="${2}">${1}</a>"#)
        .into_owned()
}

/// `**text**` and `__text__` → strong.
pub(crate) fn bold(text: &str) -> String {
    let text = BOLD_STARS.replace_all(text, "<strong>${1}</strong>");
    BOLD_UNDERSCORES
        .replace_all(&text, "<strong>${1}</strong>")
        .into_owned()
}

/// `*text*` → emphasis, skipping stars that belong to a `**` run.
///
/// The regex engine has no lookaround, so a candidate whose neighbouring byte
/// is another `*` is rejected and the search resumes one byte later.
pub(crate) fn italic(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut at = 0;

    while let Some(caps) = ITALIC.captures_at(text, at) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let touches_star = (whole.start() > 0 && bytes[whole.start() - 1] == b'*')
            || bytes.get(whole.end()) == Some(&b'*');
        if touches_star {
            at = whole.start() + 1;
            continue;
        }
        out.push_str(&text[copied..whole.start()]);
        out.push_str("<em>");
        out.push_str(inner.as_str());
        out.push_str("</em>");
        copied = whole.end();
        at = whole.end();
    }

    out.push_str(&text[copied..]);
    out
}

/// `` `text` `` → code.
pub(crate) fn code(text: &str) -> String {
    CODE.replace_all(text, "<code>${1}</code>").into_owned()
}

/// Escape raw text and apply the inline rules.
pub fn escape_and_format(raw: &str) -> String {
    to_storage_inline(&markup::escape(raw))
}
