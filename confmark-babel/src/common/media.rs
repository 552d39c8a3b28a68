//! Image markup builders and read-only image extraction.

use super::markup;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static ATTACHMENT_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<ri:attachment\s+ri:filename="([^"]+)""#).expect("valid attachment regex")
});

static URL_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<ri:url\s+ri:value="([^"]+)""#).expect("valid url regex"));

/// Where an image referenced by a document lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Attachment,
    External,
}

/// An image referenced from storage markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub filename: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ImageKind,
}

/// Knobs for resolving image references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOptions {
    /// Base URL of the document store; attachments resolve under
    /// `{base_url}/download/attachments/{page_id}/{filename}`.
    pub base_url: String,
    /// Lowercase file extensions (without the dot) recognized as images on
    /// external URLs.
    pub extensions: Vec<String>,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            extensions: ["png", "jpg", "jpeg", "gif", "svg"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl ImageOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    fn looks_like_image(&self, url: &str) -> bool {
        let lower = url.to_ascii_lowercase();
        self.extensions
            .iter()
            .any(|ext| lower.ends_with(&format!(".{ext}")))
    }
}

/// Image tag pointing at an attachment of the current page.
pub fn attachment_image(filename: &str) -> String {
    format!(
        r#"<ac:image><ri:attachment ri:filename="{}"/></ac:image>"#,
        markup::escape(filename)
    )
}

/// Image tag pointing at an external URL. `url` must already be escaped.
pub fn external_image(url: &str) -> String {
    format!(r#"<ac:image><ri:url ri:value="{url}"/></ac:image>"#)
}

/// Plain HTML image tag. `url` is escaped here.
pub fn html_image(url: &str) -> String {
    format!(r#"<img src="{}"/>"#, markup::escape(url))
}

/// True when `target` carries a URL scheme with an authority, e.g. `https://…`.
pub fn is_url(target: &str) -> bool {
    matches!(url::Url::parse(target), Ok(parsed) if parsed.has_host())
}

/// List the images referenced by `markup`: attachments first, then external
/// URLs whose path ends in a known image extension.
pub fn extract_images(markup: &str, page_id: &str, options: &ImageOptions) -> Vec<ImageRef> {
    let base = options.base_url.trim_end_matches('/');

    let attachments = ATTACHMENT_REF.captures_iter(markup).map(|caps| {
        let filename = caps[1].to_string();
        ImageRef {
            url: format!("{base}/download/attachments/{page_id}/{filename}"),
            filename,
            kind: ImageKind::Attachment,
        }
    });

    let external = URL_REF
        .captures_iter(markup)
        .map(|caps| caps[1].to_string())
        .filter(|url| options.looks_like_image(url))
        .map(|url| ImageRef {
            filename: url.rsplit('/').next().unwrap_or_default().to_string(),
            url,
            kind: ImageKind::External,
        });

    attachments.chain(external).collect()
}
