//! Document store boundary and the read → edit → write loop.
//!
//! The transport behind a real store (HTTP, auth, retries) lives outside this
//! crate. [`MemoryStore`] backs the CLI and tests.

use crate::common::macros::MacroNames;
use crate::common::media::{self, ImageOptions, ImageRef};
use crate::formats::markdown::serializer::storage_to_markdown_with;
use crate::op::EditOp;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

static PAGE_ID_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"pageId=(\d+)").expect("valid page id regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredPage {
    pub id: String,
    pub title: String,
    pub html: String,
    pub version: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("page '{0}' not found")]
    NotFound(String),
    #[error("version conflict on page '{id}': expected {expected}, got {got}")]
    VersionConflict { id: String, expected: u64, got: u64 },
}

pub trait DocumentStore {
    fn read(&self, page_id: &str) -> Result<StoredPage, StoreError>;

    /// Store `html` as `version`, which must be one past the current version.
    fn write(
        &mut self,
        page_id: &str,
        html: &str,
        version: u64,
        title: Option<&str>,
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pages: HashMap<String, StoredPage>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, page: StoredPage) {
        self.pages.insert(page.id.clone(), page);
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self, page_id: &str) -> Result<StoredPage, StoreError> {
        self.pages
            .get(page_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(page_id.to_string()))
    }

    fn write(
        &mut self,
        page_id: &str,
        html: &str,
        version: u64,
        title: Option<&str>,
    ) -> Result<(), StoreError> {
        let page = self
            .pages
            .get_mut(page_id)
            .ok_or_else(|| StoreError::NotFound(page_id.to_string()))?;
        if version != page.version + 1 {
            return Err(StoreError::VersionConflict {
                id: page_id.to_string(),
                expected: page.version + 1,
                got: version,
            });
        }
        page.html = html.to_string();
        page.version = version;
        if let Some(title) = title {
            page.title = title.to_string();
        }
        Ok(())
    }
}

/// Outcome of an edit, shaped for JSON callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableOpResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl TableOpResult {
    pub fn ok(message: impl Into<String>, url: Option<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
            url,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
            url: None,
        }
    }
}

/// A page rendered for reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    #[serde(flatten)]
    pub page: StoredPage,
    pub markdown: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageRef>,
}

/// `…?pageId=123` → `123`. Anything else is returned unchanged and taken as
/// an id.
pub fn page_id_from_url(page_id_or_url: &str) -> &str {
    PAGE_ID_PARAM
        .captures(page_id_or_url)
        .and_then(|caps| caps.get(1))
        .map_or(page_id_or_url, |id| id.as_str())
}

/// Applies [`EditOp`]s to stored pages, bumping the version on every write.
pub struct PageEditor<S> {
    store: S,
    macros: MacroNames,
}

impl<S: DocumentStore> PageEditor<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            macros: MacroNames::default(),
        }
    }

    pub fn with_macros(store: S, macros: MacroNames) -> Self {
        Self { store, macros }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read a page with its Markdown rendering and referenced images.
    pub fn view(&self, page_id_or_url: &str, images: &ImageOptions) -> Result<PageView, StoreError> {
        let page_id = page_id_from_url(page_id_or_url);
        let page = self.store.read(page_id)?;
        Ok(PageView {
            markdown: storage_to_markdown_with(&page.html, &self.macros),
            images: media::extract_images(&page.html, page_id, images),
            page,
        })
    }

    pub fn apply(&mut self, page_id_or_url: &str, op: &EditOp) -> TableOpResult {
        let page_id = page_id_from_url(page_id_or_url);
        let page = match self.store.read(page_id) {
            Ok(page) => page,
            Err(err) => return TableOpResult::failed(err.to_string()),
        };

        let html = match op.apply_to(&page.html, &self.macros) {
            Ok(html) => html,
            Err(err) => {
                warn!(page = page_id, kind = err.kind(), "edit refused: {err}");
                return TableOpResult::failed(err.to_string());
            }
        };

        if let Err(err) = self.store.write(page_id, &html, page.version + 1, None) {
            return TableOpResult::failed(err.to_string());
        }
        debug!(page = page_id, version = page.version + 1, "page written");
        TableOpResult::ok(op.describe(), Some(page.url))
    }
}
