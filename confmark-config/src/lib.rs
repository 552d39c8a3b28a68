//! Shared configuration loader for the confmark toolchain.
//!
//! `defaults/confmark.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`ConfmarkConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use confmark_babel::{ImageOptions, MacroNames};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/confmark.default.toml");

/// Top-level configuration consumed by confmark applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfmarkConfig {
    pub macros: MacrosConfig,
    pub images: ImagesConfig,
    pub output: OutputConfig,
}

/// Macro names used for fenced code and diagram blocks.
#[derive(Debug, Clone, Deserialize)]
pub struct MacrosConfig {
    pub mermaid: String,
    pub plantuml: String,
    pub code: String,
}

impl From<MacrosConfig> for MacroNames {
    fn from(config: MacrosConfig) -> Self {
        MacroNames {
            mermaid: config.mermaid,
            plantuml: config.plantuml,
            code: config.code,
        }
    }
}

impl From<&MacrosConfig> for MacroNames {
    fn from(config: &MacrosConfig) -> Self {
        MacroNames {
            mermaid: config.mermaid.clone(),
            plantuml: config.plantuml.clone(),
            code: config.code.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImagesConfig {
    pub base_url: String,
    pub extensions: Vec<String>,
}

impl From<&ImagesConfig> for ImageOptions {
    fn from(config: &ImagesConfig) -> Self {
        ImageOptions {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            extensions: config
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub pretty_json: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `images.base_url` from a flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<ConfmarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ConfmarkConfig, ConfigError> {
    Loader::new().build()
}
