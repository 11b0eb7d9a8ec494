//! Layered configuration for folio
//!
//! The documented defaults in `defaults/folio.default.toml` are compiled in and
//! always form the bottom layer. [`Loader`] stacks TOML files and single-key
//! overrides on top, later layers winning, and deserializes into [`FolioConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use folio_core::{PageSize, RenderOptions};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/folio.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct FolioConfig {
    pub book: BookConfig,
    pub export: ExportConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookConfig {
    pub default_title: String,
}

/// `[export]`: render options for both profiles
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub escape_titles: bool,
    pub print: PrintConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrintConfig {
    pub page_size: PageSize,
    /// Written into the `@page` rule as-is, so it must stay a single CSS value
    #[serde(deserialize_with = "css_value")]
    pub margin: String,
    /// Browser used to print to PDF
    #[serde(default)]
    pub chrome: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

fn css_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.trim().is_empty() {
        return Err(serde::de::Error::custom("expected a CSS value, found an empty string"));
    }
    match value.chars().find(|c| matches!(c, ';' | '{' | '}' | '<')) {
        Some(c) => Err(serde::de::Error::custom(format!(
            "'{value}' is not a single CSS value ('{c}' is not allowed)"
        ))),
        None => Ok(value),
    }
}

impl From<&ExportConfig> for RenderOptions {
    fn from(config: &ExportConfig) -> Self {
        RenderOptions {
            page_size: config.print.page_size,
            margin: config.print.margin.clone(),
            escape_titles: config.escape_titles,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Loader {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Add a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Add a TOML file that is skipped when absent.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Set one dotted key, e.g. `export.print.margin`, above every file layer.
    pub fn set_override<V>(self, key: &str, value: V) -> Result<Self, ConfigError>
    where
        V: Into<ValueKind>,
    {
        Ok(Loader {
            builder: self.builder.set_override(key, value)?,
        })
    }

    pub fn build(self) -> Result<FolioConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn layer(self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        Loader {
            builder: self.builder.add_source(file),
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Loader::new()
    }
}
