//! Configuration loader for the GeoCSS reader and writer.
//!
//! `defaults/geocss.default.toml` is embedded into the crate so that the documented
//! defaults and [`GeoCssConfig::default`] stay in sync. Callers layer their own files and
//! overrides on top via [`Loader`] before deserializing into [`GeoCssConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, FileSourceFile, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/geocss.default.toml");

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeoCssConfig {
    pub reader: ReaderConfig,
    pub writer: WriterConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReaderConfig {
    /// Selector attributes read as scale denominator bounds
    pub scale_attributes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WriterConfig {
    pub indent: String,
    pub emit_mode: bool,
}

impl WriterConfig {
    /// The attribute scale bounds are written with
    pub fn scale_attribute(reader: &ReaderConfig) -> &str {
        reader
            .scale_attributes
            .first()
            .map(String::as_str)
            .unwrap_or("@sd")
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            scale_attributes: vec!["@sd".to_string(), "@scale".to_string()],
        }
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            indent: "  ".to_string(),
            emit_mode: true,
        }
    }
}

/// Builds a [`GeoCssConfig`] from the embedded defaults, then any TOML files, then
/// individual overrides. Later layers win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

fn toml_file(path: &Path, required: bool) -> File<FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml).required(required)
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Add a TOML file; `build` fails when it does not exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(toml_file(path.as_ref(), true))
    }

    /// Add a TOML file that may be absent, such as a per-user settings file.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(toml_file(path.as_ref(), false))
    }

    fn layer(mut self, source: File<FileSourceFile, FileFormat>) -> Self {
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set one dotted key, e.g. `writer.emit_mode` or `reader.scale_attributes`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<GeoCssConfig, ConfigError> {
        let config: GeoCssConfig = self.builder.build()?.try_deserialize()?;
        tracing::debug!(
            scale_attributes = config.reader.scale_attributes.len(),
            emit_mode = config.writer.emit_mode,
            "loaded GeoCSS configuration"
        );
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults with nothing layered on top.
pub fn load_defaults() -> Result<GeoCssConfig, ConfigError> {
    Loader::new().build()
}
