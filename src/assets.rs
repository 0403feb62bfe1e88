//! Asset loading with embedded fallbacks
//!
//! The default config, the built-in bead palette and the sample image are
//! compiled into the binary. Only the config can be overridden from the
//! filesystem (via `CONFIG_FILE`); palettes on disk are selected through the
//! config itself.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Embedded palette and sample image
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "*.json"]
#[include = "*.png"]
struct EmbeddedAssets;

/// File name of the built-in palette
pub const DEFAULT_PALETTE: &str = "palette.json";

/// File name of the built-in sample image
pub const DEFAULT_IMAGE: &str = "default.png";

/// Where the active config comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Compiled-in `config.yaml`
    Embedded,
    /// External file that exists on disk
    File(PathBuf),
    /// External path was set but does not exist; embedded config is used
    Missing(PathBuf),
}

/// Asset loader with optional filesystem override for the config
pub struct AssetLoader {
    /// External config file (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    /// Create a loader honoring the `CONFIG_FILE` env var
    pub fn from_env() -> Self {
        Self::new(std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
    }

    /// Describe which config will be read
    pub fn config_source(&self) -> ConfigSource {
        match &self.config_file {
            Some(path) if path.exists() => ConfigSource::File(path.clone()),
            Some(path) => ConfigSource::Missing(path.clone()),
            None => ConfigSource::Embedded,
        }
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let ConfigSource::File(path) = self.config_source() {
            tracing::trace!(path = %path.display(), "Loading config from filesystem");
            return Ok(Cow::Owned(fs::read(path)?));
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Built-in palette as JSON bytes
    pub fn default_palette(&self) -> Option<Cow<'static, [u8]>> {
        EmbeddedAssets::get(DEFAULT_PALETTE).map(|f| f.data)
    }

    /// Built-in sample image as PNG bytes
    pub fn default_image(&self) -> Option<Cow<'static, [u8]>> {
        EmbeddedAssets::get(DEFAULT_IMAGE).map(|f| f.data)
    }

    /// List embedded assets (for display)
    pub fn list_embedded() -> Vec<String> {
        let mut files = vec!["config.yaml".to_string()];
        files.extend(EmbeddedAssets::iter().map(|s| s.to_string()));
        files
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new(None)
    }
}
