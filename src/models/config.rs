use crate::assets::AssetLoader;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Palette source and caching
    #[serde(default)]
    pub palette: PaletteConfig,

    /// Largest accepted request body in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

/// Palette configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PaletteConfig {
    /// Where reference colors are loaded from
    #[serde(default)]
    pub source: PaletteSourceConfig,

    /// Seconds a loaded palette stays fresh
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_cache_ttl() -> u64 {
    3600 // 1 hour
}

impl PaletteConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            source: PaletteSourceConfig::default(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

/// Palette source selection
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaletteSourceConfig {
    /// Built-in bead palette
    #[default]
    Embedded,
    /// JSON file of `{name, r, g, b}` records
    File { path: PathBuf },
    /// Published spreadsheet HTML with name, R, G, B columns
    Spreadsheet { url: String },
}

impl std::fmt::Display for PaletteSourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaletteSourceConfig::Embedded => write!(f, "embedded"),
            PaletteSourceConfig::File { path } => write!(f, "file {}", path.display()),
            PaletteSourceConfig::Spreadsheet { url } => write!(f, "spreadsheet {url}"),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => Self::from_yaml(&content),
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse a YAML document, falling back to defaults on error
    pub fn from_yaml(content: &str) -> Self {
        match serde_yaml::from_str::<Self>(content) {
            Ok(config) => {
                tracing::info!(
                    source = %config.palette.source,
                    cache_ttl_secs = config.palette.cache_ttl_secs,
                    max_upload_bytes = config.max_upload_bytes,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to parse config, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            palette: PaletteConfig::default(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}
