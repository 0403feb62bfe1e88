pub mod config;
pub mod palette;

pub use config::{AppConfig, PaletteConfig, PaletteSourceConfig};
pub use palette::{ColorRecord, LabValue};
