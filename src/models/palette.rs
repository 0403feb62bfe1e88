use lab_quantize::{Lab, PaletteEntry, Rgb};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One reference color as exchanged with palette sources and clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ColorRecord {
    /// Catalog name, e.g. "Light Blue"
    pub name: String,
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl ColorRecord {
    pub fn new(name: impl Into<String>, r: u8, g: u8, b: u8) -> Self {
        Self {
            name: name.into(),
            r,
            g,
            b,
        }
    }
}

impl From<&ColorRecord> for PaletteEntry {
    fn from(record: &ColorRecord) -> Self {
        PaletteEntry::new(record.name.clone(), Rgb::new(record.r, record.g, record.b))
    }
}

impl From<&PaletteEntry> for ColorRecord {
    fn from(entry: &PaletteEntry) -> Self {
        ColorRecord::new(entry.name.clone(), entry.color.r, entry.color.g, entry.color.b)
    }
}

/// CIE L*a*b* coordinates of a palette entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LabValue {
    /// Lightness
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl From<Lab> for LabValue {
    fn from(lab: Lab) -> Self {
        Self {
            l: lab.l,
            a: lab.a,
            b: lab.b,
        }
    }
}
