//! Palette types and the prebuilt nearest-color index.
//!
//! A palette is an ordered, non-empty list of named reference colors.
//! [`PaletteIndex`] converts every entry to Lab once and builds a KD-tree
//! over the results, so any number of images can be matched against it.

mod error;
mod index;

pub use error::QuantizeError;
pub use index::{PaletteEntry, PaletteIndex, PaletteMatch};
