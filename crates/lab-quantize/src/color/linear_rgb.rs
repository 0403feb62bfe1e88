//! Linear RGB color type
//!
//! Linear RGB is sRGB with the gamma curve removed: values are proportional
//! to physical light intensity. It is the entry point of the XYZ matrix.

use super::srgb::{srgb_to_linear, Rgb};

/// A color in linear RGB color space.
///
/// Values produced from [`Rgb`] are in `0.0..=1.0`. Values produced from the
/// inverse XYZ matrix may fall outside that range; they are clamped only when
/// re-encoded to sRGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f64,
    /// Green channel (linear light intensity)
    pub g: f64,
    /// Blue channel (linear light intensity)
    pub b: f64,
}

impl LinearRgb {
    /// Create a new LinearRgb color from linear RGB values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for LinearRgb {
    /// Gamma-decode each 8-bit channel.
    fn from(rgb: Rgb) -> Self {
        Self {
            r: srgb_to_linear(rgb.r),
            g: srgb_to_linear(rgb.g),
            b: srgb_to_linear(rgb.b),
        }
    }
}
