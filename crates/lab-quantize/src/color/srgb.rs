//! 8-bit sRGB color type
//!
//! sRGB is the gamma-encoded representation used by image files and by
//! palette catalogs. Every pixel enters and leaves the engine as an [`Rgb`].

use std::fmt;

use super::linear_rgb::LinearRgb;
use super::lut::srgb8_to_linear;

/// A color in 8-bit sRGB.
///
/// # Example
/// ```
/// use lab_quantize::Rgb;
/// let red = Rgb::new(255, 0, 0);
/// assert_eq!(red.to_string(), "#FF0000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a new color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Decode one 8-bit sRGB channel to linear light in `0.0..=1.0`.
///
/// Normalizes by 255 and applies the piecewise sRGB curve: `c / 12.92` at or
/// below 0.04045, `((c + 0.055) / 1.055)^2.4` above.
#[inline]
pub fn srgb_to_linear(channel: u8) -> f64 {
    srgb8_to_linear(channel)
}

/// Encode one linear channel to an 8-bit sRGB value.
///
/// Applies `12.92 * c` at or below 0.0031308 and `1.055 * c^(1/2.4) - 0.055`
/// above, clamps to `0.0..=1.0`, then scales by 255 and rounds half away from
/// zero. Negative and over-range input is clamped, never rejected.
#[inline]
pub fn linear_to_srgb(linear: f64) -> u8 {
    let encoded = if linear <= 0.0031308 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    };
    // Float-to-int casts saturate, so a NaN channel lands on 0.
    (encoded.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl From<LinearRgb> for Rgb {
    /// Gamma-encode, clamp, and round each channel.
    fn from(linear: LinearRgb) -> Self {
        Self {
            r: linear_to_srgb(linear.r),
            g: linear_to_srgb(linear.g),
            b: linear_to_srgb(linear.b),
        }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for Rgb {
    /// Formats as `#RRGGBB`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
