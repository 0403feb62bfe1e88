//! Gamma lookup table access
//!
//! The 256-entry table is generated at compile time by build.rs from the
//! exact IEC 61966-2-1 decode formula.

// Include the generated LUT from build.rs
include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Decode one 8-bit sRGB channel to linear light.
#[inline]
pub fn srgb8_to_linear(channel: u8) -> f64 {
    SRGB8_TO_LINEAR[channel as usize]
}
