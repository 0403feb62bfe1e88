//! Color types and conversion utilities
//!
//! Type-safe conversions along the chain used for palette matching:
//!
//! ```text
//! Rgb (8-bit sRGB) -> LinearRgb -> Xyz -> Lab
//! Lab -> Xyz -> Rgb (clamped, rounded)
//! ```
//!
//! # Example
//!
//! ```
//! use lab_quantize::{Lab, Rgb};
//!
//! let lab = Lab::from(Rgb::new(200, 30, 90));
//! let back = Rgb::from(lab);
//! assert!((back.r as i32 - 200).abs() <= 1);
//! ```

mod lab;
mod linear_rgb;
mod lut;
mod srgb;
mod xyz;

pub use lab::{lab_to_xyz, xyz_to_lab, Lab};
pub use linear_rgb::LinearRgb;
pub use srgb::{linear_to_srgb, srgb_to_linear, Rgb};
pub use xyz::{linear_to_xyz, xyz_to_linear, xyz_to_srgb, WhitePoint, Xyz};
