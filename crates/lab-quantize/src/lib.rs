#![allow(clippy::excessive_precision, clippy::manual_range_contains)]

//! lab-quantize: exact nearest-palette color quantization in CIE L*a*b*
//!
//! Every pixel of an RGBA buffer is replaced by the perceptually closest
//! color of a fixed reference palette, such as a bead or thread catalog.
//! "Closest" means smallest Euclidean distance in L*a*b*.
//!
//! # Quick Start
//!
//! ```
//! use lab_quantize::{quantize, PaletteEntry, Rgb};
//!
//! let palette = [
//!     PaletteEntry::new("Red", Rgb::new(255, 0, 0)),
//!     PaletteEntry::new("Blue", Rgb::new(0, 0, 255)),
//! ];
//! let pixels = [10, 10, 250, 255, 240, 5, 5, 255];
//!
//! let result = quantize(&pixels, &palette).unwrap();
//! assert_eq!(result.pixels, vec![0, 0, 255, 255, 255, 0, 0, 255]);
//! ```
//!
//! For many images against one palette, build a [`Quantizer`] once and
//! reuse it. The palette's Lab points and KD-tree are computed only at
//! construction.
//!
//! # Pipeline
//!
//! 1. Distinct RGBA values are collected in first-seen order.
//! 2. Each distinct RGB is converted sRGB → linear → XYZ → L*a*b*.
//! 3. A [`KdTree`] over the palette's L*a*b* points yields the exact
//!    nearest entry.
//! 4. The matched L*a*b* point is converted back to sRGB and paired with
//!    the input pixel's own alpha.
//! 5. The buffer is rewritten through the resulting lookup cache, so equal
//!    input pixels always produce equal output pixels.
//!
//! # Numeric conventions
//!
//! XYZ values are produced on a 0..1 scale by the sRGB matrix, while the
//! D65 white points are the published 0..100 values. The forward and
//! inverse L*a*b* transforms use two slightly different white points
//! ([`WhitePoint::D65_FORWARD`] and [`WhitePoint::D65_INVERSE`]). Both are
//! kept so results stay numerically identical to existing bead-palette
//! tooling. Final channels are clamped and rounded half away from zero.
//!
//! # Features
//!
//! - `parallel`: enables [`Quantizer::quantize_par`] backed by rayon.

pub mod color;
pub mod kdtree;
pub mod palette;
pub mod quantize;


pub use color::{
    lab_to_xyz, linear_to_srgb, linear_to_xyz, srgb_to_linear, xyz_to_lab, xyz_to_linear,
    xyz_to_srgb, Lab, LinearRgb, Rgb, WhitePoint, Xyz,
};
pub use kdtree::{KdPoint, KdTree, Nearest};
pub use self::palette::{PaletteEntry, PaletteIndex, PaletteMatch, QuantizeError};
pub use quantize::{quantize, ColorKey, LookupCache, Quantized, Quantizer};
