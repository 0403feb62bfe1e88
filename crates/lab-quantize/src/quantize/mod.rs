//! Palette quantization of RGBA pixel buffers.
//!
//! A run deduplicates the input colors and matches each distinct color
//! against the palette exactly once. It then rewrites the whole buffer
//! through a lookup cache. Alpha never takes part in matching: every output
//! pixel keeps the alpha of the input pixel it replaces.
//!
//! With the `parallel` feature, [`Quantizer::quantize_par`] spreads both the
//! per-color matching and the buffer rewrite over the rayon thread pool.
//! Both variants produce byte-identical output.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::color::{Lab, Rgb};
use crate::palette::{PaletteEntry, PaletteIndex, QuantizeError};

/// Hashable identity of one distinct RGBA value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorKey(pub [u8; 4]);

impl ColorKey {
    #[inline]
    pub const fn new(rgba: [u8; 4]) -> Self {
        Self(rgba)
    }

    /// Key for a 4-byte RGBA pixel slice.
    #[inline]
    fn from_pixel(px: &[u8]) -> Self {
        Self([px[0], px[1], px[2], px[3]])
    }

    /// The RGB part of the key.
    #[inline]
    pub fn rgb(self) -> Rgb {
        Rgb::new(self.0[0], self.0[1], self.0[2])
    }

    /// The alpha channel.
    #[inline]
    pub fn alpha(self) -> u8 {
        self.0[3]
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "rgba({}, {}, {}, {})", r, g, b, a)
    }
}

/// Matched RGBA output for each distinct input color.
pub type LookupCache = HashMap<ColorKey, [u8; 4]>;

/// Result of a quantization run.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantized {
    /// Remapped RGBA buffer, same length and pixel order as the input
    pub pixels: Vec<u8>,
    /// Lab coordinates of the palette, in palette order
    pub palette_lab: Vec<Lab>,
    /// Number of distinct RGBA values in the input
    pub unique_colors: usize,
}

/// Reusable quantizer bound to one palette.
///
/// Holds a [`PaletteIndex`], so the palette's Lab conversion and KD-tree
/// are paid for once no matter how many buffers are processed.
///
/// # Example
///
/// ```
/// use lab_quantize::{PaletteEntry, Quantizer, Rgb};
///
/// let quantizer = Quantizer::new(vec![
///     PaletteEntry::new("Red", Rgb::new(255, 0, 0)),
///     PaletteEntry::new("Blue", Rgb::new(0, 0, 255)),
/// ])
/// .unwrap();
///
/// let out = quantizer.quantize(&[10, 10, 250, 255, 240, 5, 5, 128]).unwrap();
/// assert_eq!(out.pixels, vec![0, 0, 255, 255, 255, 0, 0, 128]);
/// assert_eq!(out.unique_colors, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Quantizer {
    index: PaletteIndex,
}

impl Quantizer {
    /// Build a quantizer over `entries`.
    ///
    /// # Errors
    ///
    /// Returns [`QuantizeError::EmptyPalette`] if `entries` is empty.
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self, QuantizeError> {
        PaletteIndex::new(entries).map(Self::from_index)
    }

    /// Wrap an already built index.
    pub fn from_index(index: PaletteIndex) -> Self {
        Self { index }
    }

    /// The palette index backing this quantizer.
    pub fn index(&self) -> &PaletteIndex {
        &self.index
    }

    /// Remap every pixel of an RGBA buffer to its nearest palette color.
    ///
    /// # Errors
    ///
    /// - [`QuantizeError::CorruptPixelBuffer`] if `pixels.len()` is not a
    ///   multiple of 4.
    /// - [`QuantizeError::InternalLookupInconsistency`] if a deduplicated
    ///   color is missing from the cache during the rewrite.
    pub fn quantize(&self, pixels: &[u8]) -> Result<Quantized, QuantizeError> {
        check_buffer(pixels)?;

        let unique = unique_colors(pixels);
        let cache = unique
            .iter()
            .map(|&key| self.match_color(key).map(|rgba| (key, rgba)))
            .collect::<Result<LookupCache, _>>()?;

        let mut out = Vec::with_capacity(pixels.len());
        for px in pixels.chunks_exact(4) {
            out.extend_from_slice(lookup(&cache, ColorKey::from_pixel(px))?);
        }

        Ok(self.finish(out, unique.len()))
    }

    /// Matched RGBA for one distinct input color, alpha carried over.
    fn match_color(&self, key: ColorKey) -> Result<[u8; 4], QuantizeError> {
        let lab = Lab::from(key.rgb());
        let matched = self
            .index
            .nearest(lab)
            .ok_or(QuantizeError::EmptyPalette)?;
        let rgb = Rgb::from(matched.lab);
        Ok([rgb.r, rgb.g, rgb.b, key.alpha()])
    }

    fn finish(&self, pixels: Vec<u8>, unique_colors: usize) -> Quantized {
        Quantized {
            pixels,
            palette_lab: self.index.lab_points().to_vec(),
            unique_colors,
        }
    }
}

/// One-shot quantization of `pixels` against `palette`.
///
/// Checks the palette before the buffer, so an empty palette is reported
/// even for a malformed or empty buffer.
///
/// # Errors
///
/// [`QuantizeError::EmptyPalette`] for an empty palette, otherwise as
/// [`Quantizer::quantize`].
pub fn quantize(pixels: &[u8], palette: &[PaletteEntry]) -> Result<Quantized, QuantizeError> {
    if palette.is_empty() {
        return Err(QuantizeError::EmptyPalette);
    }
    check_buffer(pixels)?;
    Quantizer::new(palette.to_vec())?.quantize(pixels)
}

fn check_buffer(pixels: &[u8]) -> Result<(), QuantizeError> {
    if pixels.len() % 4 != 0 {
        return Err(QuantizeError::CorruptPixelBuffer { len: pixels.len() });
    }
    Ok(())
}

/// Distinct RGBA values in first-seen order.
fn unique_colors(pixels: &[u8]) -> Vec<ColorKey> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for px in pixels.chunks_exact(4) {
        let key = ColorKey::from_pixel(px);
        if seen.insert(key) {
            unique.push(key);
        }
    }
    unique
}

#[inline]
fn lookup(cache: &LookupCache, key: ColorKey) -> Result<&[u8; 4], QuantizeError> {
    cache
        .get(&key)
        .ok_or(QuantizeError::InternalLookupInconsistency { key })
}

#[cfg(feature = "parallel")]
mod par {
    use rayon::prelude::*;

    use super::*;

    impl Quantizer {
        /// Parallel version of [`Quantizer::quantize`].
        ///
        /// Deduplication stays sequential to keep first-seen order. Color
        /// matching and the buffer rewrite run on the rayon pool.
        pub fn quantize_par(&self, pixels: &[u8]) -> Result<Quantized, QuantizeError> {
            check_buffer(pixels)?;

            let unique = unique_colors(pixels);
            let cache = unique
                .par_iter()
                .map(|&key| self.match_color(key).map(|rgba| (key, rgba)))
                .collect::<Result<LookupCache, _>>()?;

            let mut out = vec![0u8; pixels.len()];
            out.par_chunks_exact_mut(4)
                .zip(pixels.par_chunks_exact(4))
                .try_for_each(|(dst, src)| {
                    dst.copy_from_slice(lookup(&cache, ColorKey::from_pixel(src))?);
                    Ok::<(), QuantizeError>(())
                })?;

            Ok(self.finish(out, unique.len()))
        }
    }
}
