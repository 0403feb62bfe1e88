//! Error type for quantization runs

use std::fmt;

use crate::quantize::ColorKey;

/// Error type for a quantization run.
///
/// All variants are deterministic: retrying with the same palette and
/// pixel buffer fails the same way. No partial output is ever produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantizeError {
    /// No reference colors were supplied
    EmptyPalette,
    /// Pixel buffer length is not a multiple of 4
    CorruptPixelBuffer {
        /// Length of the rejected buffer in bytes
        len: usize,
    },
    /// A deduplicated color had no entry in the lookup cache.
    ///
    /// Indicates a defect in the engine, never bad input.
    InternalLookupInconsistency {
        /// The color that was missing
        key: ColorKey,
    },
}

impl QuantizeError {
    /// Returns true if the caller supplied invalid input, as opposed to an
    /// internal defect.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            QuantizeError::EmptyPalette | QuantizeError::CorruptPixelBuffer { .. }
        )
    }
}

impl fmt::Display for QuantizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantizeError::EmptyPalette => write!(f, "palette cannot be empty"),
            QuantizeError::CorruptPixelBuffer { len } => {
                write!(
                    f,
                    "pixel buffer length {} is not a multiple of 4 (RGBA)",
                    len
                )
            }
            QuantizeError::InternalLookupInconsistency { key } => {
                write!(f, "color {} missing from lookup cache", key)
            }
        }
    }
}

impl std::error::Error for QuantizeError {}
