pub mod image_codec;
pub mod palette_service;
pub mod palette_source;
pub mod recolor;

pub use image_codec::{decode_png, encode_png, RgbaImage};
pub use palette_service::{palette_fingerprint, PaletteService, PaletteSnapshot};
pub use palette_source::PaletteSource;
pub use recolor::{recolor, recolor_blocking};
