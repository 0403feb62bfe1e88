pub mod colors;
pub mod image;

pub use colors::{handle_colors, __path_handle_colors};
pub use image::{__path_handle_default_image, __path_handle_upload_image};
pub use image::{
    handle_default_image, handle_upload_image, ImageQuery, OutputFormat, QuantizedImageResponse,
    UploadImageForm,
};
