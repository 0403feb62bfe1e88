use axum::{
    body::Bytes,
    extract::{Multipart, Query, State},
    http::header,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::LabValue;
use crate::services::{decode_png, encode_png, recolor_blocking, PaletteService, RgbaImage};

/// Name of the multipart field carrying the upload
const IMAGE_FIELD: &str = "image";

/// Response body format
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Png,
}

/// Query parameters for image endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ImageQuery {
    /// `json` (default) or `png`
    #[serde(default)]
    pub format: OutputFormat,
}

/// Quantized image as JSON
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuantizedImageResponse {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Row-major RGBA bytes, 4 per pixel
    pub pixels: Vec<u8>,
    /// L*a*b* coordinates of every palette color, in palette order
    pub palette_lab: Vec<LabValue>,
    /// Distinct RGBA values in the source image
    pub unique_colors: usize,
}

/// Multipart upload form
#[derive(Debug, ToSchema)]
pub struct UploadImageForm {
    /// PNG file
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

/// Quantize the built-in sample image
#[utoipa::path(
    get,
    path = "/api/default-image",
    params(
        ("format" = Option<String>, Query, description = "'json' (default) or 'png'"),
    ),
    responses(
        (status = 200, description = "Quantized sample image", body = QuantizedImageResponse),
        (status = 400, description = "Palette has no colors"),
        (status = 500, description = "Palette source or sample image unavailable"),
    ),
    tag = "Image"
)]
pub async fn handle_default_image(
    State(palette): State<Arc<PaletteService>>,
    State(assets): State<Arc<AssetLoader>>,
    Query(query): Query<ImageQuery>,
) -> Result<Response, ApiError> {
    let data = assets
        .default_image()
        .ok_or_else(|| ApiError::Internal("Embedded default image missing".to_string()))?;
    let image = decode_png(&data)
        .map_err(|e| ApiError::Internal(format!("Default image unreadable: {e}")))?;

    quantize_response(&palette, image, query.format).await
}

/// Quantize an uploaded PNG
///
/// Every pixel is replaced by the nearest palette color in CIE L*a*b*.
/// Alpha is kept from the upload.
#[utoipa::path(
    post,
    path = "/api/upload-image",
    request_body(content = UploadImageForm, content_type = "multipart/form-data"),
    params(
        ("format" = Option<String>, Query, description = "'json' (default) or 'png'"),
    ),
    responses(
        (status = 200, description = "Quantized image", body = QuantizedImageResponse),
        (status = 400, description = "Missing or undecodable image, or empty palette"),
        (status = 500, description = "Palette source unavailable or internal error"),
    ),
    tag = "Image"
)]
pub async fn handle_upload_image(
    State(palette): State<Arc<PaletteService>>,
    Query(query): Query<ImageQuery>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some(IMAGE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;
            data = Some(bytes);
            break;
        }
    }

    let data = data.ok_or_else(|| ApiError::BadRequest(format!("Missing '{IMAGE_FIELD}' field")))?;
    tracing::info!(size_bytes = data.len(), "Image uploaded");

    let image = decode_png(&data)?;
    quantize_response(&palette, image, query.format).await
}

async fn quantize_response(
    palette: &PaletteService,
    image: RgbaImage,
    format: OutputFormat,
) -> Result<Response, ApiError> {
    let snapshot = palette.snapshot().await?;
    let quantizer = snapshot.quantizer.clone().ok_or(ApiError::NoColors)?;

    let (image, result) = recolor_blocking(quantizer, image).await?;

    tracing::info!(
        width = image.width,
        height = image.height,
        unique_colors = result.unique_colors,
        "Image quantized"
    );

    match format {
        OutputFormat::Json => Ok(Json(QuantizedImageResponse {
            width: image.width,
            height: image.height,
            pixels: result.pixels,
            palette_lab: result.palette_lab.into_iter().map(LabValue::from).collect(),
            unique_colors: result.unique_colors,
        })
        .into_response()),
        OutputFormat::Png => {
            let png = encode_png(&RgbaImage::new(image.width, image.height, result.pixels)?)?;
            Ok((
                [(header::CONTENT_TYPE, "image/png")],
                Bytes::from(png),
            )
                .into_response())
        }
    }
}
