use lab_quantize::{QuantizeError, Quantized, Quantizer};
use std::sync::Arc;
use std::time::Instant;

use crate::error::ApiError;
use crate::services::RgbaImage;

/// Remap an image to the palette behind `quantizer`
///
/// Uses the rayon pool when built with the `parallel` feature.
pub fn recolor(quantizer: &Quantizer, image: &RgbaImage) -> Result<Quantized, QuantizeError> {
    let started = Instant::now();

    #[cfg(feature = "parallel")]
    let result = quantizer.quantize_par(&image.pixels)?;
    #[cfg(not(feature = "parallel"))]
    let result = quantizer.quantize(&image.pixels)?;

    tracing::debug!(
        width = image.width,
        height = image.height,
        unique_colors = result.unique_colors,
        palette = quantizer.index().len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Quantized image"
    );
    Ok(result)
}

/// Run [`recolor`] on the blocking thread pool
pub async fn recolor_blocking(
    quantizer: Arc<Quantizer>,
    image: RgbaImage,
) -> Result<(RgbaImage, Quantized), ApiError> {
    tokio::task::spawn_blocking(move || {
        let result = recolor(&quantizer, &image)?;
        Ok::<_, ApiError>((image, result))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Quantize task failed: {e}")))?
}
