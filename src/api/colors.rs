use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::ColorRecord;
use crate::services::PaletteService;

/// List the palette colors
///
/// Returns every reference color of the configured palette source in
/// source order. The palette is cached for `palette.cache_ttl_secs`.
#[utoipa::path(
    get,
    path = "/api/colors",
    responses(
        (status = 200, description = "Palette colors", body = Vec<ColorRecord>),
        (status = 500, description = "Palette source could not be read"),
    ),
    tag = "Palette"
)]
pub async fn handle_colors(
    State(palette): State<Arc<PaletteService>>,
) -> Result<Json<Vec<ColorRecord>>, ApiError> {
    let snapshot = palette.snapshot().await?;
    tracing::info!(colors = snapshot.len(), "Palette requested");
    Ok(Json(snapshot.colors.clone()))
}
