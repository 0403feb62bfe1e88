//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api;
use crate::assets::AssetLoader;
use crate::models::AppConfig;
use crate::services::{PaletteService, PaletteSource};

/// Listen address used when neither `BIND_ADDR` nor `PORT` is set.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Pick the listen address from `BIND_ADDR` and `PORT` values.
///
/// `BIND_ADDR` wins. A bare `PORT` listens on all interfaces. Empty values
/// count as unset.
pub fn resolve_bind_addr(bind_addr: Option<&str>, port: Option<&str>) -> String {
    let bind_addr = bind_addr.map(str::trim).filter(|v| !v.is_empty());
    let port = port.map(str::trim).filter(|v| !v.is_empty());

    match (bind_addr, port) {
        (Some(addr), _) => addr.to_string(),
        (None, Some(port)) => format!("0.0.0.0:{port}"),
        (None, None) => DEFAULT_BIND_ADDR.to_string(),
    }
}

/// Bind address from the process environment.
pub fn bind_addr_from_env() -> String {
    resolve_bind_addr(
        std::env::var("BIND_ADDR").ok().as_deref(),
        std::env::var("PORT").ok().as_deref(),
    )
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub assets: Arc<AssetLoader>,
    pub palette: Arc<PaletteService>,
}

impl FromRef<AppState> for Arc<PaletteService> {
    fn from_ref(state: &AppState) -> Self {
        state.palette.clone()
    }
}

impl FromRef<AppState> for Arc<AssetLoader> {
    fn from_ref(state: &AppState) -> Self {
        state.assets.clone()
    }
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(&asset_loader);
    create_app_state_with_config(config, asset_loader)
}

/// Create application state from an explicit config.
pub fn create_app_state_with_config(
    config: AppConfig,
    asset_loader: Arc<AssetLoader>,
) -> anyhow::Result<AppState> {
    let source = PaletteSource::new(config.palette.source.clone(), asset_loader.clone())
        .map_err(|e| anyhow::anyhow!("Failed to create palette source: {e}"))?;
    let palette = Arc::new(PaletteService::new(source, config.palette.cache_ttl()));

    Ok(AppState {
        config: Arc::new(config),
        assets: asset_loader,
        palette,
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
/// CORS is fully open so browser front-ends on other origins can call it.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/api/colors", get(api::handle_colors))
        .route("/api/default-image", get(api::handle_default_image))
        .route("/api/upload-image", post(api::handle_upload_image))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
