//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::{header::CACHE_CONTROL, HeaderValue},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::models::AppConfig;
use crate::services::CrosshatchPipeline;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<CrosshatchPipeline>,
    pub config: Arc<AppConfig>,
}

impl FromRef<AppState> for Arc<CrosshatchPipeline> {
    fn from_ref(state: &AppState) -> Self {
        state.pipeline.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

/// Create application state from config, loading textures and the segmenter.
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let pipeline = CrosshatchPipeline::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to create crosshatch pipeline: {e}"))?;
    Ok(create_app_state_with(Arc::new(pipeline), Arc::new(config)))
}

/// Create application state around an existing pipeline.
pub fn create_app_state_with(pipeline: Arc<CrosshatchPipeline>, config: Arc<AppConfig>) -> AppState {
    AppState { pipeline, config }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
/// Renders are per-upload, so every response carries `Cache-Control: no-store`.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/api/crosshatch", post(api::handle_crosshatch))
        .route("/api/styles", get(api::handle_styles))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .layer(DefaultBodyLimit::max(body_limit))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}
