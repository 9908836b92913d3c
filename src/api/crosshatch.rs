use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Json, Response},
};
use hatch_core::{Progress, Style};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::CrosshatchPipeline;

pub const WIDTH_HEADER: &str = "x-crosshatch-width";
pub const HEIGHT_HEADER: &str = "x-crosshatch-height";
pub const STYLE_HEADER: &str = "x-crosshatch-style";

/// Query parameters for the crosshatch endpoint
#[derive(Debug, Default, Deserialize)]
pub struct CrosshatchQuery {
    /// `horizontal` or `vortex`; config default when absent
    pub style: Option<String>,
}

/// Render an uploaded portrait as a crosshatched drawing
///
/// The body is the encoded source image (PNG, JPEG or WebP). The response
/// is an 8-bit grayscale PNG no larger than the configured maximum side.
#[utoipa::path(
    post,
    path = "/api/crosshatch",
    request_body(content = Vec<u8>, description = "Encoded source image", content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Grayscale PNG rendering", content_type = "image/png"),
        (status = 400, description = "Empty body, unknown style or invalid input"),
        (status = 422, description = "Body is not a decodable image"),
        (status = 502, description = "Segmentation or texture failure"),
    ),
    params(
        ("style" = Option<String>, Query, description = "Hatch style: 'horizontal' or 'vortex'"),
    ),
    tag = "Crosshatch"
)]
pub async fn handle_crosshatch(
    State(pipeline): State<Arc<CrosshatchPipeline>>,
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<CrosshatchQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    if body.is_empty() {
        return Err(ApiError::EmptyBody);
    }

    let style = match query.style.as_deref() {
        Some(raw) => raw
            .parse::<Style>()
            .map_err(|_| ApiError::InvalidStyle(raw.to_string()))?,
        None => config.default_style,
    };

    tracing::info!(style = %style, upload_bytes = body.len(), "Crosshatch request received");

    let progress: Arc<dyn Progress> = Arc::new(|fraction: f32, label: &str| {
        tracing::debug!(fraction, label, "Render progress");
    });
    let rendered = pipeline.render_png(body, style, progress).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_LENGTH, rendered.png.len().to_string()),
            (HeaderName::from_static(WIDTH_HEADER), rendered.width.to_string()),
            (HeaderName::from_static(HEIGHT_HEADER), rendered.height.to_string()),
            (HeaderName::from_static(STYLE_HEADER), style.as_str().to_string()),
        ],
        Bytes::from(rendered.png),
    )
        .into_response())
}

/// One available hatch style
#[derive(Debug, Serialize, ToSchema)]
pub struct StyleInfo {
    /// Style name accepted by `?style=`
    pub name: String,
    /// Textures layered by this style, in layer order
    pub textures: Vec<String>,
}

/// Response from the /api/styles endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct StylesResponse {
    /// Style used when none is requested
    pub default: String,
    pub styles: Vec<StyleInfo>,
}

/// List the available hatch styles
#[utoipa::path(
    get,
    path = "/api/styles",
    responses(
        (status = 200, description = "Available styles", body = StylesResponse),
    ),
    tag = "Crosshatch"
)]
pub async fn handle_styles(State(config): State<Arc<AppConfig>>) -> Json<StylesResponse> {
    let styles = Style::ALL
        .into_iter()
        .map(|style| StyleInfo {
            name: style.as_str().to_string(),
            textures: style
                .layer_sources()
                .into_array()
                .into_iter()
                .map(|(name, _)| name.as_str().to_string())
                .collect(),
        })
        .collect();

    Json(StylesResponse {
        default: config.default_style.as_str().to_string(),
        styles,
    })
}
