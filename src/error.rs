//! Error types and their HTTP response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hatch_core::RasterError;
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Empty request body")]
    EmptyBody,

    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure of the segmentation collaborator
#[derive(Debug, Error)]
pub enum SegmentationError {
    #[error("Segmentation service not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Segmentation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Segmentation service returned status {0}")]
    Status(u16),

    #[error("Failed to encode source for segmentation: {0}")]
    Encode(String),

    #[error("Segmentation mask could not be decoded: {0}")]
    Decode(String),

    #[error("Segmentation mask is {actual_width}x{actual_height}, expected {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("Failed to read mask file {path}: {source}")]
    MaskFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failure to load or generate hatch textures
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("Failed to read texture {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode texture {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Failed to encode texture {path}: {reason}")]
    Encode { path: PathBuf, reason: String },

    #[error("Failed to write texture {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] RasterError),

    #[error("Segmentation failed: {0}")]
    Segmentation(#[from] SegmentationError),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Render task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// HTTP status for this failure
    pub fn status(&self) -> StatusCode {
        match self {
            PipelineError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PipelineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PipelineError::Segmentation(_) | PipelineError::Texture(_) => StatusCode::BAD_GATEWAY,
            PipelineError::PngEncode(_) | PipelineError::Task(_) | PipelineError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::EmptyBody => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::InvalidStyle(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Pipeline(e) => (e.status(), e.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
