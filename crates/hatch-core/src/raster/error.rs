//! Error type shared by every pipeline stage.
//!
//! All failures raised inside the pixel pipeline are precondition
//! violations: a stage was handed a buffer that does not satisfy its size
//! contract. None of them are recoverable mid-pipeline, and no stage
//! writes partial output before returning one.

use thiserror::Error;

/// Broad classification of a pipeline failure.
///
/// The application layer maps these onto its own error kinds; the core
/// only ever produces [`ErrorKind::InvalidInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Non-positive dimensions or mismatched operand sizes.
    InvalidInput,
}

/// Error raised by raster construction and pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// A raster or resize target with a zero side.
    #[error("raster dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    /// Sample buffer does not match `width * height * channels`.
    #[error("buffer holds {actual} samples, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    /// Two operands of a per-pixel stage differ in size.
    #[error("{stage}: expected {}x{}, got {}x{}", expected.0, expected.1, actual.0, actual.1)]
    DimensionMismatch {
        stage: &'static str,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// A texture is smaller than the crop window requested from it.
    #[error("texture {name} is {}x{}, cannot crop {}x{}", texture.0, texture.1, target.0, target.1)]
    TextureTooSmall {
        name: &'static str,
        texture: (u32, u32),
        target: (u32, u32),
    },
}

impl RasterError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }

    pub(crate) fn mismatch(stage: &'static str, expected: (u32, u32), actual: (u32, u32)) -> Self {
        RasterError::DimensionMismatch {
            stage,
            expected,
            actual,
        }
    }
}
