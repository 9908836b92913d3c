//! Subject segmentation collaborators.
//!
//! A segmenter turns the RGBA source into a mask at the source resolution:
//! 255 for subject, 0 for background. Intermediate values are allowed; the
//! pipeline re-binarizes after resampling.

use async_trait::async_trait;
use hatch_core::{binarize_mask, Raster, RgbaRaster, MASK_CUTOFF};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::SegmentationError;
use crate::models::{SegmentationConfig, SegmenterKind};
use crate::rendering::{decode_luminance, encode_rgba_png};

/// Trait for subject segmentation backends
#[async_trait]
pub trait Segmenter: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Prepare the backend (load a model, open a connection)
    async fn warm_up(&self) -> Result<(), SegmentationError> {
        Ok(())
    }

    /// Compute a mask at the source resolution
    async fn segment(&self, source: &RgbaRaster) -> Result<Raster, SegmentationError>;
}

/// Treats the whole frame as subject
#[derive(Debug, Default, Clone, Copy)]
pub struct FullFrameSegmenter;

#[async_trait]
impl Segmenter for FullFrameSegmenter {
    fn name(&self) -> &'static str {
        "full-frame"
    }

    async fn segment(&self, source: &RgbaRaster) -> Result<Raster, SegmentationError> {
        let (width, height) = source.dimensions();
        Raster::filled(width, height, 255).map_err(|e| SegmentationError::Decode(e.to_string()))
    }
}

/// Uses the source alpha channel, for portraits already cut out
#[derive(Debug, Default, Clone, Copy)]
pub struct AlphaSegmenter;

#[async_trait]
impl Segmenter for AlphaSegmenter {
    fn name(&self) -> &'static str {
        "alpha"
    }

    async fn segment(&self, source: &RgbaRaster) -> Result<Raster, SegmentationError> {
        Ok(binarize_mask(&source.alpha(), MASK_CUTOFF))
    }
}

/// Loads a precomputed mask image from disk
#[derive(Debug, Clone)]
pub struct MaskFileSegmenter {
    path: PathBuf,
}

impl MaskFileSegmenter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Segmenter for MaskFileSegmenter {
    fn name(&self) -> &'static str {
        "mask-file"
    }

    async fn segment(&self, source: &RgbaRaster) -> Result<Raster, SegmentationError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| SegmentationError::MaskFile {
                path: self.path.clone(),
                source: e,
            })?;
        let mask = decode_luminance(&bytes).map_err(|e| SegmentationError::Decode(e.to_string()))?;
        check_size(source, mask)
    }
}

/// Posts the source as PNG to an external segmentation service
///
/// The service must answer `2xx` with an encoded mask image at the source
/// resolution. Requests are not retried.
pub struct HttpSegmenter {
    client: reqwest::Client,
    url: String,
}

impl HttpSegmenter {
    pub fn new(
        url: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, SegmentationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Segmenter for HttpSegmenter {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn segment(&self, source: &RgbaRaster) -> Result<Raster, SegmentationError> {
        let body = encode_rgba_png(source).map_err(|e| SegmentationError::Encode(e.to_string()))?;
        tracing::info!(
            url = %self.url,
            width = source.width(),
            height = source.height(),
            bytes = body.len(),
            "Requesting segmentation"
        );

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "image/png")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, status = status.as_u16(), "Segmentation service error");
            return Err(SegmentationError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let mask = decode_luminance(&bytes).map_err(|e| SegmentationError::Decode(e.to_string()))?;
        check_size(source, mask)
    }
}

fn check_size(source: &RgbaRaster, mask: Raster) -> Result<Raster, SegmentationError> {
    let (width, height) = source.dimensions();
    if mask.dimensions() != (width, height) {
        return Err(SegmentationError::SizeMismatch {
            width,
            height,
            actual_width: mask.width(),
            actual_height: mask.height(),
        });
    }
    Ok(mask)
}

/// Build the segmenter selected by config
pub fn build_segmenter(
    config: &SegmentationConfig,
) -> Result<Arc<dyn Segmenter>, SegmentationError> {
    let segmenter: Arc<dyn Segmenter> = match config.kind {
        SegmenterKind::FullFrame => Arc::new(FullFrameSegmenter),
        SegmenterKind::Alpha => Arc::new(AlphaSegmenter),
        SegmenterKind::Http => {
            let url = config.url.as_deref().ok_or(SegmentationError::NotConfigured(
                "segmentation.url is required for kind http",
            ))?;
            Arc::new(HttpSegmenter::new(url, config.timeout())?)
        }
    };
    tracing::info!(segmenter = segmenter.name(), "Segmenter configured");
    Ok(segmenter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_full_frame_is_all_foreground() {
        let source = RgbaRaster::filled(5, 3, [1, 2, 3, 0]).unwrap();
        let mask = FullFrameSegmenter.segment(&source).await.unwrap();
        assert_eq!(mask.dimensions(), (5, 3));
        assert!(mask.data().iter().all(|&v| v == 255));
    }

    #[tokio::test]
    async fn test_alpha_thresholds_at_cutoff() {
        let source = RgbaRaster::new(
            vec![0, 0, 0, 0, 0, 0, 0, 128, 0, 0, 0, 129, 0, 0, 0, 255],
            4,
            1,
        )
        .unwrap();
        let mask = AlphaSegmenter.segment(&source).await.unwrap();
        assert_eq!(mask.data(), &[0, 0, 255, 255]);
    }

    #[tokio::test]
    async fn test_mask_file_size_checked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.png");
        let mask = Raster::filled(4, 4, 255).unwrap();
        let png = crate::rendering::encode_grayscale_png(&mask, false).unwrap();
        std::fs::write(&path, png).unwrap();

        let segmenter = MaskFileSegmenter::new(&path);
        let ok = RgbaRaster::filled(4, 4, [0, 0, 0, 255]).unwrap();
        assert_eq!(segmenter.segment(&ok).await.unwrap(), mask);

        let wrong = RgbaRaster::filled(8, 4, [0, 0, 0, 255]).unwrap();
        let err = segmenter.segment(&wrong).await.unwrap_err();
        assert!(matches!(err, SegmentationError::SizeMismatch { width: 8, height: 4, .. }));
    }

    #[tokio::test]
    async fn test_mask_file_missing() {
        let segmenter = MaskFileSegmenter::new("/nonexistent/mask.png");
        let source = RgbaRaster::filled(1, 1, [0, 0, 0, 255]).unwrap();
        let err = segmenter.segment(&source).await.unwrap_err();
        assert!(matches!(err, SegmentationError::MaskFile { .. }));
    }

    #[test]
    fn test_build_http_requires_url() {
        let config = SegmentationConfig {
            kind: SegmenterKind::Http,
            url: None,
            timeout_secs: 1,
        };
        assert!(matches!(
            build_segmenter(&config),
            Err(SegmentationError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_build_default_is_full_frame() {
        let segmenter = build_segmenter(&SegmentationConfig::default()).unwrap();
        assert_eq!(segmenter.name(), "full-frame");
    }
}
