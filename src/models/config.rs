use crate::assets::AssetLoader;
use hatch_core::{Crosshatcher, ResampleFilter, Style};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Longest output side in pixels
    pub max_dimension: u32,

    /// Filter for image and mask resampling
    pub resample_filter: ResampleFilter,

    /// Cutoff for re-binarizing the resampled mask
    pub mask_cutoff: u8,

    /// Style used when a request does not specify one
    pub default_style: Style,

    /// Directory holding the four hatch textures
    pub textures_dir: PathBuf,

    pub segmentation: SegmentationConfig,

    pub output: OutputConfig,

    pub server: ServerConfig,
}

/// Which segmenter backs the pipeline
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SegmenterKind {
    /// Whole frame is subject
    #[default]
    FullFrame,
    /// Source alpha channel is the mask
    Alpha,
    /// External segmentation service
    Http,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SegmentationConfig {
    pub kind: SegmenterKind,

    /// Endpoint for the `http` segmenter
    pub url: Option<String>,

    /// Request timeout for the `http` segmenter
    pub timeout_secs: u64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            kind: SegmenterKind::FullFrame,
            url: None,
            timeout_secs: 30,
        }
    }
}

impl SegmentationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Re-compress output PNGs with oxipng
    pub optimize_png: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { optimize_png: true }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Largest accepted request body
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_dimension: hatch_core::MAX_DIMENSION,
            resample_filter: ResampleFilter::default(),
            mask_cutoff: hatch_core::MASK_CUTOFF,
            default_style: Style::default(),
            textures_dir: PathBuf::from("textures"),
            segmentation: SegmentationConfig::default(),
            output: OutputConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        max_dimension = config.max_dimension,
                        filter = %config.resample_filter,
                        style = %config.default_style,
                        segmenter = ?config.segmentation.kind,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Apply `TEXTURES_DIR` and `SEGMENTATION_URL` from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup
    ///
    /// Setting a segmentation URL also switches the segmenter to `http`.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup("TEXTURES_DIR").filter(|v| !v.is_empty()) {
            self.textures_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup("SEGMENTATION_URL").filter(|v| !v.is_empty()) {
            self.segmentation.kind = SegmenterKind::Http;
            self.segmentation.url = Some(url);
        }
        self
    }

    /// Renderer configured from this config
    pub fn crosshatcher(&self) -> Crosshatcher {
        Crosshatcher::new()
            .max_dimension(self.max_dimension)
            .filter(self.resample_filter)
            .mask_cutoff(self.mask_cutoff)
    }
}
