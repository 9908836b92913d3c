//! Crosshatcher builder -- the synchronous entry point for the crate.
//!
//! Rendering is split around the segmentation step, which the caller
//! supplies: [`Crosshatcher::prepare`] produces the fitted luminance image,
//! the caller computes a mask at source resolution, and
//! [`Crosshatcher::finish`] turns both into the crosshatched raster.

use crate::hatch::{align_texture, apply_hatch, blend, HatchLayers, Style, TextureSet};
use crate::preprocess::{extract_luminance, fit_within, resample, ResampleFilter, MAX_DIMENSION};
use crate::raster::{Raster, RasterError, RgbaRaster};
use crate::tone::{binarize_mask, composite_on_white, compute_thresholds, MASK_CUTOFF};

use super::progress::{report_stage, Progress, Stage};

/// Luminance image fitted to the working size, plus the source size the
/// segmentation mask must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedImage {
    luminance: Raster,
    source_dimensions: (u32, u32),
}

impl PreparedImage {
    pub fn luminance(&self) -> &Raster {
        &self.luminance
    }

    /// Dimensions of the original RGBA source.
    pub fn source_dimensions(&self) -> (u32, u32) {
        self.source_dimensions
    }

    /// Dimensions of the final output.
    pub fn dimensions(&self) -> (u32, u32) {
        self.luminance.dimensions()
    }
}

/// Read-only view of a [`Crosshatcher`]'s configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrosshatchSettings {
    /// Longest output side.
    pub max_dimension: u32,
    pub filter: ResampleFilter,
    /// Resampled mask values above this are foreground.
    pub mask_cutoff: u8,
}

/// Crosshatch renderer configuration.
///
/// Configuration methods consume and return `self`; the render methods take
/// `&self`, so one value can be reused across images and threads.
///
/// # Example
///
/// ```
/// use hatch_core::{Crosshatcher, NoProgress, Raster, RgbaRaster, Style, TextureSet};
///
/// let source = RgbaRaster::filled(40, 20, [90, 90, 90, 255]).unwrap();
/// let mask = Raster::filled(40, 20, 255).unwrap();
/// let texture = Raster::filled(64, 64, 0).unwrap();
/// let textures = TextureSet::new(
///     texture.clone(),
///     texture.clone(),
///     texture.clone(),
///     texture,
/// );
///
/// let out = Crosshatcher::new()
///     .max_dimension(32)
///     .render(&source, &mask, &textures, Style::Vortex, &NoProgress)
///     .unwrap();
/// assert_eq!(out.dimensions(), (32, 16));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crosshatcher {
    max_dimension: u32,
    filter: ResampleFilter,
    mask_cutoff: u8,
}

impl Default for Crosshatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Crosshatcher {
    /// Default cap is [`MAX_DIMENSION`], Lanczos3 filtering and a mask
    /// cutoff of [`MASK_CUTOFF`].
    pub fn new() -> Self {
        Self {
            max_dimension: MAX_DIMENSION,
            filter: ResampleFilter::default(),
            mask_cutoff: MASK_CUTOFF,
        }
    }

    /// Set the longest output side. Zero is treated as one.
    #[inline]
    pub fn max_dimension(mut self, cap: u32) -> Self {
        self.max_dimension = cap.max(1);
        self
    }

    /// Set the resampling filter used for both image and mask.
    #[inline]
    pub fn filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the cutoff used to re-binarize the resampled mask.
    #[inline]
    pub fn mask_cutoff(mut self, cutoff: u8) -> Self {
        self.mask_cutoff = cutoff;
        self
    }

    /// Current configuration.
    pub fn settings(&self) -> CrosshatchSettings {
        CrosshatchSettings {
            max_dimension: self.max_dimension,
            filter: self.filter,
            mask_cutoff: self.mask_cutoff,
        }
    }

    /// Convert to luminance and scale to the working size.
    pub fn prepare(
        &self,
        source: &RgbaRaster,
        progress: &dyn Progress,
    ) -> Result<PreparedImage, RasterError> {
        report_stage(progress, Stage::Luminance);
        let gray = extract_luminance(source);

        report_stage(progress, Stage::Resize);
        let luminance = fit_within(&gray, self.max_dimension, self.filter)?.into_owned();
        tracing::debug!(
            source = ?source.dimensions(),
            fitted = ?luminance.dimensions(),
            filter = %self.filter,
            "prepared luminance"
        );

        Ok(PreparedImage {
            luminance,
            source_dimensions: source.dimensions(),
        })
    }

    /// Composite, threshold, hatch and blend.
    ///
    /// `mask` must be at the source resolution recorded in `prepared`.
    pub fn finish(
        &self,
        prepared: PreparedImage,
        mask: &Raster,
        textures: &TextureSet,
        style: Style,
        progress: &dyn Progress,
    ) -> Result<Raster, RasterError> {
        if mask.dimensions() != prepared.source_dimensions {
            return Err(RasterError::DimensionMismatch {
                stage: "segmentation mask",
                expected: prepared.source_dimensions,
                actual: mask.dimensions(),
            });
        }
        let (width, height) = prepared.dimensions();

        report_stage(progress, Stage::MaskResize);
        let resized_mask = resample(mask, width, height, self.filter)?;
        let binary_mask = binarize_mask(&resized_mask, self.mask_cutoff);

        report_stage(progress, Stage::Composite);
        let layered = composite_on_white(&prepared.luminance, &binary_mask)?;

        report_stage(progress, Stage::Thresholds);
        let thresholds = compute_thresholds(&layered);
        tracing::debug!(
            low = thresholds.low,
            mid = thresholds.mid,
            high = thresholds.high,
            "computed thresholds"
        );

        report_stage(progress, Stage::Textures);
        let crops = style
            .layer_sources()
            .map(|(name, anchor)| {
                align_texture(textures.get(name), name.as_str(), width, height, anchor)
            })
            .transpose()?;

        report_stage(progress, Stage::Hatching);
        let jobs = crops.zip(thresholds.into_layers());
        let (primary, (secondary, style_dependent)) = rayon::join(
            || apply_hatch(&layered, &jobs.primary.0, jobs.primary.1),
            || {
                rayon::join(
                    || apply_hatch(&layered, &jobs.secondary.0, jobs.secondary.1),
                    || apply_hatch(&layered, &jobs.style_dependent.0, jobs.style_dependent.1),
                )
            },
        );
        let hatched = HatchLayers::new(primary, secondary, style_dependent).transpose()?;

        report_stage(progress, Stage::Blending);
        let output = blend(&hatched)?;

        report_stage(progress, Stage::Done);
        Ok(output)
    }

    /// [`prepare`](Self::prepare) followed by [`finish`](Self::finish).
    pub fn render(
        &self,
        source: &RgbaRaster,
        mask: &Raster,
        textures: &TextureSet,
        style: Style,
        progress: &dyn Progress,
    ) -> Result<Raster, RasterError> {
        let prepared = self.prepare(source, progress)?;
        self.finish(prepared, mask, textures, style, progress)
    }
}
