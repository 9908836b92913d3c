//! Source preparation: luminance extraction and resampling.
//!
//! 1. **Luminance** - BT.601 weighted sum, rounded to nearest
//! 2. **Fit** - scale so the longer side fits [`MAX_DIMENSION`], using the
//!    truncating dimension rule of [`target_dimensions`]
//!
//! The same resampler brings the segmentation mask down to the fitted
//! dimensions later in the pipeline.

mod luminance;
mod options;
mod resize;

pub use luminance::{extract_luminance, luma, LUMA_B, LUMA_G, LUMA_R};
pub use options::{ParseFilterError, ResampleFilter, MAX_DIMENSION};
pub use resize::{fit_within, resample, target_dimensions};
