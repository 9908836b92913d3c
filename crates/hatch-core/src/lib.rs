//! hatch-core: Threshold crosshatching for grayscale portraits
//!
//! This library turns a color image plus a subject mask into a grayscale
//! rendering that imitates hand-drawn pen crosshatching. Tone is carried
//! entirely by texture density: darker regions receive more overlapping
//! hatch layers, and the background is paper white.
//!
//! # Quick Start
//!
//! The [`Crosshatcher`] builder is the primary entry point:
//!
//! ```
//! use hatch_core::{Crosshatcher, NoProgress, Raster, RgbaRaster, Style, TextureSet};
//!
//! let source = RgbaRaster::filled(16, 16, [120, 120, 120, 255]).unwrap();
//! let mask = Raster::filled(16, 16, 255).unwrap();
//! let stroke = Raster::filled(32, 32, 0).unwrap();
//! let textures = TextureSet::new(stroke.clone(), stroke.clone(), stroke.clone(), stroke);
//!
//! let out = Crosshatcher::new()
//!     .render(&source, &mask, &textures, Style::Horizontal, &NoProgress)
//!     .unwrap();
//! assert_eq!(out.dimensions(), (16, 16));
//! ```
//!
//! Segmentation is not part of this crate. Callers that compute the mask
//! asynchronously use [`Crosshatcher::prepare`] and
//! [`Crosshatcher::finish`] around their own segmentation step.
//!
//! # Pipeline Overview
//!
//! ```text
//! RGBA source              mask (source resolution)
//!     |                         |
//!     v                         |
//! luminance (BT.601, rounded)   |
//!     |                         |
//!     v                         v
//! fit to MAX_DIMENSION ---> resample to fitted size
//!     |                         |
//!     |                         v
//!     |                    re-binarize (> 128)
//!     |                         |
//!     +-----------+-------------+
//!                 v
//!        composite on white       (mask == 255 ? luma : 255)
//!                 |
//!                 v
//!        thresholds (low, mid, high)   2nd..98th percentile, 4 zones
//!                 |
//!     +-----------+-------------+
//!     v           v             v
//!   right       left      horizontal | vortex      (texture windows)
//!     |           |             |
//!   < low       < mid        < high                (hatch, in parallel)
//!     |           |             |
//!     +-----------+-------------+
//!                 v
//!          blend: (a + b + c) / 3
//! ```
//!
//! A pixel darker than all three thresholds is covered by all three
//! textures; a pixel at or above `high` (including the whole background)
//! is left white.
//!
//! # Texture Alignment
//!
//! Textures are larger than any render and are cropped, never resampled.
//! Directional textures are cropped from the top-left corner, so stroke
//! phase and spacing are identical between a 300 px and a 1200 px render.
//! The vortex texture is cropped from its centre so the spiral's focal
//! point stays centred in the output.
//!
//! # Errors
//!
//! Every failure is a [`RasterError`] of kind [`ErrorKind::InvalidInput`]:
//! a zero-sized raster, a buffer of the wrong length, operands of
//! different sizes, or a texture too small for the requested window. No
//! stage returns partial output.

pub mod api;
pub mod hatch;
pub mod preprocess;
pub mod raster;
pub mod tone;


pub use api::{
    report_stage, CrosshatchSettings, Crosshatcher, NoProgress, PreparedImage, Progress, Stage,
};
pub use hatch::{
    align_texture, apply_hatch, blend, CropAnchor, HatchLayers, ParseStyleError, Style,
    TextureName, TextureSet,
};
pub use preprocess::{
    extract_luminance, fit_within, luma, resample, target_dimensions, ParseFilterError,
    ResampleFilter, MAX_DIMENSION,
};
pub use raster::{ErrorKind, Raster, RasterError, RgbaRaster};
pub use tone::{
    binarize_mask, composite_on_white, compute_thresholds, ThresholdTriple, MASK_CUTOFF,
};
