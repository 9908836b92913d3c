//! Downscaling for the luminance image and the segmentation mask.
//!
//! Target dimensions follow a fixed truncation rule (see
//! [`target_dimensions`]); every later stage crops textures to exactly
//! these sizes, so the rule must not be changed to rounding.

use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};

use super::options::ResampleFilter;
use crate::raster::{Raster, RasterError};

/// Dimensions a `width x height` source is scaled to under `cap`.
///
/// Returns `None` when the longer side already fits (`cap / max >= 1`).
/// Otherwise computes `ratio = cap / max(width, height)` and truncates
/// `ratio * width` and `ratio * height` toward zero. A side that would
/// truncate to zero is kept at one pixel.
///
/// # Example
///
/// ```
/// use hatch_core::target_dimensions;
///
/// assert_eq!(target_dimensions(2000, 1000, 1200), Some((1200, 600)));
/// assert_eq!(target_dimensions(1200, 800, 1200), None);
/// ```
pub fn target_dimensions(width: u32, height: u32, cap: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    let ratio = cap as f64 / longest as f64;
    if ratio >= 1.0 {
        return None;
    }
    let new_width = ((ratio * width as f64) as u32).max(1);
    let new_height = ((ratio * height as f64) as u32).max(1);
    Some((new_width, new_height))
}

/// Scale `source` so its longer side fits within `cap`.
///
/// Borrows the input unchanged when no scaling is needed.
pub fn fit_within(
    source: &Raster,
    cap: u32,
    filter: ResampleFilter,
) -> Result<Cow<'_, Raster>, RasterError> {
    match target_dimensions(source.width(), source.height(), cap) {
        None => Ok(Cow::Borrowed(source)),
        Some((w, h)) => Ok(Cow::Owned(resample_unchecked(source, w, h, filter)?)),
    }
}

/// Resample `source` to exactly `width x height`.
///
/// Equal dimensions return a copy of the input. Zero targets are rejected.
pub fn resample(
    source: &Raster,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<Raster, RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::ZeroDimension { width, height });
    }
    if source.dimensions() == (width, height) {
        return Ok(source.clone());
    }
    resample_unchecked(source, width, height, filter)
}

fn resample_unchecked(
    source: &Raster,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<Raster, RasterError> {
    match filter {
        ResampleFilter::Lanczos3 => resize_lanczos(source, width, height),
        ResampleFilter::ProgressiveBilinear => Ok(resize_progressive(source, width, height)),
    }
}

fn resize_lanczos(source: &Raster, width: u32, height: u32) -> Result<Raster, RasterError> {
    let view: ImageBuffer<Luma<u8>, &[u8]> =
        ImageBuffer::from_raw(source.width(), source.height(), source.data()).ok_or(
            RasterError::BufferLength {
                expected: source.width() as usize * source.height() as usize,
                actual: source.len(),
            },
        )?;
    let resized = imageops::resize(&view, width, height, FilterType::Lanczos3);
    Ok(Raster::from_parts(resized.into_raw(), width, height))
}

fn resize_progressive(source: &Raster, width: u32, height: u32) -> Raster {
    let mut current = Cow::Borrowed(source);
    while current.width() as f64 / 2.0 >= width as f64
        && current.height() as f64 / 2.0 >= height as f64
    {
        let half = bilinear(&current, current.width() / 2, current.height() / 2);
        current = Cow::Owned(half);
    }
    bilinear(&current, width, height)
}

/// Source sample pair and blend weight for one output coordinate.
#[derive(Debug, Clone, Copy)]
struct Tap {
    lo: usize,
    hi: usize,
    frac: f64,
}

/// Pixel-centre aligned taps with edge clamping.
fn axis_taps(src_len: u32, dst_len: u32) -> Vec<Tap> {
    let scale = src_len as f64 / dst_len as f64;
    let last = (src_len - 1) as f64;
    (0..dst_len)
        .map(|i| {
            let pos = ((i as f64 + 0.5) * scale - 0.5).clamp(0.0, last);
            let lo = pos.floor();
            Tap {
                lo: lo as usize,
                hi: ((lo as u32) + 1).min(src_len - 1) as usize,
                frac: pos - lo,
            }
        })
        .collect()
}

fn bilinear(source: &Raster, width: u32, height: u32) -> Raster {
    let xs = axis_taps(source.width(), width);
    let ys = axis_taps(source.height(), height);
    let mut data = Vec::with_capacity(width as usize * height as usize);

    for ty in &ys {
        let top = source.row(ty.lo as u32);
        let bottom = source.row(ty.hi as u32);
        for tx in &xs {
            let t = top[tx.lo] as f64 * (1.0 - tx.frac) + top[tx.hi] as f64 * tx.frac;
            let b = bottom[tx.lo] as f64 * (1.0 - tx.frac) + bottom[tx.hi] as f64 * tx.frac;
            let v = t * (1.0 - ty.frac) + b * ty.frac;
            data.push(v.round().clamp(0.0, 255.0) as u8);
        }
    }

    Raster::from_parts(data, width, height)
}
