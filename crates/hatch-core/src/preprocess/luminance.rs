//! RGB(A) to luminance conversion.
//!
//! Uses the ITU-R BT.601 luma weights on gamma-encoded sample values, the
//! same weights applied to hatch textures when they are loaded, so both
//! sides of the hatch comparison live on one tonal scale.

use crate::raster::{Raster, RgbaRaster};

/// Red weight.
pub const LUMA_R: f64 = 0.299;
/// Green weight.
pub const LUMA_G: f64 = 0.587;
/// Blue weight.
pub const LUMA_B: f64 = 0.114;

/// Luminance of one pixel: `round(0.299 R + 0.587 G + 0.114 B)`.
///
/// Rounds half away from zero (all inputs are non-negative, so this is
/// round-half-up).
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64;
    y.round().clamp(0.0, 255.0) as u8
}

/// Convert an RGBA raster to single-channel luminance. Alpha is ignored.
///
/// # Example
///
/// ```
/// use hatch_core::{extract_luminance, RgbaRaster};
///
/// let rgba = RgbaRaster::new(vec![255, 0, 0, 255, 0, 0, 255, 0], 2, 1).unwrap();
/// let gray = extract_luminance(&rgba);
/// assert_eq!(gray.data(), &[76, 29]);
/// ```
pub fn extract_luminance(source: &RgbaRaster) -> Raster {
    let data = source
        .data()
        .chunks_exact(4)
        .map(|p| luma(p[0], p[1], p[2]))
        .collect();
    Raster::from_parts(data, source.width(), source.height())
}
