//! Tonal cut points for the three hatch layers.
//!
//! The range between the 2nd and 98th percentile of subject pixels is split
//! into four equal zones. Percentile clipping keeps a handful of specular
//! highlights or noise pixels from stretching the range.

use crate::hatch::HatchLayers;
use crate::raster::Raster;

use super::composite::BACKGROUND;

/// Lower clipping percentile.
pub const LOW_PERCENTILE: f64 = 2.0;
/// Upper clipping percentile.
pub const HIGH_PERCENTILE: f64 = 98.0;

/// Three non-decreasing thresholds dividing the tonal range into four zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdTriple {
    pub low: u8,
    pub mid: u8,
    pub high: u8,
}

impl ThresholdTriple {
    /// Returned when the composite holds no subject pixels at all.
    pub const FALLBACK: Self = Self {
        low: 64,
        mid: 128,
        high: 192,
    };

    pub fn new(low: u8, mid: u8, high: u8) -> Self {
        Self { low, mid, high }
    }

    pub fn as_array(&self) -> [u8; 3] {
        [self.low, self.mid, self.high]
    }

    /// Assign thresholds to layers in tonal order: the primary layer gets
    /// the lowest threshold and covers only the darkest zone.
    pub fn into_layers(self) -> HatchLayers<u8> {
        HatchLayers {
            primary: self.low,
            secondary: self.mid,
            style_dependent: self.high,
        }
    }
}

/// Derive the threshold triple from a composited raster.
///
/// Samples equal to 255 are treated as background and excluded. If nothing
/// remains, [`ThresholdTriple::FALLBACK`] is returned.
///
/// # Example
///
/// ```
/// use hatch_core::{compute_thresholds, Raster, ThresholdTriple};
///
/// let white = Raster::filled(8, 8, 255).unwrap();
/// assert_eq!(compute_thresholds(&white), ThresholdTriple::FALLBACK);
///
/// let flat = Raster::filled(8, 8, 150).unwrap();
/// assert_eq!(compute_thresholds(&flat), ThresholdTriple::new(150, 150, 150));
/// ```
pub fn compute_thresholds(layered: &Raster) -> ThresholdTriple {
    let mut pixels: Vec<u8> = layered
        .data()
        .iter()
        .copied()
        .filter(|&v| v < BACKGROUND)
        .collect();

    if pixels.is_empty() {
        return ThresholdTriple::FALLBACK;
    }

    pixels.sort_unstable();

    let lo = percentile(&pixels, LOW_PERCENTILE);
    let hi = percentile(&pixels, HIGH_PERCENTILE);
    let step = (hi - lo) / 4.0;

    // `as u8` truncates toward zero; all three values lie in [lo, hi].
    ThresholdTriple {
        low: (lo + step) as u8,
        mid: (lo + 2.0 * step) as u8,
        high: (lo + 3.0 * step) as u8,
    }
}

/// Linearly interpolated percentile over an ascending, non-empty slice.
pub(crate) fn percentile(sorted: &[u8], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let idx = (p / 100.0) * (sorted.len() - 1) as f64;
    let lo = idx.floor();
    let hi = idx.ceil();
    let a = sorted[lo as usize] as f64;
    if lo == hi {
        return a;
    }
    let b = sorted[hi as usize] as f64;
    a + (b - a) * (idx - lo)
}
