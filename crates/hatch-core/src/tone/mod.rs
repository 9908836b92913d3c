//! Tonal analysis: compositing the subject onto white and deriving the
//! threshold triple from what remains.

mod composite;
mod thresholds;

pub use composite::{binarize_mask, composite_on_white, BACKGROUND, FOREGROUND, MASK_CUTOFF};
pub use thresholds::{compute_thresholds, ThresholdTriple, HIGH_PERCENTILE, LOW_PERCENTILE};
