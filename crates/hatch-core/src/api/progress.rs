//! Progress reporting.

use std::panic::{self, AssertUnwindSafe};

/// Receives `(fraction, label)` pairs as the pipeline advances.
///
/// Fractions are non-decreasing over one render and end at `1.0`.
/// Implementations must not block for long; they are called inline from
/// the pipeline thread.
pub trait Progress: Send + Sync {
    fn report(&self, fraction: f32, label: &str);
}

impl<F> Progress for F
where
    F: Fn(f32, &str) + Send + Sync,
{
    fn report(&self, fraction: f32, label: &str) {
        self(fraction, label)
    }
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&self, _fraction: f32, _label: &str) {}
}

/// A fixed point in the pipeline with its reported fraction and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    WarmUp,
    Ready,
    Luminance,
    Resize,
    Segmentation,
    MaskResize,
    Composite,
    Thresholds,
    Textures,
    Hatching,
    Blending,
    Done,
}

impl Stage {
    /// All stages in reporting order.
    pub const ALL: [Stage; 12] = [
        Stage::WarmUp,
        Stage::Ready,
        Stage::Luminance,
        Stage::Resize,
        Stage::Segmentation,
        Stage::MaskResize,
        Stage::Composite,
        Stage::Thresholds,
        Stage::Textures,
        Stage::Hatching,
        Stage::Blending,
        Stage::Done,
    ];

    pub fn fraction(self) -> f32 {
        match self {
            Stage::WarmUp => 0.0,
            Stage::Ready => 0.3,
            Stage::Luminance => 0.35,
            Stage::Resize => 0.4,
            Stage::Segmentation => 0.45,
            Stage::MaskResize => 0.6,
            Stage::Composite => 0.65,
            Stage::Thresholds => 0.7,
            Stage::Textures => 0.75,
            Stage::Hatching => 0.8,
            Stage::Blending => 0.9,
            Stage::Done => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::WarmUp => "Loading segmentation model...",
            Stage::Ready => "Model ready",
            Stage::Luminance => "Converting to grayscale...",
            Stage::Resize => "Resizing image...",
            Stage::Segmentation => "Segmenting subject...",
            Stage::MaskResize => "Resizing mask...",
            Stage::Composite => "Layering on white background...",
            Stage::Thresholds => "Analyzing tonal range...",
            Stage::Textures => "Preparing hatch textures...",
            Stage::Hatching => "Applying hatch patterns...",
            Stage::Blending => "Blending layers...",
            Stage::Done => "Done!",
        }
    }
}

/// Report `stage` to `progress`.
///
/// A panicking callback is logged and otherwise ignored; it never aborts
/// the render.
pub fn report_stage(progress: &dyn Progress, stage: Stage) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        progress.report(stage.fraction(), stage.label())
    }));
    if outcome.is_err() {
        tracing::warn!(stage = stage.label(), "progress callback panicked; continuing");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_fractions_non_decreasing_and_end_at_one() {
        let fractions: Vec<f32> = Stage::ALL.iter().map(|s| s.fraction()).collect();
        for pair in fractions.windows(2) {
            assert!(pair[0] <= pair[1], "{pair:?}");
        }
        assert_eq!(fractions[0], 0.0);
        assert_eq!(*fractions.last().unwrap(), 1.0);
    }

    #[test]
    fn test_closure_receives_stage() {
        let seen = Mutex::new(Vec::new());
        let callback = |fraction: f32, label: &str| {
            seen.lock().unwrap().push((fraction, label.to_string()));
        };
        report_stage(&callback, Stage::Thresholds);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(0.7, "Analyzing tonal range...".to_string())]
        );
    }

    #[test]
    fn test_panicking_callback_is_contained() {
        let callback = |_: f32, _: &str| panic!("boom");
        report_stage(&callback, Stage::Done);
    }
}
