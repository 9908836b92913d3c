//! Resampling filter selection.

use std::fmt;
use std::str::FromStr;

/// Longest side, in pixels, that the pipeline renders at.
///
/// Sources whose longer side already fits are processed at their native
/// size; larger sources are scaled down so the longer side lands on (or,
/// through truncation, just under) this value.
pub const MAX_DIMENSION: u32 = 1200;

/// Filter used when scaling the luminance image and the segmentation mask.
///
/// Both filters meet the anti-aliased minification bar. They do not produce
/// bit-identical output, so a given deployment should stick to one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ResampleFilter {
    /// Separable windowed-sinc (a = 3) resampling.
    #[default]
    Lanczos3,
    /// Repeated 2x bilinear halving followed by one bilinear step to the
    /// exact target. Mirrors how browser canvases are usually coaxed into
    /// a clean downscale.
    ProgressiveBilinear,
}

impl ResampleFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            ResampleFilter::Lanczos3 => "lanczos3",
            ResampleFilter::ProgressiveBilinear => "progressive-bilinear",
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown filter name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resample filter: {0}")]
pub struct ParseFilterError(pub String);

impl FromStr for ResampleFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lanczos3" | "lanczos" => Ok(ResampleFilter::Lanczos3),
            "progressive-bilinear" | "bilinear" => Ok(ResampleFilter::ProgressiveBilinear),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_lanczos() {
        assert_eq!(ResampleFilter::default(), ResampleFilter::Lanczos3);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Lanczos3".parse(), Ok(ResampleFilter::Lanczos3));
        assert_eq!(
            "progressive-bilinear".parse(),
            Ok(ResampleFilter::ProgressiveBilinear)
        );
        assert_eq!("bilinear".parse(), Ok(ResampleFilter::ProgressiveBilinear));
        assert!("nearest".parse::<ResampleFilter>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for filter in [ResampleFilter::Lanczos3, ResampleFilter::ProgressiveBilinear] {
            assert_eq!(filter.to_string().parse(), Ok(filter));
        }
    }
}
