//! Rendering style selection.

use std::fmt;
use std::str::FromStr;

use super::layers::HatchLayers;
use super::texture::{CropAnchor, TextureName};

/// Selects the texture of the third (lightest) hatch layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Style {
    /// Horizontal lines, top-left aligned.
    #[default]
    Horizontal,
    /// Concentric strokes, centre aligned.
    Vortex,
}

impl Style {
    pub const ALL: [Style; 2] = [Style::Horizontal, Style::Vortex];

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Horizontal => "horizontal",
            Style::Vortex => "vortex",
        }
    }

    /// Texture and crop anchor for each layer.
    ///
    /// The first two layers never depend on the style.
    pub fn layer_sources(self) -> HatchLayers<(TextureName, CropAnchor)> {
        let third = match self {
            Style::Horizontal => (TextureName::Horizontal, CropAnchor::TopLeft),
            Style::Vortex => (TextureName::Vortex, CropAnchor::Center),
        };
        HatchLayers::new(
            (TextureName::Right, CropAnchor::TopLeft),
            (TextureName::Left, CropAnchor::TopLeft),
            third,
        )
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown style name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown style '{0}', expected 'horizontal' or 'vortex'")]
pub struct ParseStyleError(pub String);

impl FromStr for Style {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Style::Horizontal),
            "vortex" => Ok(Style::Vortex),
            _ => Err(ParseStyleError(s.to_string())),
        }
    }
}
