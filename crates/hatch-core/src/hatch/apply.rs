//! Threshold hatching and layer blending.

use crate::raster::{Raster, RasterError};

use super::layers::HatchLayers;

/// Sample used where a pixel is at or above the layer threshold.
const PAPER: u8 = 255;

/// Hatch one layer: copy the texture sample where `layered < threshold`,
/// paper white elsewhere.
///
/// The comparison is strict, so a pixel exactly at the threshold is left
/// unhatched.
pub fn apply_hatch(
    layered: &Raster,
    texture: &Raster,
    threshold: u8,
) -> Result<Raster, RasterError> {
    layered.ensure_same_size(texture, "hatch")?;
    let data = layered
        .data()
        .iter()
        .zip(texture.data())
        .map(|(&l, &t)| if l < threshold { t } else { PAPER })
        .collect();
    Ok(Raster::from_parts(data, layered.width(), layered.height()))
}

/// Average the three layers with truncating integer division.
///
/// All three must share dimensions. The result does not depend on which
/// layer sits in which slot.
pub fn blend(layers: &HatchLayers<Raster>) -> Result<Raster, RasterError> {
    let HatchLayers {
        primary: a,
        secondary: b,
        style_dependent: c,
    } = layers;
    a.ensure_same_size(b, "blend")?;
    a.ensure_same_size(c, "blend")?;

    let data = a
        .data()
        .iter()
        .zip(b.data())
        .zip(c.data())
        .map(|((&a, &b), &c)| ((a as u16 + b as u16 + c as u16) / 3) as u8)
        .collect();
    Ok(Raster::from_parts(data, a.width(), a.height()))
}
