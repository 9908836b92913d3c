//! Procedural hatch textures.
//!
//! Produces a usable default texture set so a fresh install can render
//! without hand-drawn assets. Strokes are anti-aliased by coverage of a
//! fixed-width band, measured perpendicular to the stroke direction.

use hatch_core::{Raster, RasterError, TextureName, TextureSet};
use std::f64::consts::{FRAC_1_SQRT_2, TAU};

/// Side length of the shipped textures; covers the largest render with room
/// to spare for the centred vortex crop.
pub const HATCH_UNIT: u32 = 2100;

/// Distance between stroke centres, in pixels.
const PERIOD: f64 = 9.0;
/// Stroke width, in pixels.
const STROKE: f64 = 2.2;
/// Darkest ink value.
const INK: f64 = 20.0;

/// Generate all four textures at `size x size`.
pub fn generate_textures(size: u32) -> Result<TextureSet, RasterError> {
    Ok(TextureSet::new(
        generate_texture(TextureName::Right, size)?,
        generate_texture(TextureName::Left, size)?,
        generate_texture(TextureName::Horizontal, size)?,
        generate_texture(TextureName::Vortex, size)?,
    ))
}

/// Generate one texture at `size x size`.
pub fn generate_texture(name: TextureName, size: u32) -> Result<Raster, RasterError> {
    let centre = size as f64 / 2.0;
    Raster::from_fn(size, size, |x, y| {
        let (fx, fy) = (x as f64 + 0.5, y as f64 + 0.5);
        let position = match name {
            // "/" strokes: constant x + y
            TextureName::Right => (fx + fy) * FRAC_1_SQRT_2,
            // "\" strokes: constant x - y
            TextureName::Left => (fx - fy) * FRAC_1_SQRT_2,
            TextureName::Horizontal => fy,
            TextureName::Vortex => {
                let (dx, dy) = (fx - centre, fy - centre);
                let radius = (dx * dx + dy * dy).sqrt();
                // Archimedean spiral: one period of radial growth per turn.
                radius + dy.atan2(dx) / TAU * PERIOD
            }
        };
        shade(position)
    })
}

/// Ink value for a point at `position` across the stroke pattern.
fn shade(position: f64) -> u8 {
    let phase = position.rem_euclid(PERIOD);
    let distance = (phase - PERIOD / 2.0).abs();
    let coverage = (STROKE / 2.0 + 0.5 - distance).clamp(0.0, 1.0);
    (255.0 - coverage * (255.0 - INK)).round() as u8
}
