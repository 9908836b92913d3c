//! Hatch textures and crop alignment.
//!
//! Textures are provisioned larger than any render, and each layer takes a
//! pixel-exact window from its texture. Directional textures are anchored
//! at their top-left corner so the stroke phase is identical for every
//! output size; the vortex texture is anchored at its centre so its focal
//! point stays in the middle of the frame.

use std::fmt;

use crate::raster::{Raster, RasterError};

/// The four texture slots of a [`TextureSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureName {
    Right,
    Left,
    Horizontal,
    Vortex,
}

impl TextureName {
    pub const ALL: [TextureName; 4] = [
        TextureName::Right,
        TextureName::Left,
        TextureName::Horizontal,
        TextureName::Vortex,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TextureName::Right => "right",
            TextureName::Left => "left",
            TextureName::Horizontal => "horizontal",
            TextureName::Vortex => "vortex",
        }
    }
}

impl fmt::Display for TextureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which point of the texture the crop window is aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropAnchor {
    /// Window starts at the texture's `(0, 0)`.
    TopLeft,
    /// Window is centred; odd leftovers are dropped from the far side.
    Center,
}

impl CropAnchor {
    /// Top-left corner of a `target` window inside a `texture`-sized image.
    ///
    /// An axis where the window does not fit gets origin 0.
    pub fn origin(self, texture: (u32, u32), target: (u32, u32)) -> (u32, u32) {
        match self {
            CropAnchor::TopLeft => (0, 0),
            CropAnchor::Center => (
                texture.0.saturating_sub(target.0) / 2,
                texture.1.saturating_sub(target.1) / 2,
            ),
        }
    }
}

/// The four grayscale hatch textures.
///
/// Built once at startup and shared read-only between all renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSet {
    right: Raster,
    left: Raster,
    horizontal: Raster,
    vortex: Raster,
}

impl TextureSet {
    pub fn new(right: Raster, left: Raster, horizontal: Raster, vortex: Raster) -> Self {
        Self {
            right,
            left,
            horizontal,
            vortex,
        }
    }

    pub fn get(&self, name: TextureName) -> &Raster {
        match name {
            TextureName::Right => &self.right,
            TextureName::Left => &self.left,
            TextureName::Horizontal => &self.horizontal,
            TextureName::Vortex => &self.vortex,
        }
    }

    /// Largest output every texture can cover.
    pub fn max_crop(&self) -> (u32, u32) {
        TextureName::ALL
            .iter()
            .map(|&n| self.get(n).dimensions())
            .fold((u32::MAX, u32::MAX), |(w, h), (tw, th)| (w.min(tw), h.min(th)))
    }
}

/// Crop a `width x height` window out of `texture`.
///
/// No resampling happens; the output is a verbatim copy of the window.
/// Fails with [`RasterError::TextureTooSmall`] when the window does not fit.
///
/// # Example
///
/// ```
/// use hatch_core::{align_texture, CropAnchor, Raster};
///
/// let texture = Raster::from_fn(4, 4, |x, y| (y * 4 + x) as u8).unwrap();
/// let crop = align_texture(&texture, "demo", 2, 2, CropAnchor::Center).unwrap();
/// assert_eq!(crop.data(), &[5, 6, 9, 10]);
/// ```
pub fn align_texture(
    texture: &Raster,
    name: &'static str,
    width: u32,
    height: u32,
    anchor: CropAnchor,
) -> Result<Raster, RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::ZeroDimension { width, height });
    }
    if width > texture.width() || height > texture.height() {
        return Err(RasterError::TextureTooSmall {
            name,
            texture: texture.dimensions(),
            target: (width, height),
        });
    }

    let (start_x, start_y) = anchor.origin(texture.dimensions(), (width, height));
    let (x0, x1) = (start_x as usize, (start_x + width) as usize);
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for y in start_y..start_y + height {
        data.extend_from_slice(&texture.row(y)[x0..x1]);
    }
    Ok(Raster::from_parts(data, width, height))
}
