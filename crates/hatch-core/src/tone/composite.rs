//! Subject-on-white compositing.

use crate::raster::{Raster, RasterError};

/// Mask value marking foreground.
pub const FOREGROUND: u8 = 255;

/// Background fill for pixels outside the subject.
pub const BACKGROUND: u8 = 255;

/// Default cutoff for re-binarizing a resampled mask.
pub const MASK_CUTOFF: u8 = 128;

/// Re-binarize a mask: samples strictly above `cutoff` become 255, the
/// rest 0.
///
/// Resampling smears mask edges into intermediate grays; the compositor
/// only treats exact 255 as foreground, so this must run after every
/// mask resize.
pub fn binarize_mask(mask: &Raster, cutoff: u8) -> Raster {
    let data = mask
        .data()
        .iter()
        .map(|&v| if v > cutoff { FOREGROUND } else { 0 })
        .collect();
    Raster::from_parts(data, mask.width(), mask.height())
}

/// Keep luminance where `mask == 255`, fill white everywhere else.
///
/// # Example
///
/// ```
/// use hatch_core::{composite_on_white, Raster};
///
/// let gray = Raster::new(vec![10, 20, 30], 3, 1).unwrap();
/// let mask = Raster::new(vec![255, 0, 254], 3, 1).unwrap();
/// let layered = composite_on_white(&gray, &mask).unwrap();
/// assert_eq!(layered.data(), &[10, 255, 255]);
/// ```
pub fn composite_on_white(luminance: &Raster, mask: &Raster) -> Result<Raster, RasterError> {
    luminance.ensure_same_size(mask, "composite")?;
    let data = luminance
        .data()
        .iter()
        .zip(mask.data())
        .map(|(&l, &m)| if m == FOREGROUND { l } else { BACKGROUND })
        .collect();
    Ok(Raster::from_parts(data, luminance.width(), luminance.height()))
}
