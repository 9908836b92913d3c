//! Test fixtures: encoded source images and masks.

use crosshatch::rendering::{encode_grayscale_png, encode_rgba_png};
use hatch_core::{Raster, RgbaRaster};

/// Opaque "portrait": left-to-right tonal gradient with a darker oval.
pub fn portrait(width: u32, height: u32) -> RgbaRaster {
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let (rx, ry) = (width as f64 / 3.0, height as f64 / 2.5);
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let base = 60 + (x * 180 / width.max(1)) as u8;
            let (dx, dy) = ((x as f64 - cx) / rx, (y as f64 - cy) / ry);
            let v = if dx * dx + dy * dy < 1.0 { base / 2 } else { base };
            data.extend_from_slice(&[v, v.saturating_add(10), v.saturating_sub(10), 255]);
        }
    }
    RgbaRaster::new(data, width, height).expect("valid portrait")
}

/// [`portrait`] encoded as RGBA PNG
pub fn portrait_png(width: u32, height: u32) -> Vec<u8> {
    encode_rgba_png(&portrait(width, height)).expect("encode portrait")
}

/// Portrait cut out by alpha: left half transparent, right half opaque.
pub fn half_cutout_png(width: u32, height: u32) -> Vec<u8> {
    let mut source = portrait(width, height).into_data();
    for y in 0..height {
        for x in 0..width / 2 {
            source[((y * width + x) * 4 + 3) as usize] = 0;
        }
    }
    let raster = RgbaRaster::new(source, width, height).expect("valid cutout");
    encode_rgba_png(&raster).expect("encode cutout")
}

/// Binary mask PNG: subject on the right half only.
pub fn right_half_mask_png(width: u32, height: u32) -> Vec<u8> {
    let mask = Raster::from_fn(width, height, |x, _| if x >= width / 2 { 255 } else { 0 })
        .expect("valid mask");
    encode_grayscale_png(&mask, false).expect("encode mask")
}

/// Bytes that no image decoder accepts
pub const GARBAGE: &[u8] = b"this is not an image at all";
