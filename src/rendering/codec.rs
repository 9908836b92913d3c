//! Image decoding and PNG encoding.

use hatch_core::{extract_luminance, Raster, RgbaRaster};
use image::{metadata::Orientation, DynamicImage, ImageDecoder, ImageReader};
use std::io::Cursor;

use crate::error::PipelineError;

/// Decode an encoded image (PNG, JPEG or WebP) into upright RGBA.
///
/// The EXIF orientation tag is applied, so a rotated phone photo comes
/// back the way it is displayed.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaRaster, PipelineError> {
    let decode_err = |e: image::ImageError| PipelineError::Decode(e.to_string());

    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PipelineError::Decode(e.to_string()))?
        .into_decoder()
        .map_err(decode_err)?;
    let orientation = decoder.orientation().unwrap_or_else(|e| {
        tracing::debug!(%e, "Unreadable orientation metadata, assuming upright");
        Orientation::NoTransforms
    });

    let mut image = DynamicImage::from_decoder(decoder).map_err(decode_err)?;
    image.apply_orientation(orientation);
    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(RgbaRaster::new(rgba.into_raw(), width, height)?)
}

/// Decode an encoded image straight to single-channel luminance.
///
/// Grayscale inputs come back unchanged.
pub fn decode_luminance(bytes: &[u8]) -> Result<Raster, PipelineError> {
    Ok(extract_luminance(&decode_image(bytes)?))
}

/// Encode a raster as an 8-bit grayscale PNG.
///
/// With `optimize`, the output is re-compressed with oxipng; if that fails
/// the unoptimized bytes are returned.
pub fn encode_grayscale_png(raster: &Raster, optimize: bool) -> Result<Vec<u8>, PipelineError> {
    let png_bytes = encode_png(
        raster.width(),
        raster.height(),
        png::ColorType::Grayscale,
        raster.data(),
    )?;
    if !optimize {
        return Ok(png_bytes);
    }

    // Re-compress with oxipng (adaptive filter selection)
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    );
    match optimized {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, using unoptimized output");
            Ok(png_bytes)
        }
    }
}

/// Encode an RGBA raster as an 8-bit RGBA PNG (fast settings).
pub fn encode_rgba_png(raster: &RgbaRaster) -> Result<Vec<u8>, PipelineError> {
    encode_png(
        raster.width(),
        raster.height(),
        png::ColorType::Rgba,
        raster.data(),
    )
}

fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    data: &[u8],
) -> Result<Vec<u8>, PipelineError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| PipelineError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| PipelineError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Raster {
        Raster::from_fn(width, height, |x, y| ((x * 7 + y * 3) % 256) as u8).unwrap()
    }

    #[test]
    fn test_grayscale_png_decodes_to_same_pixels() {
        let raster = gradient(31, 17);
        for optimize in [false, true] {
            let bytes = encode_grayscale_png(&raster, optimize).unwrap();
            assert_eq!(&bytes[0..8], b"\x89PNG\r\n\x1a\n");
            assert_eq!(decode_luminance(&bytes).unwrap(), raster, "optimize={optimize}");
        }
    }

    #[test]
    fn test_png_header_is_grayscale_8bit() {
        let bytes = encode_grayscale_png(&gradient(4, 4), false).unwrap();
        let decoder = png::Decoder::new(Cursor::new(bytes));
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!(info.color_type, png::ColorType::Grayscale);
        assert_eq!(info.bit_depth, png::BitDepth::Eight);
        assert_eq!((info.width, info.height), (4, 4));
    }

    #[test]
    fn test_rgba_png_preserves_alpha() {
        let rgba = RgbaRaster::new(vec![10, 20, 30, 0, 200, 100, 50, 255], 2, 1).unwrap();
        let bytes = encode_rgba_png(&rgba).unwrap();
        assert_eq!(decode_image(&bytes).unwrap(), rgba);
    }

    /// JPEG with an APP1 Exif segment holding a single Orientation entry.
    fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
        let source = image::RgbImage::from_pixel(width, height, image::Rgb([200, 100, 50]));
        let mut jpeg = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(source)
            .write_to(&mut jpeg, image::ImageFormat::Jpeg)
            .unwrap();
        let jpeg = jpeg.into_inner();

        let mut exif = b"Exif\0\0MM\0\x2a\0\0\0\x08".to_vec();
        exif.extend_from_slice(&1u16.to_be_bytes());
        exif.extend_from_slice(&0x0112u16.to_be_bytes());
        exif.extend_from_slice(&3u16.to_be_bytes());
        exif.extend_from_slice(&1u32.to_be_bytes());
        exif.extend_from_slice(&orientation.to_be_bytes());
        exif.extend_from_slice(&[0, 0, 0, 0, 0, 0]);

        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&((exif.len() + 2) as u16).to_be_bytes());
        out.extend_from_slice(&exif);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_decode_applies_exif_rotation() {
        // 6 = rotate 90 degrees clockwise for display
        let rotated = decode_image(&jpeg_with_orientation(8, 4, 6)).unwrap();
        assert_eq!(rotated.dimensions(), (4, 8));

        let upright = decode_image(&jpeg_with_orientation(8, 4, 1)).unwrap();
        assert_eq!(upright.dimensions(), (8, 4));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
    }
}
