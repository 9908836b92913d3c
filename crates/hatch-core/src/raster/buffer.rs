//! Immutable pixel buffers with explicit dimensions.
//!
//! [`Raster`] is the single-channel value passed between every pipeline
//! stage; [`RgbaRaster`] is the decoded source image. Both validate their
//! size invariant on construction and expose no mutable access afterwards,
//! so a stage that needs different values always allocates a new buffer.

use super::error::RasterError;

fn check_dimensions(width: u32, height: u32) -> Result<(), RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::ZeroDimension { width, height });
    }
    Ok(())
}

/// Single-channel 8-bit raster in row-major order.
///
/// # Example
///
/// ```
/// use hatch_core::Raster;
///
/// let raster = Raster::new(vec![0, 64, 128, 255], 2, 2).unwrap();
/// assert_eq!(raster.get(1, 1), 255);
/// assert_eq!(raster.dimensions(), (2, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Raster {
    /// Wrap `data` as a `width x height` raster.
    ///
    /// Fails when either side is zero or `data.len() != width * height`.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, RasterError> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(RasterError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// A raster with every sample set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self, RasterError> {
        check_dimensions(width, height)?;
        Ok(Self {
            data: vec![value; width as usize * height as usize],
            width,
            height,
        })
    }

    /// Build a raster whose sample at `(x, y)` is `f(x, y)`.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> u8,
    ) -> Result<Self, RasterError> {
        check_dimensions(width, height)?;
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Construct from parts already known to satisfy the size invariant.
    pub(crate) fn from_parts(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            data,
            width,
            height,
        }
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of samples (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: rasters have at least one pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the raster.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// One row of samples.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.data[start..start + w]
    }

    /// Consume the raster, returning its sample buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Replicate the single channel into opaque RGBA for display.
    pub fn to_rgba(&self) -> RgbaRaster {
        let mut rgba = Vec::with_capacity(self.data.len() * 4);
        for &v in &self.data {
            rgba.extend_from_slice(&[v, v, v, 255]);
        }
        RgbaRaster::from_parts(rgba, self.width, self.height)
    }

    /// Error unless `other` has the same dimensions as `self`.
    pub(crate) fn ensure_same_size(
        &self,
        other: &Raster,
        stage: &'static str,
    ) -> Result<(), RasterError> {
        if self.dimensions() != other.dimensions() {
            return Err(RasterError::mismatch(
                stage,
                self.dimensions(),
                other.dimensions(),
            ));
        }
        Ok(())
    }
}

/// Four-channel interleaved RGBA raster, as produced by image decoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaRaster {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl RgbaRaster {
    /// Wrap `data` as a `width x height` RGBA raster.
    ///
    /// Fails when either side is zero or `data.len() != width * height * 4`.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, RasterError> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(RasterError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// A raster with every pixel set to `[r, g, b, a]`.
    pub fn filled(width: u32, height: u32, pixel: [u8; 4]) -> Result<Self, RasterError> {
        check_dimensions(width, height)?;
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * 4);
        for _ in 0..count {
            data.extend_from_slice(&pixel);
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub(crate) fn from_parts(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 4);
        Self {
            data,
            width,
            height,
        }
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Iterate over pixels as `[r, g, b, a]` arrays.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Extract the alpha channel as a single-channel raster.
    pub fn alpha(&self) -> Raster {
        let data = self.data.chunks_exact(4).map(|p| p[3]).collect();
        Raster::from_parts(data, self.width, self.height)
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
