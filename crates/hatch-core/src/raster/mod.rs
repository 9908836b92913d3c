//! Raster value types and the pipeline error type.
//!
//! Every stage consumes and produces [`Raster`] values. Masks are plain
//! rasters whose samples are conceptually binary (0 = background,
//! 255 = foreground) once re-binarized.

mod buffer;
mod error;

pub use buffer::{Raster, RgbaRaster};
pub use error::{ErrorKind, RasterError};
