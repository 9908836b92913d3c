//! Texture selection, threshold hatching and blending.
//!
//! Each of the three layers pairs one threshold with one texture window.
//! [`Style`] decides which texture fills the lightest layer; the other two
//! are always the right and left diagonals.

mod apply;
mod layers;
mod style;
mod texture;

pub use apply::{apply_hatch, blend};
pub use layers::HatchLayers;
pub use style::{ParseStyleError, Style};
pub use texture::{align_texture, CropAnchor, TextureName, TextureSet};
