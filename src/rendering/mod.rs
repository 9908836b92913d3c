pub mod codec;
pub mod texture_gen;

pub use codec::{decode_image, decode_luminance, encode_grayscale_png, encode_rgba_png};
pub use texture_gen::{generate_texture, generate_textures, HATCH_UNIT};
