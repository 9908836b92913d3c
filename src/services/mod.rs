pub mod crosshatch_pipeline;
pub mod segmentation;
pub mod textures;

pub use crosshatch_pipeline::{CrosshatchPipeline, RenderedImage};
pub use segmentation::{
    build_segmenter, AlphaSegmenter, FullFrameSegmenter, HttpSegmenter, MaskFileSegmenter,
    Segmenter,
};
pub use textures::{texture_file_name, TextureLoader};
