use std::sync::Arc;
use std::time::Instant;

use hatch_core::{report_stage, Crosshatcher, Progress, Raster, RgbaRaster, Stage, Style, TextureSet};
use tokio::task;

use crate::error::PipelineError;
use crate::models::AppConfig;
use crate::rendering::{decode_image, encode_grayscale_png};
use crate::services::{build_segmenter, Segmenter, TextureLoader};

/// Result of rendering an uploaded image
#[derive(Debug, Clone)]
pub struct RenderedImage {
    /// Encoded grayscale PNG
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Pipeline that orchestrates decode → segment → hatch → encode
///
/// CPU-bound stages run on the blocking pool. Segmentation runs between
/// [`Crosshatcher::prepare`] and [`Crosshatcher::finish`] on the async side.
pub struct CrosshatchPipeline {
    renderer: Crosshatcher,
    segmenter: Arc<dyn Segmenter>,
    textures: Arc<TextureSet>,
    optimize_png: bool,
}

impl CrosshatchPipeline {
    pub fn new(
        renderer: Crosshatcher,
        segmenter: Arc<dyn Segmenter>,
        textures: Arc<TextureSet>,
        optimize_png: bool,
    ) -> Self {
        Self {
            renderer,
            segmenter,
            textures,
            optimize_png,
        }
    }

    /// Build from config, loading textures from `textures_dir`
    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        let segmenter = build_segmenter(&config.segmentation)?;
        let textures = TextureLoader::from_dir(&config.textures_dir)?;

        let (tex_width, tex_height) = textures.max_crop();
        if tex_width < config.max_dimension || tex_height < config.max_dimension {
            tracing::warn!(
                max_dimension = config.max_dimension,
                tex_width,
                tex_height,
                "Textures are smaller than max_dimension; large renders will fail"
            );
        }

        Ok(Self::new(
            config.crosshatcher(),
            segmenter,
            Arc::new(textures),
            config.output.optimize_png,
        ))
    }

    pub fn renderer(&self) -> &Crosshatcher {
        &self.renderer
    }

    pub fn segmenter_name(&self) -> &'static str {
        self.segmenter.name()
    }

    /// Render a decoded source to a crosshatched grayscale raster
    pub async fn process(
        &self,
        source: RgbaRaster,
        style: Style,
        progress: Arc<dyn Progress>,
    ) -> Result<Raster, PipelineError> {
        report_stage(progress.as_ref(), Stage::WarmUp);
        self.segmenter.warm_up().await?;
        report_stage(progress.as_ref(), Stage::Ready);

        let renderer = self.renderer;
        let cb = progress.clone();
        let (prepared, source) = task::spawn_blocking(move || {
            renderer
                .prepare(&source, cb.as_ref())
                .map(|prepared| (prepared, source))
        })
        .await
        .map_err(join_error)??;

        report_stage(progress.as_ref(), Stage::Segmentation);
        let start = Instant::now();
        let mask = self.segmenter.segment(&source).await?;
        tracing::debug!(
            segmenter = self.segmenter.name(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Segmentation complete"
        );
        drop(source);

        let textures = self.textures.clone();
        let output = task::spawn_blocking(move || {
            renderer.finish(prepared, &mask, &textures, style, progress.as_ref())
        })
        .await
        .map_err(join_error)??;

        Ok(output)
    }

    /// Decode, render and encode an uploaded image
    pub async fn render_png<B>(
        &self,
        bytes: B,
        style: Style,
        progress: Arc<dyn Progress>,
    ) -> Result<RenderedImage, PipelineError>
    where
        B: AsRef<[u8]> + Send + 'static,
    {
        let start = Instant::now();
        let source = task::spawn_blocking(move || decode_image(bytes.as_ref()))
            .await
            .map_err(join_error)??;
        let (src_width, src_height) = source.dimensions();

        let output = self.process(source, style, progress).await?;
        let (width, height) = output.dimensions();

        let optimize = self.optimize_png;
        let png = task::spawn_blocking(move || encode_grayscale_png(&output, optimize))
            .await
            .map_err(join_error)??;

        tracing::info!(
            style = %style,
            src_width,
            src_height,
            width,
            height,
            png_bytes = png.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Rendered crosshatch"
        );

        Ok(RenderedImage { png, width, height })
    }
}

fn join_error(e: task::JoinError) -> PipelineError {
    PipelineError::Task(e.to_string())
}
