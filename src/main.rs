use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crosshatch::api;
use crosshatch::assets::AssetLoader;
use crosshatch::models::AppConfig;
use crosshatch::rendering::{generate_textures, HATCH_UNIT};
use crosshatch::server;
use crosshatch::services::{
    build_segmenter, CrosshatchPipeline, MaskFileSegmenter, Segmenter, TextureLoader,
};
use hatch_core::{NoProgress, Progress, Style};

#[derive(Parser)]
#[command(name = "crosshatch")]
#[command(about = "Crosshatch portrait renderer - pen-and-ink style grayscale portraits")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Render an image file to a crosshatched PNG
    Render {
        /// Input image (PNG, JPEG or WebP)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Hatch style: "horizontal" or "vortex" (config default if omitted)
        #[arg(short, long)]
        style: Option<Style>,

        /// Precomputed subject mask at the input resolution
        #[arg(long)]
        mask: Option<PathBuf>,

        /// Texture directory (overrides textures_dir)
        #[arg(long)]
        textures: Option<PathBuf>,

        /// Print stage progress to stderr
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate the procedural hatch textures
    Textures {
        /// Output directory
        #[arg(short, long, default_value = "textures")]
        output: PathBuf,

        /// Side length in pixels
        #[arg(long, default_value_t = HATCH_UNIT)]
        size: u32,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,
    },
    /// Extract the embedded config.yaml for customization
    Init {
        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Crosshatch API",
        description = "Render portraits as pen-and-ink crosshatch drawings",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_crosshatch, api::handle_styles),
    components(schemas(api::StylesResponse, api::StyleInfo)),
    tags(
        (name = "Crosshatch", description = "Crosshatch rendering")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            style,
            mask,
            textures,
            verbose,
        }) => run_render_command(&input, &output, style, mask, textures, verbose).await,
        Some(Commands::Textures {
            output,
            size,
            force,
        }) => run_textures_command(&output, size, force),
        Some(Commands::Init { force }) => run_init_command(force),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crosshatch=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Load config from CONFIG_FILE (or embedded) plus env overrides
fn load_config(loader: &AssetLoader) -> AppConfig {
    if let Err(e) = loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed config file");
    }
    AppConfig::load_from_assets(loader).with_env_overrides()
}

/// Render an image file directly (no server needed)
async fn run_render_command(
    input: &Path,
    output: &Path,
    style: Option<Style>,
    mask: Option<PathBuf>,
    textures: Option<PathBuf>,
    verbose: bool,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let mut config = load_config(&AssetLoader::from_env());
    if let Some(dir) = textures {
        config.textures_dir = dir;
    }
    let style = style.unwrap_or(config.default_style);

    let segmenter: Arc<dyn Segmenter> = match mask {
        Some(path) => Arc::new(MaskFileSegmenter::new(path)),
        None => build_segmenter(&config.segmentation)?,
    };
    let texture_set = TextureLoader::from_dir(&config.textures_dir).map_err(|e| {
        anyhow::anyhow!(
            "{e}\nRun 'crosshatch textures -o {}' to generate textures.",
            config.textures_dir.display()
        )
    })?;
    let pipeline = CrosshatchPipeline::new(
        config.crosshatcher(),
        segmenter,
        Arc::new(texture_set),
        config.output.optimize_png,
    );

    let progress: Arc<dyn Progress> = if verbose {
        Arc::new(|fraction: f32, label: &str| {
            eprintln!("[{:>3.0}%] {label}", fraction * 100.0);
        })
    } else {
        Arc::new(NoProgress)
    };

    let bytes = std::fs::read(input)?;
    let rendered = pipeline.render_png(bytes, style, progress).await?;

    std::fs::write(output, &rendered.png)?;
    println!(
        "Rendered {} ({}x{}, {} bytes)",
        output.display(),
        rendered.width,
        rendered.height,
        rendered.png.len()
    );

    Ok(())
}

/// Write the procedural texture set to a directory
fn run_textures_command(output: &Path, size: u32, force: bool) -> anyhow::Result<()> {
    init_cli_tracing();

    let textures = generate_textures(size)?;
    let report = TextureLoader::new(output).write(&textures, force)?;

    if !report.written.is_empty() {
        println!("Wrote {} textures ({size}x{size}):", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    Ok(())
}

/// Extract the embedded config to the filesystem
fn run_init_command(force: bool) -> anyhow::Result<()> {
    let report = AssetLoader::from_env().init(force)?;

    for f in &report.written {
        println!("Extracted {f}");
    }
    for f in &report.skipped {
        println!("Skipped existing {f} (use --force to overwrite)");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Read environment variables
    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let textures_dir = std::env::var("TEXTURES_DIR").ok();
    let segmentation_url = std::env::var("SEGMENTATION_URL").ok();

    // Header
    println!("Crosshatch v{VERSION}");
    println!("Pen-and-ink crosshatch portrait renderer\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR        = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE      = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  TEXTURES_DIR     = {}",
        textures_dir.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  SEGMENTATION_URL = {}",
        segmentation_url.as_deref().unwrap_or("(not set)")
    );

    let loader = AssetLoader::from_env();
    let config = AppConfig::load_from_assets(&loader).with_env_overrides();

    println!("\nSources:");
    println!("  Config:    {}", loader.config_source());

    let textures = TextureLoader::new(&config.textures_dir);
    let missing = textures.missing();
    if missing.is_empty() {
        println!("  Textures:  {} (complete)", textures.dir().display());
    } else {
        let names: Vec<&str> = missing.iter().map(|n| n.as_str()).collect();
        println!(
            "  Textures:  {} (missing: {})",
            textures.dir().display(),
            names.join(", ")
        );
    }
    println!("  Segmenter: {:?}", config.segmentation.kind);
    println!(
        "  Output:    max {}px, {} filter, default style {}",
        config.max_dimension, config.resample_filter, config.default_style
    );

    // Commands section
    println!("\nCommands:");
    println!("  crosshatch serve      Start the HTTP server");
    println!("  crosshatch render     Render an image to PNG file");
    println!("  crosshatch textures   Generate hatch textures");
    println!("  crosshatch init       Extract embedded config.yaml");
    println!("\nRun 'crosshatch --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crosshatch=info,hatch_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let loader = AssetLoader::from_env();
    tracing::info!(config = %loader.config_source(), "Config source configured");
    let config = load_config(&loader);

    // Create application state using shared server module
    let state = server::create_app_state(config)?;
    tracing::info!(
        segmenter = state.pipeline.segmenter_name(),
        textures = %state.config.textures_dir.display(),
        "Pipeline ready"
    );

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Crosshatch server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
