use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use beadmap::api;
use beadmap::assets::{AssetLoader, ConfigSource};
use beadmap::models::{AppConfig, ColorRecord, LabValue, PaletteSourceConfig};
use beadmap::server;
use beadmap::services::{decode_png, encode_png, recolor, PaletteSource, RgbaImage};
use lab_quantize::{PaletteEntry, Quantizer};

#[derive(Parser)]
#[command(name = "beadmap")]
#[command(about = "Recolor images to the nearest colors of a bead palette")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Quantize a PNG file to the palette
    Quantize {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// JSON palette file (overrides the configured source)
        #[arg(short, long)]
        palette: Option<PathBuf>,
    },
    /// Print the configured palette
    Colors {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Beadmap API",
        description = "Recolor images to the nearest colors of a bead palette",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_colors,
        api::handle_default_image,
        api::handle_upload_image,
    ),
    components(schemas(
        ColorRecord,
        LabValue,
        api::QuantizedImageResponse,
        api::UploadImageForm,
    )),
    tags(
        (name = "Palette", description = "Reference colors"),
        (name = "Image", description = "Image quantization")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Quantize {
            input,
            output,
            palette,
        }) => run_quantize_command(&input, &output, palette).await,
        Some(Commands::Colors { json }) => run_colors_command(json).await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI commands
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beadmap=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Build a palette source from the config, or from an explicit file
fn palette_source(
    assets: Arc<AssetLoader>,
    file: Option<PathBuf>,
) -> anyhow::Result<PaletteSource> {
    let config = AppConfig::load_from_assets(&assets);
    let source_config = match file {
        Some(path) => PaletteSourceConfig::File { path },
        None => config.palette.source,
    };
    Ok(PaletteSource::new(source_config, assets)?)
}

/// Quantize a PNG file without starting the server
async fn run_quantize_command(
    input: &Path,
    output: &Path,
    palette: Option<PathBuf>,
) -> anyhow::Result<()> {
    init_cli_logging();

    let source = palette_source(Arc::new(AssetLoader::from_env()), palette)?;
    let colors = source
        .fetch()
        .await
        .with_context(|| format!("Failed to load palette from {}", source.config()))?;
    let entries: Vec<PaletteEntry> = colors.iter().map(PaletteEntry::from).collect();
    let quantizer = Quantizer::new(entries)?;

    let data =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let image = decode_png(&data)?;

    let result = tokio::task::spawn_blocking({
        let image = image.clone();
        move || recolor(&quantizer, &image)
    })
    .await??;
    let unique_colors = result.unique_colors;

    let png = encode_png(&RgbaImage::new(image.width, image.height, result.pixels)?)?;
    std::fs::write(output, &png)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Quantized {} -> {} ({}x{}, {} unique colors, {} palette colors)",
        input.display(),
        output.display(),
        image.width,
        image.height,
        unique_colors,
        colors.len()
    );

    Ok(())
}

/// Print the palette as a table or JSON
async fn run_colors_command(json: bool) -> anyhow::Result<()> {
    init_cli_logging();

    let source = palette_source(Arc::new(AssetLoader::from_env()), None)?;
    let colors = source
        .fetch()
        .await
        .with_context(|| format!("Failed to load palette from {}", source.config()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&colors)?);
        return Ok(());
    }

    for color in &colors {
        println!(
            "{:<24} #{:02X}{:02X}{:02X}  ({:>3}, {:>3}, {:>3})",
            color.name, color.r, color.g, color.b, color.r, color.g, color.b
        );
    }
    println!("\n{} colors from {}", colors.len(), source.config());

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let port = std::env::var("PORT").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Beadmap v{VERSION}");
    println!("Recolor images to the nearest colors of a bead palette\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("(not set)")
    );
    println!("  PORT        = {}", port.as_deref().unwrap_or("(not set)"));
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let loader = AssetLoader::new(config_file.map(PathBuf::from));
    let config_source = match loader.config_source() {
        ConfigSource::Embedded => "embedded".to_string(),
        ConfigSource::File(path) => path.display().to_string(),
        ConfigSource::Missing(_) => "embedded (file not found)".to_string(),
    };
    let config = AppConfig::load_from_assets(&loader);

    println!("\nConfiguration:");
    println!(
        "  Listen:         {}",
        server::resolve_bind_addr(bind_addr.as_deref(), port.as_deref())
    );
    println!("  Config:         {config_source}");
    println!("  Palette source: {}", config.palette.source);
    println!("  Palette TTL:    {}s", config.palette.cache_ttl_secs);
    println!("  Upload limit:   {} bytes", config.max_upload_bytes);
    println!(
        "  Embedded:       {}",
        AssetLoader::list_embedded().join(", ")
    );

    println!("\nCommands:");
    println!("  beadmap serve      Start the HTTP server");
    println!("  beadmap quantize   Quantize a PNG file");
    println!("  beadmap colors     Print the palette");
    println!("\nRun 'beadmap --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beadmap=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = server::bind_addr_from_env();
    let asset_loader = Arc::new(AssetLoader::from_env());

    tracing::info!(config = ?asset_loader.config_source(), "Asset sources configured");

    let state = server::create_app_state(asset_loader)?;
    tracing::info!(
        palette = %state.config.palette.source,
        cache_ttl_secs = state.config.palette.cache_ttl_secs,
        "Palette source configured"
    );

    // Build router: shared API routes plus production-only documentation
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Beadmap server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
