//! Hexedge - Entry Point
//!
//! Renders a demo tile from all six edge viewpoints and asks the configured
//! vision model for its edge connections. This is the operator-facing
//! wrapper around the library pipeline.

use clap::Parser;
use hexedge::core::config::VisionConfig;
use hexedge::core::error::{Result, VisionError};
use hexedge::hex::HexDirection;
use hexedge::renderer::camera::OrbitCamera;
use hexedge::renderer::mesh::{biome_tint, TileMesh, TILE_HEIGHT, TILE_RADIUS};
use hexedge::renderer::scene::TileScene;
use hexedge::renderer::target::RenderTarget;
use hexedge::renderer::{RenderOptions, TileRenderer};
use hexedge::vision::{classify_views, TileContext, VisionClient};

use std::path::PathBuf;
use tokio::runtime::Runtime;

/// Classify hex tile edge connections with a vision model
#[derive(Parser, Debug)]
#[command(name = "hexedge")]
#[command(about = "Render a hex tile from six edge viewpoints and classify its connections")]
struct Args {
    /// Tile type hint forwarded to the model
    #[arg(long)]
    tile_type: Option<String>,

    /// Biome hint forwarded to the model (also tints the demo tile)
    #[arg(long)]
    biome: Option<String>,

    /// Output image width in pixels
    #[arg(long, default_value_t = 512)]
    width: u32,

    /// Output image height in pixels
    #[arg(long, default_value_t = 512)]
    height: u32,

    /// Camera orbit distance from the tile center
    #[arg(long, default_value_t = 2.6)]
    distance: f32,

    /// TOML config file with an [inference] table (env vars used otherwise)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the six captured views as PNGs into this directory
    #[arg(long)]
    dump_views: Option<PathBuf>,

    /// Render (and optionally dump) views, then exit without inference
    #[arg(long)]
    render_only: bool,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("hexedge=debug")
        .init();

    let args = Args::parse();

    tracing::info!("Hexedge starting...");

    let renderer = TileRenderer::new()?;
    let mesh = TileMesh::hex_prism(TILE_RADIUS, TILE_HEIGHT);
    let tint = biome_tint(args.biome.as_deref().unwrap_or(""));
    let scene = TileScene::new(renderer.context(), &mesh, tint);
    let mut camera = OrbitCamera::new();
    let target = RenderTarget::new(renderer.context(), args.width, args.height);
    let opts = RenderOptions {
        width: args.width,
        height: args.height,
        distance: args.distance,
        ..Default::default()
    };

    let views = renderer.capture_edge_views(&scene, &mut camera, &target, &opts)?;
    tracing::info!(count = views.len(), "captured edge views");

    if let Some(dir) = &args.dump_views {
        std::fs::create_dir_all(dir)?;
        for (view, direction) in views.iter().zip(HexDirection::ALL) {
            let path = dir.join(format!("{}.png", direction.label()));
            view.save(&path)
                .map_err(|e| VisionError::Render(e.to_string()))?;
            tracing::info!(path = %path.display(), "wrote edge view");
        }
    }

    if args.render_only {
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => VisionConfig::from_toml_file(path)?,
        None => VisionConfig::from_env()?,
    };
    let client = VisionClient::new(&config);

    // Create the async runtime for the inference call
    let rt = Runtime::new()?;

    if !rt.block_on(client.health_check()) {
        tracing::warn!(
            "inference server at {} is not answering /v1/models",
            config.endpoint
        );
    }

    let ctx = TileContext {
        tile_type: args.tile_type.clone(),
        biome: args.biome.clone(),
    };

    let connections = rt.block_on(classify_views(&views, &ctx, &client))?;

    println!("{}", serde_json::to_string_pretty(&connections)?);
    Ok(())
}
