//! End-to-end edge classification.

use crate::core::error::Result;
use crate::hex::TileConnections;
use crate::renderer::camera::OrbitCamera;
use crate::renderer::scene::TileScene;
use crate::renderer::target::RenderTarget;
use crate::renderer::{RenderOptions, TileRenderer};
use crate::vision::client::{encode_png_base64, VisionClient};
use crate::vision::prompt::{build_edge_prompt, TileContext};
use crate::vision::report::parse_connections;
use image::RgbaImage;

/// Classify pre-captured edge views (canonical direction order expected).
pub async fn classify_views(
    views: &[RgbaImage],
    ctx: &TileContext,
    client: &VisionClient,
) -> Result<TileConnections> {
    let mut images = Vec::with_capacity(views.len());
    for view in views {
        images.push(encode_png_base64(view)?);
    }

    let prompt = build_edge_prompt(ctx);
    let raw = client.classify(&prompt, &images).await?;
    let connections = parse_connections(&raw)?;
    tracing::info!(edges = connections.len(), "edge classification complete");
    Ok(connections)
}

/// Render a tile from all six edge viewpoints and classify its connections.
///
/// The camera pose is restored before this returns, on success and on error.
pub async fn classify_tile_edges(
    renderer: &TileRenderer,
    scene: &TileScene,
    camera: &mut OrbitCamera,
    target: &RenderTarget,
    opts: &RenderOptions,
    ctx: &TileContext,
    client: &VisionClient,
) -> Result<TileConnections> {
    let views = renderer.capture_edge_views(scene, camera, target, opts)?;
    classify_views(&views, ctx, client).await
}
