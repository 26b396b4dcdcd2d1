//! Headless wgpu renderer for tile edge captures.
//!
//! Renders a tile scene to an offscreen target from camera poses supplied by
//! the capture layer and reads the pixels back. Scene, camera, and target
//! are caller-owned; the renderer holds only the device and pipeline.

pub mod camera;
pub mod capture;
pub mod context;
pub mod mesh;
pub mod pipeline;
pub mod scene;
pub mod target;

use crate::core::error::Result;
use camera::OrbitCamera;
use context::GpuContext;
use image::RgbaImage;
use pipeline::{TilePipeline, TileUniforms};
use scene::TileScene;
use target::RenderTarget;

/// Per-capture render settings. Any subset may be overridden from defaults.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Camera orbit distance from the tile center
    pub distance: f32,
    /// Clear color behind the tile (RGBA)
    pub background: [f64; 4],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            fov_degrees: 45.0,
            distance: 2.6,
            background: [0.85, 0.88, 0.92, 1.0],
        }
    }
}

/// Main renderer struct.
pub struct TileRenderer {
    ctx: GpuContext,
    pipeline: TilePipeline,
}

impl TileRenderer {
    /// Create a headless renderer.
    pub fn new() -> Result<Self> {
        let ctx = GpuContext::new()?;
        let pipeline = TilePipeline::new(&ctx);
        Ok(Self { ctx, pipeline })
    }

    pub fn context(&self) -> &GpuContext {
        &self.ctx
    }

    /// Render one frame of the scene from the camera's current pose and
    /// read it back as an image.
    pub(crate) fn render_frame(
        &self,
        scene: &TileScene,
        camera: &OrbitCamera,
        target: &RenderTarget,
        opts: &RenderOptions,
    ) -> Result<RgbaImage> {
        let aspect = target.width as f32 / target.height as f32;
        let uniforms = TileUniforms {
            view_proj: camera
                .view_projection(opts.fov_degrees, aspect)
                .to_cols_array_2d(),
            camera_pos: camera.pose.position.to_array(),
            _pad0: 0.0,
            light_dir: scene.light_dir,
            _pad1: 0.0,
            base_color: scene.base_color,
            _pad2: 0.0,
        };
        self.pipeline.update_uniforms(&self.ctx.queue, &uniforms);

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Capture Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Capture Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: opts.background[0],
                            g: opts.background[1],
                            b: opts.background[2],
                            a: opts.background[3],
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &target.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline.render_pipeline);
            render_pass.set_bind_group(0, &self.pipeline.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, scene.vertex_buffer.slice(..));
            render_pass.set_index_buffer(scene.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..scene.index_count, 0, 0..1);
        }

        target.copy_to_readback(&mut encoder);
        self.ctx.queue.submit(std::iter::once(encoder.finish()));

        target.read_pixels(&self.ctx)
    }
}
