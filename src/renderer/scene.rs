//! GPU-resident tile scene: mesh buffers plus shading parameters.

use crate::renderer::context::GpuContext;
use crate::renderer::mesh::TileMesh;
use glam::Vec3;
use wgpu::util::DeviceExt;

/// A tile uploaded to the GPU, ready to render from any angle.
///
/// Shared mutable state hazard: a scene, camera, and render target triple
/// must not be used by concurrent captures; callers serialize access.
pub struct TileScene {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub base_color: [f32; 3],
    pub light_dir: [f32; 3],
}

impl TileScene {
    pub fn new(ctx: &GpuContext, mesh: &TileMesh, base_color: [f32; 3]) -> Self {
        let vertex_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Tile Vertex Buffer"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Tile Index Buffer"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            base_color,
            // High morning sun, slightly east of overhead
            light_dir: Vec3::new(0.5, 0.8, 0.3).normalize().to_array(),
        }
    }
}
