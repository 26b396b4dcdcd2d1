//! Procedural hex tile geometry.
//!
//! A flat-top hexagonal prism standing on the XZ plane, corners at
//! 30° + 60°·k, so the outward normal of edge k sits exactly on a direction
//! table angle. The bottom face is omitted; the orbit camera never drops
//! below the tile plane.

use glam::Vec3;

/// Distance from tile center to corner (world units).
pub const TILE_RADIUS: f32 = 1.0;

/// Prism height (world units).
pub const TILE_HEIGHT: f32 = 0.25;

/// Vertex format for tile meshes (32 bytes for alignment).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TileVertex {
    pub position: [f32; 3],
    pub _pad0: f32,
    pub normal: [f32; 3],
    pub _pad1: f32,
}

impl TileVertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            _pad0: 0.0,
            normal: normal.to_array(),
            _pad1: 0.0,
        }
    }

    /// Vertex buffer layout for the render pipeline.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TileVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 16, // after position + padding
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// CPU-side tile mesh.
pub struct TileMesh {
    pub vertices: Vec<TileVertex>,
    pub indices: Vec<u32>,
}

impl TileMesh {
    /// Build a hexagonal prism: top face plus six side quads.
    pub fn hex_prism(radius: f32, height: f32) -> Self {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        let corner = |k: u32, y: f32| -> Vec3 {
            let angle = (30.0 + 60.0 * k as f32).to_radians();
            Vec3::new(radius * angle.cos(), y, radius * angle.sin())
        };

        // Top face: center fan
        let top_normal = Vec3::Y;
        let center = vertices.len() as u32;
        vertices.push(TileVertex::new(Vec3::new(0.0, height, 0.0), top_normal));
        for k in 0..6 {
            vertices.push(TileVertex::new(corner(k, height), top_normal));
        }
        for k in 0..6u32 {
            indices.extend_from_slice(&[center, center + 1 + k, center + 1 + (k + 1) % 6]);
        }

        // Side quads: edge k spans corners k and k+1, outward normal at
        // 60°·(k+1), so every direction table angle gets a face.
        for k in 0..6u32 {
            let normal_angle = (60.0 * (k + 1) as f32).to_radians();
            let normal = Vec3::new(normal_angle.cos(), 0.0, normal_angle.sin());

            let base = vertices.len() as u32;
            vertices.push(TileVertex::new(corner(k, height), normal));
            vertices.push(TileVertex::new(corner(k + 1, height), normal));
            vertices.push(TileVertex::new(corner(k + 1, 0.0), normal));
            vertices.push(TileVertex::new(corner(k, 0.0), normal));
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }
}

/// Flat tint for a biome name; unrecognized biomes get a neutral green.
pub fn biome_tint(biome: &str) -> [f32; 3] {
    match biome {
        "grassland" | "plains" | "forest" => [0.35, 0.55, 0.28],
        "desert" => [0.78, 0.68, 0.45],
        "snow" | "tundra" => [0.88, 0.90, 0.93],
        "ocean" | "water" => [0.22, 0.42, 0.65],
        "coast" => [0.55, 0.60, 0.50],
        _ => [0.42, 0.52, 0.36],
    }
}
