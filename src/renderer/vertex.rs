//! Vertex types for projected 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (NDC) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.55, 0.78, 0.95, 1.0];
    pub const OCEAN_NEAR: [f32; 4] = [0.05, 0.35, 0.55, 1.0];
    pub const OCEAN_FAR: [f32; 4] = [0.25, 0.55, 0.75, 1.0];
    pub const LANE_MARK: [f32; 4] = [0.85, 0.95, 1.0, 0.35];
    pub const BOAT_HULL: [f32; 4] = [0.95, 0.95, 0.92, 1.0];
    pub const BOAT_CABIN: [f32; 4] = [0.85, 0.2, 0.15, 1.0];
    pub const BOAT_WAKE: [f32; 4] = [1.0, 1.0, 1.0, 0.6];
    pub const WRECK_HULL: [f32; 4] = [0.3, 0.22, 0.18, 1.0];
    pub const WRECK_MAST: [f32; 4] = [0.45, 0.35, 0.25, 1.0];
    pub const LOG: [f32; 4] = [0.55, 0.36, 0.18, 1.0];
    pub const ISLET_SAND: [f32; 4] = [0.9, 0.82, 0.55, 1.0];
    pub const ISLET_GRASS: [f32; 4] = [0.25, 0.6, 0.25, 1.0];
}
