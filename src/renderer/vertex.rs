//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
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

/// Colors for backdrop elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.067, 0.067, 0.067, 1.0]; // #111111
    pub const STAR: [f32; 4] = [0.85, 0.88, 1.0, 0.8];
    pub const SPARKLE: [f32; 4] = [0.6, 1.0, 0.7, 0.9];
    pub const PORTAL_RING: [f32; 4] = [0.0, 1.0, 0.4, 0.85];
    pub const PORTAL_CORE: [f32; 4] = [0.0, 0.35, 0.15, 0.5];
    pub const PORTAL_MARKER: [f32; 4] = [0.8, 1.0, 0.85, 1.0];
    pub const LIGHT_GLOW: [f32; 4] = [0.5, 1.0, 0.6, 0.12];
    pub const SHOOTING_STAR: [f32; 4] = [1.0, 1.0, 0.95, 1.0];
}
