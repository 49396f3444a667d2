//! Quad geometry for the camera texture.
//!
//! The quad faces the eye at a fixed depth. Its half-width is fixed and its
//! half-height follows the viewport's aspect ratio, so the camera image keeps
//! the viewport's proportions.

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::config::QuadConfig;
use crate::error::CameraError;

/// Bytes between consecutive vertices: 3 position floats + 2 texture floats.
pub const VERTEX_STRIDE: i32 = 20;
/// Byte offset of the position attribute.
pub const POSITION_OFFSET: i32 = 0;
/// Byte offset of the texture-coordinate attribute.
pub const TEX_COORD_OFFSET: i32 = 12;
/// Two triangles sharing the 1-2 edge.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 3, 2, 1];

/// One interleaved vertex as uploaded to the array buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize)]
pub struct QuadVertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
}

/// Vertices and indices for a single textured quad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadMesh {
    pub vertices: Vec<QuadVertex>,
    pub indices: Vec<u16>,
}

impl QuadMesh {
    /// Builds the quad for a `width` x `height` viewport.
    ///
    /// Vertices run bottom-left, bottom-right, top-left, top-right. V is
    /// flipped so the image's first row lands at the top.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::InvalidDimensions` if either side is zero.
    pub fn build(config: &QuadConfig, width: u32, height: u32) -> Result<Self, CameraError> {
        if width == 0 || height == 0 {
            return Err(CameraError::InvalidDimensions { width, height });
        }

        let z = config.depth;
        let w = config.half_width;
        let h = w * height as f32 / width as f32;

        let mut mesh = Self {
            vertices: Vec::with_capacity(4),
            indices: Vec::with_capacity(6),
        };
        mesh.append_quad(-w, -h, w, h, z);
        Ok(mesh)
    }

    fn append_quad(&mut self, left: f32, bottom: f32, right: f32, top: f32, z: f32) {
        let base = self.vertices.len() as u16;
        self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));

        let mut push = |x: f32, y: f32, u: f32, v: f32| {
            self.vertices.push(QuadVertex {
                position: [x, y, -z],
                tex_coord: [u, v],
            });
        };
        push(left, bottom, 0.0, 1.0);
        push(right, bottom, 1.0, 1.0);
        push(left, top, 0.0, 0.0);
        push(right, top, 1.0, 0.0);
    }

    /// Number of indices to draw.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Vertex data as raw bytes for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Flattened `x, y, z, u, v` floats.
    pub fn floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Half-height of the quad (top edge y).
    pub fn half_height(&self) -> f32 {
        self.vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max)
    }
}
