//! The graphics-context surface the quad renderer drives.
//!
//! [`QuadGl`] covers the WebGL-1 style calls needed to upload a quad and draw
//! it with one program, plus two optional entry points that back a texture
//! with a live camera stream. Handle types are associated so a real context
//! and a recording test double can both implement it.

use std::fmt;

use glam::Mat4;

use crate::feed::FeedError;
use crate::shader::ShaderError;

/// Buffer binding points used by the quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// `ARRAY_BUFFER`, vertex attributes.
    Array,
    /// `ELEMENT_ARRAY_BUFFER`, indices.
    ElementArray,
}

/// A texture unit, `TEXTURE0 + n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureUnit(pub u32);

impl TextureUnit {
    pub const ZERO: TextureUnit = TextureUnit(0);
    pub const ONE: TextureUnit = TextureUnit(1);

    /// Value for a `sampler` uniform pointing at this unit.
    pub fn sampler_index(self) -> i32 {
        self.0 as i32
    }
}

/// Which camera entry points the context provides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraCaps {
    /// `tex_image_camera` is available.
    pub image: bool,
    /// `tex_image_camera_update` is available.
    pub update: bool,
}

impl CameraCaps {
    pub const NONE: CameraCaps = CameraCaps {
        image: false,
        update: false,
    };
    pub const FULL: CameraCaps = CameraCaps {
        image: true,
        update: true,
    };
}

/// Immediate-mode graphics calls used by [`CubeCamera`](crate::CubeCamera).
///
/// Calls that cannot fail in GL return nothing; allocation and program builds
/// return `Result`. Errors raised by the driver afterwards are the context's
/// business.
pub trait QuadGl {
    type Program: Copy + fmt::Debug;
    type Buffer: Copy + fmt::Debug;
    type Texture: Copy + fmt::Debug;
    type UniformLocation: Clone + fmt::Debug;

    /// Which camera entry points are available.
    fn camera_caps(&self) -> CameraCaps;

    fn create_buffer(&self) -> Result<Self::Buffer, String>;

    fn create_texture(&self) -> Result<Self::Texture, String>;

    fn delete_texture(&self, texture: Self::Texture);

    /// Compiles both stages, binds each `(name, location)` attribute, and links.
    fn build_program(
        &self,
        vertex_src: &str,
        fragment_src: &str,
        attribs: &[(&str, u32)],
    ) -> Result<Self::Program, ShaderError>;

    /// Active uniforms of a linked program with their locations.
    fn active_uniforms(&self, program: Self::Program) -> Vec<(String, Self::UniformLocation)>;

    fn use_program(&self, program: Option<Self::Program>);

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>);

    /// Replaces the bound buffer's contents with `STATIC_DRAW` usage.
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);

    /// Uploads a column-major matrix, untransposed.
    fn uniform_matrix_4(&self, location: Option<&Self::UniformLocation>, value: &Mat4);

    fn uniform_1_i32(&self, location: Option<&Self::UniformLocation>, value: i32);

    fn enable_vertex_attrib_array(&self, index: u32);

    /// Points `index` at `components` non-normalised floats.
    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32);

    fn active_texture(&self, unit: TextureUnit);

    fn bind_texture_2d(&self, texture: Option<Self::Texture>);

    /// `drawElements(TRIANGLES, count, UNSIGNED_SHORT, 0)` on the bound index buffer.
    fn draw_triangles_u16(&self, count: i32);

    fn clear_depth(&self);

    fn flush(&self);

    /// Backs `texture` with the live camera stream.
    ///
    /// A camera that is busy right now is not an error; the stream starts
    /// once it can be opened. `Err` means no stream can ever feed `texture`.
    fn tex_image_camera(&mut self, texture: Self::Texture) -> Result<(), FeedError>;

    /// Refreshes `texture` with the newest camera frame and returns its timestamp.
    fn tex_image_camera_update(&mut self, texture: Self::Texture) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_units_map_to_sampler_indices() {
        assert_eq!(TextureUnit::ZERO.sampler_index(), 0);
        assert_eq!(TextureUnit::ONE.sampler_index(), 1);
        assert_eq!(TextureUnit(7).sampler_index(), 7);
    }

    #[test]
    fn camera_caps_default_to_none() {
        assert_eq!(CameraCaps::default(), CameraCaps::NONE);
        assert_ne!(CameraCaps::FULL, CameraCaps::NONE);
    }
}
