//! `QuadGl` on top of `glow`, with an optional camera feed.

use glam::Mat4;

use super::compile::{active_uniforms, compile_program};
use super::context::GpuContext;
use super::texture::{configure_external_texture, ExternalTextureConfig, TEXTURE_EXTERNAL_OES};
use crate::feed::{CameraDevice, CameraFeed, FeedError, NoCamera};
use crate::gl::{BufferTarget, CameraCaps, QuadGl, TextureUnit};
use crate::shader::ShaderError;

fn gl_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn gl_texture_unit(unit: TextureUnit) -> u32 {
    glow::TEXTURE0 + unit.0
}

/// A GL context plus the camera feed that backs external textures.
pub struct GlowQuad<D = NoCamera> {
    ctx: GpuContext,
    feed: Option<CameraFeed<D>>,
    external: ExternalTextureConfig,
}

impl GlowQuad<NoCamera> {
    /// A context without a camera: always takes the plain texture path.
    pub fn new(ctx: GpuContext) -> Self {
        Self {
            ctx,
            feed: None,
            external: ExternalTextureConfig::default(),
        }
    }
}

impl<D: CameraDevice> GlowQuad<D> {
    /// A context whose external textures are fed by `feed`.
    pub fn with_camera(ctx: GpuContext, feed: CameraFeed<D>) -> Self {
        Self {
            ctx,
            feed: Some(feed),
            external: ExternalTextureConfig::default(),
        }
    }

    pub fn context(&self) -> &GpuContext {
        &self.ctx
    }

    pub fn feed(&self) -> Option<&CameraFeed<D>> {
        self.feed.as_ref()
    }

    /// For pausing and resuming the camera with the host's lifecycle.
    pub fn feed_mut(&mut self) -> Option<&mut CameraFeed<D>> {
        self.feed.as_mut()
    }

    pub fn into_context(self) -> GpuContext {
        self.ctx
    }
}

#[allow(unsafe_code)]
impl<D: CameraDevice> QuadGl for GlowQuad<D> {
    type Program = glow::Program;
    type Buffer = glow::Buffer;
    type Texture = glow::Texture;
    type UniformLocation = glow::UniformLocation;

    fn camera_caps(&self) -> CameraCaps {
        if self.ctx.supports_external_image() && self.feed.is_some() {
            CameraCaps::FULL
        } else {
            CameraCaps::NONE
        }
    }

    fn create_buffer(&self) -> Result<glow::Buffer, String> {
        use glow::HasContext;
        // SAFETY: plain object allocation.
        unsafe { self.ctx.gl().create_buffer() }
    }

    fn create_texture(&self) -> Result<glow::Texture, String> {
        use glow::HasContext;
        // SAFETY: plain object allocation.
        unsafe { self.ctx.gl().create_texture() }
    }

    fn delete_texture(&self, texture: glow::Texture) {
        use glow::HasContext;
        // SAFETY: texture came from create_texture on this context.
        unsafe { self.ctx.gl().delete_texture(texture) }
    }

    fn build_program(
        &self,
        vertex_src: &str,
        fragment_src: &str,
        attribs: &[(&str, u32)],
    ) -> Result<glow::Program, ShaderError> {
        compile_program(self.ctx.gl(), vertex_src, fragment_src, attribs)
    }

    fn active_uniforms(&self, program: glow::Program) -> Vec<(String, glow::UniformLocation)> {
        active_uniforms(self.ctx.gl(), program)
    }

    fn use_program(&self, program: Option<glow::Program>) {
        use glow::HasContext;
        // SAFETY: program is None or a linked program from this context.
        unsafe { self.ctx.gl().use_program(program) }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<glow::Buffer>) {
        use glow::HasContext;
        // SAFETY: target is a valid buffer binding point.
        unsafe { self.ctx.gl().bind_buffer(gl_target(target), buffer) }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        use glow::HasContext;
        // SAFETY: a buffer is bound to target; data outlives the call.
        unsafe {
            self.ctx
                .gl()
                .buffer_data_u8_slice(gl_target(target), data, glow::STATIC_DRAW)
        }
    }

    fn uniform_matrix_4(&self, location: Option<&glow::UniformLocation>, value: &Mat4) {
        use glow::HasContext;
        // SAFETY: location belongs to the current program.
        unsafe {
            self.ctx
                .gl()
                .uniform_matrix_4_f32_slice(location, false, &value.to_cols_array())
        }
    }

    fn uniform_1_i32(&self, location: Option<&glow::UniformLocation>, value: i32) {
        use glow::HasContext;
        // SAFETY: location belongs to the current program.
        unsafe { self.ctx.gl().uniform_1_i32(location, value) }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        use glow::HasContext;
        // SAFETY: index is a bound attribute location.
        unsafe { self.ctx.gl().enable_vertex_attrib_array(index) }
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        use glow::HasContext;
        // SAFETY: an array buffer is bound; offset/stride stay within a vertex.
        unsafe {
            self.ctx.gl().vertex_attrib_pointer_f32(
                index,
                components,
                glow::FLOAT,
                false,
                stride,
                offset,
            )
        }
    }

    fn active_texture(&self, unit: TextureUnit) {
        use glow::HasContext;
        // SAFETY: the quad only uses units 0 and 1.
        unsafe { self.ctx.gl().active_texture(gl_texture_unit(unit)) }
    }

    fn bind_texture_2d(&self, texture: Option<glow::Texture>) {
        use glow::HasContext;
        // SAFETY: texture is None or a handle from this context.
        unsafe { self.ctx.gl().bind_texture(glow::TEXTURE_2D, texture) }
    }

    fn draw_triangles_u16(&self, count: i32) {
        use glow::HasContext;
        // SAFETY: an element buffer holding `count` u16 indices is bound.
        unsafe {
            self.ctx
                .gl()
                .draw_elements(glow::TRIANGLES, count, glow::UNSIGNED_SHORT, 0)
        }
    }

    fn clear_depth(&self) {
        use glow::HasContext;
        // SAFETY: plain state call.
        unsafe { self.ctx.gl().clear(glow::DEPTH_BUFFER_BIT) }
    }

    fn flush(&self) {
        use glow::HasContext;
        // SAFETY: plain state call.
        unsafe { self.ctx.gl().flush() }
    }

    fn tex_image_camera(&mut self, texture: glow::Texture) -> Result<(), FeedError> {
        let feed = self.feed.as_mut().ok_or(FeedError::Unavailable)?;
        configure_external_texture(self.ctx.gl(), texture, &self.external);
        feed.attach();
        Ok(())
    }

    fn tex_image_camera_update(&mut self, texture: glow::Texture) -> u64 {
        use glow::HasContext;

        let Some(feed) = self.feed.as_mut() else {
            return 0;
        };
        // SAFETY: texture was configured as external by tex_image_camera.
        unsafe {
            self.ctx
                .gl()
                .bind_texture(TEXTURE_EXTERNAL_OES, Some(texture))
        };
        feed.update()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_targets_map_to_gl_enums() {
        assert_eq!(gl_target(BufferTarget::Array), glow::ARRAY_BUFFER);
        assert_eq!(gl_target(BufferTarget::ElementArray), glow::ELEMENT_ARRAY_BUFFER);
    }

    #[test]
    fn texture_units_offset_from_texture0() {
        assert_eq!(gl_texture_unit(TextureUnit::ZERO), glow::TEXTURE0);
        assert_eq!(gl_texture_unit(TextureUnit::ONE), glow::TEXTURE1);
    }

    #[test]
    #[ignore = "requires GL context"]
    fn camera_caps_require_extension_and_feed() {
        // Would test: GlowQuad::new(ctx).camera_caps() == CameraCaps::NONE even
        // when the driver exposes OES_EGL_image_external.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn busy_camera_still_builds_cube_camera() {
        // Would test: GlowQuad::with_camera(ctx, busy_device, config) on a driver
        // with OES_EGL_image_external yields Ok from CubeCamera::new, and the
        // feed opens on the next resume once the device is free.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn cube_camera_draws_into_framebuffer() {
        // Would test: CubeCamera::new(&mut GlowQuad::new(ctx), tex, 64, 64) then
        // render(&mut gl, &Mat4::IDENTITY) leaves the texture's colour in the
        // centre pixel.
    }
}
