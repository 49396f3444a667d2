//! Textured quad that shows a camera image in front of the eye.
//!
//! `CubeCamera` owns one program, a vertex buffer, an index buffer and a
//! texture. When the context can stream the camera into an external-OES
//! texture it allocates its own texture for that; otherwise it samples the
//! texture the caller handed in.

use glam::Mat4;

use crate::buffer::BufferSlot;
use crate::config::QuadConfig;
use crate::error::CameraError;
use crate::geometry::{QuadMesh, POSITION_OFFSET, TEX_COORD_OFFSET, VERTEX_STRIDE};
use crate::gl::{BufferTarget, QuadGl, TextureUnit};
use crate::program::ShaderProgram;
use crate::shader::{
    fragment_source, DIFFUSE_UNIFORM, MODEL_VIEW_UNIFORM, POSITION_ATTRIB, PROJECTION_UNIFORM,
    QUAD_VERTEX_SHADER, TEX_COORD_ATTRIB,
};

/// Draws the camera texture on a single quad.
pub struct CubeCamera<G: QuadGl> {
    program: ShaderProgram<G>,
    vertex_buffer: BufferSlot<G::Buffer>,
    index_buffer: BufferSlot<G::Buffer>,
    texture: G::Texture,
    camera_backed: bool,
    ortho_proj_matrix: Mat4,
    ortho_view_matrix: Mat4,
    config: QuadConfig,
    width: u32,
    height: u32,
    index_count: usize,
}

impl<G: QuadGl> CubeCamera<G> {
    /// Builds the renderer with the default quad size.
    ///
    /// # Errors
    ///
    /// See [`with_config`](Self::with_config).
    pub fn new(
        gl: &mut G,
        texture: G::Texture,
        width: u32,
        height: u32,
    ) -> Result<Self, CameraError> {
        Self::with_config(gl, texture, width, height, QuadConfig::default())
    }

    /// Builds the renderer and uploads the first quad.
    ///
    /// If the context supports `tex_image_camera`, `texture` is ignored and a
    /// new camera-backed texture is created instead.
    ///
    /// # Errors
    ///
    /// Returns an error if a GPU resource cannot be allocated, no camera
    /// stream can back the external texture, the program fails to build, or
    /// `width`/`height` is zero.
    pub fn with_config(
        gl: &mut G,
        texture: G::Texture,
        width: u32,
        height: u32,
        config: QuadConfig,
    ) -> Result<Self, CameraError> {
        let camera_backed = gl.camera_caps().image;
        let texture = if camera_backed {
            let external = gl.create_texture().map_err(CameraError::Resource)?;
            if let Err(e) = gl.tex_image_camera(external) {
                gl.delete_texture(external);
                return Err(e.into());
            }
            log::debug!("sampling camera stream through external texture {external:?}");
            external
        } else {
            log::debug!("sampling caller texture {texture:?}");
            texture
        };

        let program = ShaderProgram::link(
            &*gl,
            QUAD_VERTEX_SHADER,
            fragment_source(camera_backed),
            &[POSITION_ATTRIB, TEX_COORD_ATTRIB],
        )?;

        let vertex_buffer = BufferSlot::new(gl.create_buffer().map_err(CameraError::Resource)?);
        let index_buffer = BufferSlot::new(gl.create_buffer().map_err(CameraError::Resource)?);

        let mut camera = Self {
            program,
            vertex_buffer,
            index_buffer,
            texture,
            camera_backed,
            ortho_proj_matrix: Mat4::IDENTITY,
            ortho_view_matrix: Mat4::IDENTITY,
            config,
            width,
            height,
            index_count: 0,
        };
        camera.resize(gl, width, height)?;
        Ok(camera)
    }

    /// Rebuilds the quad for a new viewport size and re-uploads both buffers.
    ///
    /// Both matrices are reset to identity; no orthographic projection is
    /// applied for the viewport.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::InvalidDimensions` if either side is zero. The
    /// previous geometry stays in place in that case.
    pub fn resize(&mut self, gl: &G, width: u32, height: u32) -> Result<(), CameraError> {
        let mesh = QuadMesh::build(&self.config, width, height)?;

        self.ortho_proj_matrix = Mat4::IDENTITY;
        self.ortho_view_matrix = Mat4::IDENTITY;
        self.width = width;
        self.height = height;

        self.vertex_buffer
            .upload(gl, BufferTarget::Array, mesh.vertex_bytes())?;
        self.index_buffer
            .upload(gl, BufferTarget::ElementArray, mesh.index_bytes())?;
        self.index_count = mesh.index_count();

        log::debug!(
            "quad resized to {width}x{height}: half extents {} x {}",
            self.config.half_width,
            mesh.half_height()
        );
        Ok(())
    }

    /// Draws the quad with `projection` and the stored view matrix.
    ///
    /// With the camera update entry point the external texture is refreshed on
    /// unit 1 and the depth buffer is cleared after the draw, so the camera
    /// image sits behind anything drawn later. Otherwise the plain texture is
    /// bound on unit 0. Exactly one draw call is issued either way.
    pub fn render(&self, gl: &mut G, projection: &Mat4) {
        self.program.use_program(gl);

        gl.uniform_matrix_4(self.program.uniform(PROJECTION_UNIFORM), projection);
        gl.uniform_matrix_4(
            self.program.uniform(MODEL_VIEW_UNIFORM),
            &self.ortho_view_matrix,
        );

        gl.bind_buffer(BufferTarget::Array, Some(self.vertex_buffer.handle()));
        gl.bind_buffer(BufferTarget::ElementArray, Some(self.index_buffer.handle()));

        let (position_name, position_default) = POSITION_ATTRIB;
        let (tex_coord_name, tex_coord_default) = TEX_COORD_ATTRIB;
        let position = self.program.attrib(position_name).unwrap_or(position_default);
        let tex_coord = self.program.attrib(tex_coord_name).unwrap_or(tex_coord_default);
        gl.enable_vertex_attrib_array(position);
        gl.enable_vertex_attrib_array(tex_coord);
        gl.vertex_attrib_pointer_f32(position, 3, VERTEX_STRIDE, POSITION_OFFSET);
        gl.vertex_attrib_pointer_f32(tex_coord, 2, VERTEX_STRIDE, TEX_COORD_OFFSET);

        let count = self.index_count as i32;
        let diffuse = self.program.uniform(DIFFUSE_UNIFORM);

        if gl.camera_caps().update {
            gl.active_texture(TextureUnit::ONE);
            gl.uniform_1_i32(diffuse, TextureUnit::ONE.sampler_index());
            let timestamp = gl.tex_image_camera_update(self.texture);
            log::trace!("camera frame {timestamp}");
            gl.draw_triangles_u16(count);
            gl.active_texture(TextureUnit::ZERO);
            gl.clear_depth();
        } else {
            gl.active_texture(TextureUnit::ZERO);
            gl.uniform_1_i32(diffuse, TextureUnit::ZERO.sampler_index());
            gl.bind_texture_2d(Some(self.texture));
            gl.draw_triangles_u16(count);
        }

        gl.flush();
    }

    pub fn ortho_proj_matrix(&self) -> &Mat4 {
        &self.ortho_proj_matrix
    }

    pub fn ortho_view_matrix(&self) -> &Mat4 {
        &self.ortho_view_matrix
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    /// The texture being sampled: the caller's, or the camera-backed one.
    pub fn texture(&self) -> G::Texture {
        self.texture
    }

    /// Whether the texture is fed by the camera stream.
    pub fn is_camera_backed(&self) -> bool {
        self.camera_backed
    }

    pub fn config(&self) -> &QuadConfig {
        &self.config
    }
}
