//! Recording `QuadGl` double for unit tests (no GPU required).

use std::cell::{Cell, RefCell};

use glam::Mat4;

use crate::feed::FeedError;
use crate::gl::{BufferTarget, CameraCaps, QuadGl, TextureUnit};
use crate::shader::{ShaderError, DIFFUSE_UNIFORM, MODEL_VIEW_UNIFORM, PROJECTION_UNIFORM};

pub const PROJECTION_LOC: u32 = 100;
pub const MODEL_VIEW_LOC: u32 = 101;
pub const DIFFUSE_LOC: u32 = 102;

/// One recorded context call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateBuffer(u32),
    CreateTexture(u32),
    DeleteTexture(u32),
    BuildProgram {
        program: u32,
        fragment_src: String,
        attribs: Vec<(String, u32)>,
    },
    UseProgram(Option<u32>),
    BindBuffer(BufferTarget, Option<u32>),
    BufferData(BufferTarget, usize),
    UniformMatrix4(Option<u32>, Mat4),
    Uniform1i(Option<u32>, i32),
    EnableAttrib(u32),
    AttribPointer {
        index: u32,
        components: i32,
        stride: i32,
        offset: i32,
    },
    ActiveTexture(TextureUnit),
    BindTexture2d(Option<u32>),
    DrawTriangles(i32),
    ClearDepth,
    Flush,
    TexImageCamera(u32),
    TexImageCameraUpdate(u32),
}

/// Hands out sequential handles and records every call in order.
pub struct RecordingGl {
    caps: CameraCaps,
    link_failure: Option<String>,
    camera_failure: Option<FeedError>,
    next_handle: Cell<u32>,
    calls: RefCell<Vec<Call>>,
    frames: u64,
}

impl RecordingGl {
    pub fn new(caps: CameraCaps) -> Self {
        Self {
            caps,
            link_failure: None,
            camera_failure: None,
            next_handle: Cell::new(1),
            calls: RefCell::new(Vec::new()),
            frames: 0,
        }
    }

    /// Makes every `build_program` fail with a link error carrying `log`.
    pub fn failing_link(mut self, log: &str) -> Self {
        self.link_failure = Some(log.to_owned());
        self
    }

    /// Makes every `tex_image_camera` fail with `err`.
    pub fn failing_camera(mut self, err: FeedError) -> Self {
        self.camera_failure = Some(err);
        self
    }

    pub fn set_caps(&mut self, caps: CameraCaps) {
        self.caps = caps;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(*c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn handle(&self) -> u32 {
        let id = self.next_handle.get();
        self.next_handle.set(id + 1);
        id
    }
}

impl QuadGl for RecordingGl {
    type Program = u32;
    type Buffer = u32;
    type Texture = u32;
    type UniformLocation = u32;

    fn camera_caps(&self) -> CameraCaps {
        self.caps
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let id = self.handle();
        self.record(Call::CreateBuffer(id));
        Ok(id)
    }

    fn create_texture(&self) -> Result<u32, String> {
        let id = self.handle();
        self.record(Call::CreateTexture(id));
        Ok(id)
    }

    fn delete_texture(&self, texture: u32) {
        self.record(Call::DeleteTexture(texture));
    }

    fn build_program(
        &self,
        _vertex_src: &str,
        fragment_src: &str,
        attribs: &[(&str, u32)],
    ) -> Result<u32, ShaderError> {
        if let Some(log) = &self.link_failure {
            return Err(ShaderError::LinkError(log.clone()));
        }
        let program = self.handle();
        self.record(Call::BuildProgram {
            program,
            fragment_src: fragment_src.to_owned(),
            attribs: attribs
                .iter()
                .map(|&(name, loc)| (name.to_owned(), loc))
                .collect(),
        });
        Ok(program)
    }

    fn active_uniforms(&self, _program: u32) -> Vec<(String, u32)> {
        vec![
            (PROJECTION_UNIFORM.to_owned(), PROJECTION_LOC),
            (MODEL_VIEW_UNIFORM.to_owned(), MODEL_VIEW_LOC),
            (DIFFUSE_UNIFORM.to_owned(), DIFFUSE_LOC),
        ]
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData(target, data.len()));
    }

    fn uniform_matrix_4(&self, location: Option<&u32>, value: &Mat4) {
        self.record(Call::UniformMatrix4(location.copied(), *value));
    }

    fn uniform_1_i32(&self, location: Option<&u32>, value: i32) {
        self.record(Call::Uniform1i(location.copied(), value));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableAttrib(index));
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        self.record(Call::AttribPointer {
            index,
            components,
            stride,
            offset,
        });
    }

    fn active_texture(&self, unit: TextureUnit) {
        self.record(Call::ActiveTexture(unit));
    }

    fn bind_texture_2d(&self, texture: Option<u32>) {
        self.record(Call::BindTexture2d(texture));
    }

    fn draw_triangles_u16(&self, count: i32) {
        self.record(Call::DrawTriangles(count));
    }

    fn clear_depth(&self) {
        self.record(Call::ClearDepth);
    }

    fn flush(&self) {
        self.record(Call::Flush);
    }

    fn tex_image_camera(&mut self, texture: u32) -> Result<(), FeedError> {
        self.record(Call::TexImageCamera(texture));
        match &self.camera_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn tex_image_camera_update(&mut self, texture: u32) -> u64 {
        self.record(Call::TexImageCameraUpdate(texture));
        self.frames += 1;
        self.frames
    }
}
