//! Error types for the camera-quad core.

use thiserror::Error;

use crate::feed::FeedError;
use crate::gl::BufferTarget;
use crate::shader::ShaderError;

/// Errors produced while building or resizing a [`CubeCamera`](crate::CubeCamera).
#[derive(Debug, Error)]
pub enum CameraError {
    /// Width or height was zero, so the quad's aspect ratio is undefined.
    #[error("invalid dimensions {width}x{height}: width and height must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The quad program failed to compile or link.
    #[error(transparent)]
    Shader(#[from] ShaderError),

    /// The graphics context failed to allocate a buffer or texture.
    #[error("resource allocation failed: {0}")]
    Resource(String),

    /// A buffer was bound or filled through a target it cannot serve.
    #[error("buffer bound to {bound:?} cannot be used as {requested:?}")]
    BufferTarget {
        bound: BufferTarget,
        requested: BufferTarget,
    },

    /// The camera feed backing the external texture failed.
    #[error(transparent)]
    Feed(#[from] FeedError),
}
