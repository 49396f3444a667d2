#![deny(unsafe_code)]
//! Textured quad renderer for camera images in graphics tests.
//!
//! Provides `CubeCamera`, which draws a caller texture or a live
//! external-OES camera stream on a single quad. It is written against the
//! `QuadGl` context trait, with a `glow` implementation behind the `render`
//! feature. Also here: the quad geometry, shader sources, a linked-program
//! helper, the camera feed lifecycle, and configuration.

pub mod buffer;
pub mod camera;
pub mod config;
pub mod error;
pub mod feed;
pub mod geometry;
pub mod gl;
pub mod params;
pub mod program;
pub mod shader;

#[cfg(feature = "render")]
pub mod render;

#[cfg(test)]
mod testing;

pub use buffer::BufferSlot;
pub use camera::CubeCamera;
pub use config::{CameraQuadConfig, FeedConfig, QuadConfig};
pub use error::CameraError;
pub use feed::{CameraDevice, CameraFeed, FeedError, FpsMode, NoCamera, PreviewSettings};
pub use geometry::{QuadMesh, QuadVertex};
pub use gl::{BufferTarget, CameraCaps, QuadGl, TextureUnit};
pub use program::ShaderProgram;
pub use shader::ShaderError;
