//! `glow` backend for the quad renderer.
//!
//! This module is only available when the `render` feature is enabled.
//!
//! # Module overview
//!
//! - [`context`] -- GPU context wrapper with extension detection.
//! - [`compile`] -- Shader compilation, attribute binding and linking.
//! - [`texture`] -- External-OES texture setup.
//! - [`quad`] -- [`QuadGl`](crate::QuadGl) implementation with a camera feed.

pub mod compile;
pub mod context;
pub mod quad;
pub mod texture;

pub use compile::{compile_program, compile_shader, link_program};
pub use context::GpuContext;
pub use quad::GlowQuad;
pub use texture::{configure_external_texture, ExternalTextureConfig, TEXTURE_EXTERNAL_OES};
