//! Texture helpers for the camera-backed external texture.

/// `GL_TEXTURE_EXTERNAL_OES` from `OES_EGL_image_external`.
pub const TEXTURE_EXTERNAL_OES: u32 = 0x8D65;

/// Sampling state for an external texture.
///
/// External textures only allow `CLAMP_TO_EDGE` wrapping and no mipmaps, so
/// only the filter is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalTextureConfig {
    /// GL filter used for both minification and magnification.
    pub filter: u32,
}

impl Default for ExternalTextureConfig {
    fn default() -> Self {
        Self {
            filter: glow::LINEAR,
        }
    }
}

/// Binds `texture` as an external-OES texture and sets clamp/filter state.
/// Leaves the texture bound to `TEXTURE_EXTERNAL_OES`.
#[allow(unsafe_code)]
pub fn configure_external_texture(
    gl: &glow::Context,
    texture: glow::Texture,
    config: &ExternalTextureConfig,
) {
    use glow::HasContext;

    // SAFETY: texture is a handle created by this context; the target is
    // valid whenever OES_EGL_image_external is present.
    unsafe {
        gl.bind_texture(TEXTURE_EXTERNAL_OES, Some(texture));
        gl.tex_parameter_i32(
            TEXTURE_EXTERNAL_OES,
            glow::TEXTURE_WRAP_S,
            glow::CLAMP_TO_EDGE as i32,
        );
        gl.tex_parameter_i32(
            TEXTURE_EXTERNAL_OES,
            glow::TEXTURE_WRAP_T,
            glow::CLAMP_TO_EDGE as i32,
        );
        gl.tex_parameter_i32(
            TEXTURE_EXTERNAL_OES,
            glow::TEXTURE_MIN_FILTER,
            config.filter as i32,
        );
        gl.tex_parameter_i32(
            TEXTURE_EXTERNAL_OES,
            glow::TEXTURE_MAG_FILTER,
            config.filter as i32,
        );
    }
}
