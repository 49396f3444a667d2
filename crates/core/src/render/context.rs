//! GPU context wrapper with capability detection.
//!
//! `GpuContext` wraps a `glow::Context` and checks once for
//! `OES_EGL_image_external`, which the camera-backed texture path needs.

/// Wraps a `glow::Context` with detected GPU capabilities.
pub struct GpuContext {
    gl: glow::Context,
    supports_external_image: bool,
}

impl GpuContext {
    /// Wraps the given GL context and queries its extensions.
    ///
    /// Desktop and ES drivers report `GL_OES_EGL_image_external`; WebGL
    /// drops the `GL_` prefix. Either spelling counts.
    pub fn new(gl: glow::Context) -> Self {
        use glow::HasContext;

        let supports_external_image = has_external_image(gl.supported_extensions());
        log::debug!("OES_EGL_image_external supported: {supports_external_image}");

        Self {
            gl,
            supports_external_image,
        }
    }

    /// Returns a reference to the underlying `glow::Context`.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Consumes this wrapper and returns the underlying `glow::Context`.
    pub fn into_gl(self) -> glow::Context {
        self.gl
    }

    /// Whether external-OES textures can be sampled.
    pub fn supports_external_image(&self) -> bool {
        self.supports_external_image
    }
}

fn has_external_image<'a>(extensions: impl IntoIterator<Item = &'a String>) -> bool {
    extensions
        .into_iter()
        .any(|ext| ext.trim_start_matches("GL_") == "OES_EGL_image_external")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn detects_prefixed_extension_name() {
        assert!(has_external_image(&exts(&["GL_EXT_foo", "GL_OES_EGL_image_external"])));
    }

    #[test]
    fn detects_webgl_extension_name() {
        assert!(has_external_image(&exts(&["OES_EGL_image_external"])));
    }

    #[test]
    fn essl3_variant_alone_does_not_count() {
        assert!(!has_external_image(&exts(&["GL_OES_EGL_image_external_essl3"])));
    }

    #[test]
    fn empty_extension_list_is_unsupported() {
        assert!(!has_external_image(&exts(&[])));
    }

    #[test]
    #[ignore = "requires GL context"]
    fn new_reports_driver_extensions() {
        // Would test: GpuContext::new(gl).supports_external_image() matches the driver.
    }
}
