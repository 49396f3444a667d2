//! GLSL ES 1.00 sources for the camera quad and shader error reporting.
//!
//! Two fragment variants exist: one samples an ordinary `sampler2D`, the
//! other a `samplerExternalOES` fed directly by the camera stream.

use thiserror::Error;

/// Attribute name and location for vertex positions.
pub const POSITION_ATTRIB: (&str, u32) = ("position", 0);
/// Attribute name and location for texture coordinates.
pub const TEX_COORD_ATTRIB: (&str, u32) = ("texCoord", 1);

pub const PROJECTION_UNIFORM: &str = "projectionMat";
pub const MODEL_VIEW_UNIFORM: &str = "modelViewMat";
pub const DIFFUSE_UNIFORM: &str = "diffuse";

/// Vertex stage shared by both variants.
pub const QUAD_VERTEX_SHADER: &str = r#"uniform mat4 projectionMat;
uniform mat4 modelViewMat;
attribute vec3 position;
attribute vec2 texCoord;
varying vec2 vTexCoord;
void main() {
  vTexCoord = texCoord;
  gl_Position = projectionMat * modelViewMat * vec4( position, 1.0 );
}
"#;

/// Fragment stage sampling a plain 2D texture.
pub const QUAD_FRAGMENT_SHADER: &str = r#"precision mediump float;
uniform sampler2D diffuse;
varying vec2 vTexCoord;
void main() {
  gl_FragColor = texture2D(diffuse, vTexCoord);
}
"#;

/// Fragment stage sampling an external-OES camera texture.
pub const QUAD_FRAGMENT_SHADER_OES: &str = r#"#extension GL_OES_EGL_image_external : require
precision mediump float;
uniform samplerExternalOES diffuse;
varying vec2 vTexCoord;
void main() {
  gl_FragColor = texture2D(diffuse, vTexCoord);
}
"#;

/// Picks the fragment stage for a plain or camera-backed texture.
pub fn fragment_source(external: bool) -> &'static str {
    if external {
        QUAD_FRAGMENT_SHADER_OES
    } else {
        QUAD_FRAGMENT_SHADER
    }
}

/// Errors that can occur during shader compilation or program linking.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    CompileError {
        /// The shader stage that failed (e.g. "vertex", "fragment").
        stage: String,
        /// Numbered source followed by the driver's info log.
        log: String,
    },
    /// A program failed to link.
    #[error("shader link error:\n{0}")]
    LinkError(String),
}

/// Prepends right-aligned line numbers to `source` and appends the driver `log`,
/// so line references in the log can be matched to the GLSL.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let width = lines.len().max(1).to_string().len();

    let numbered = lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    match (numbered.is_empty(), log.is_empty()) {
        (true, true) => String::new(),
        (true, false) => log.to_string(),
        (false, true) => numbered,
        (false, false) => format!("{numbered}\n\n{log}"),
    }
}
