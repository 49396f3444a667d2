//! Shader compilation and linking against a live `glow::Context`.

use crate::shader::{format_shader_error, ShaderError};

/// Compiles a single shader stage.
///
/// # Errors
///
/// Returns `ShaderError::CompileError` with the numbered source and the
/// driver's info log if the GLSL fails to compile.
#[allow(unsafe_code)]
pub fn compile_shader(
    gl: &glow::Context,
    shader_type: u32,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    use glow::HasContext;

    let stage = match shader_type {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    };

    // SAFETY: glow wraps raw GL calls as unsafe. The shader type is one of
    // the constants above and the handle is deleted on the failure path.
    unsafe {
        let shader = gl
            .create_shader(shader_type)
            .map_err(|log| ShaderError::CompileError {
                stage: stage.to_string(),
                log,
            })?;

        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if gl.get_shader_compile_status(shader) {
            return Ok(shader);
        }

        let info_log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        Err(ShaderError::CompileError {
            stage: stage.to_string(),
            log: format_shader_error(source, &info_log),
        })
    }
}

/// Links a vertex and fragment shader into a program, binding each
/// `(name, location)` attribute first.
///
/// # Errors
///
/// Returns `ShaderError::LinkError` if linking fails.
#[allow(unsafe_code)]
pub fn link_program(
    gl: &glow::Context,
    vertex: glow::Shader,
    fragment: glow::Shader,
    attribs: &[(&str, u32)],
) -> Result<glow::Program, ShaderError> {
    use glow::HasContext;

    // SAFETY: shader handles come from compile_shader; the program is
    // deleted if the link fails.
    unsafe {
        let program = gl.create_program().map_err(ShaderError::LinkError)?;

        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        for &(name, location) in attribs {
            gl.bind_attrib_location(program, location, name);
        }
        gl.link_program(program);

        // The program keeps its own copies once linked.
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);

        if gl.get_program_link_status(program) {
            return Ok(program);
        }

        let info_log = gl.get_program_info_log(program);
        gl.delete_program(program);
        Err(ShaderError::LinkError(info_log))
    }
}

/// Compiles both stages and links them with the given attribute bindings.
/// Shader objects are deleted afterwards whether or not the link succeeds.
///
/// # Errors
///
/// Returns the first compile error, or the link error.
#[allow(unsafe_code)]
pub fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
    attribs: &[(&str, u32)],
) -> Result<glow::Program, ShaderError> {
    use glow::HasContext;

    let vert = compile_shader(gl, glow::VERTEX_SHADER, vertex_src)?;
    let frag = match compile_shader(gl, glow::FRAGMENT_SHADER, fragment_src) {
        Ok(f) => f,
        Err(e) => {
            // SAFETY: vert is a valid handle from a successful compile.
            unsafe { gl.delete_shader(vert) };
            return Err(e);
        }
    };

    let result = link_program(gl, vert, frag, attribs);

    // SAFETY: both handles are valid and no longer needed.
    unsafe {
        gl.delete_shader(vert);
        gl.delete_shader(frag);
    }

    result
}

/// Active uniforms of `program` with their locations. Array uniforms are
/// reported under their base name.
#[allow(unsafe_code)]
pub fn active_uniforms(
    gl: &glow::Context,
    program: glow::Program,
) -> Vec<(String, glow::UniformLocation)> {
    use glow::HasContext;

    // SAFETY: program is a linked program handle.
    unsafe {
        (0..gl.get_active_uniforms(program))
            .filter_map(|index| gl.get_active_uniform(program, index))
            .filter_map(|uniform| {
                let name = uniform.name.trim_end_matches("[0]").to_string();
                gl.get_uniform_location(program, &name)
                    .map(|location| (name, location))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_api_has_expected_shape() {
        // Compile-time check of the public signatures.
        let _compile: fn(&glow::Context, u32, &str) -> Result<glow::Shader, ShaderError> =
            compile_shader;
        let _program: fn(&glow::Context, &str, &str, &[(&str, u32)]) -> Result<glow::Program, ShaderError> =
            compile_program;
    }

    #[test]
    #[ignore = "requires GL context"]
    fn compile_program_binds_attribute_locations() {
        // Would test: get_attrib_location(program, "texCoord") == Some(1).
    }

    #[test]
    #[ignore = "requires GL context"]
    fn compile_shader_reports_numbered_source_on_error() {
        // Would test: a bad fragment source yields CompileError { stage: "fragment", .. }.
    }
}
