//! Linked shader program with name-to-location lookups.

use std::collections::HashMap;

use crate::gl::QuadGl;
use crate::shader::ShaderError;

/// A linked program plus its attribute and uniform location maps.
pub struct ShaderProgram<G: QuadGl> {
    handle: G::Program,
    attribs: HashMap<String, u32>,
    uniforms: HashMap<String, G::UniformLocation>,
}

impl<G: QuadGl> ShaderProgram<G> {
    /// Compiles and links `vertex_src` + `fragment_src`, binding each attribute
    /// to its location before the link.
    ///
    /// # Errors
    ///
    /// Returns `ShaderError` if either stage fails to compile or the link fails.
    pub fn link(
        gl: &G,
        vertex_src: &str,
        fragment_src: &str,
        attribs: &[(&str, u32)],
    ) -> Result<Self, ShaderError> {
        let handle = gl.build_program(vertex_src, fragment_src, attribs)?;
        let uniforms: HashMap<_, _> = gl.active_uniforms(handle).into_iter().collect();
        log::debug!(
            "linked program {handle:?}: {} attributes, {} uniforms",
            attribs.len(),
            uniforms.len()
        );

        Ok(Self {
            handle,
            attribs: attribs
                .iter()
                .map(|&(name, location)| (name.to_owned(), location))
                .collect(),
            uniforms,
        })
    }

    pub fn handle(&self) -> G::Program {
        self.handle
    }

    /// Makes this the current program.
    pub fn use_program(&self, gl: &G) {
        gl.use_program(Some(self.handle));
    }

    /// Location of a uniform, or `None` if the driver optimised it away.
    pub fn uniform(&self, name: &str) -> Option<&G::UniformLocation> {
        self.uniforms.get(name)
    }

    /// Location an attribute was bound to.
    pub fn attrib(&self, name: &str) -> Option<u32> {
        self.attribs.get(name).copied()
    }
}
