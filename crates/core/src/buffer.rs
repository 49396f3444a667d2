//! GPU buffer handle that remembers how it is used.
//!
//! Once a buffer has been bound as an index buffer it stays one: moving it
//! between `ElementArray` and `Array` is rejected, as WebGL does.

use crate::error::CameraError;
use crate::gl::{BufferTarget, QuadGl};

/// A buffer plus the target it was first bound to and the size of its contents.
#[derive(Debug, Clone, Copy)]
pub struct BufferSlot<B> {
    handle: B,
    target: Option<BufferTarget>,
    capacity: usize,
}

impl<B: Copy> BufferSlot<B> {
    pub fn new(handle: B) -> Self {
        Self {
            handle,
            target: None,
            capacity: 0,
        }
    }

    pub fn handle(&self) -> B {
        self.handle
    }

    /// Target recorded by the first bind, if any.
    pub fn target(&self) -> Option<BufferTarget> {
        self.target
    }

    /// Size in bytes of the last upload.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Binds the buffer to `target`.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::BufferTarget` if the buffer was first bound to a
    /// target of the other kind.
    pub fn bind<G>(&mut self, gl: &G, target: BufferTarget) -> Result<(), CameraError>
    where
        G: QuadGl<Buffer = B>,
    {
        if let Some(bound) = self.target {
            if bound != target {
                return Err(CameraError::BufferTarget {
                    bound,
                    requested: target,
                });
            }
        }
        self.target = Some(target);
        gl.bind_buffer(target, Some(self.handle));
        Ok(())
    }

    /// Binds to `target` and replaces the contents with `data`.
    ///
    /// # Errors
    ///
    /// Same as [`bind`](Self::bind).
    pub fn upload<G>(&mut self, gl: &G, target: BufferTarget, data: &[u8]) -> Result<(), CameraError>
    where
        G: QuadGl<Buffer = B>,
    {
        self.bind(gl, target)?;
        gl.buffer_data(target, data);
        self.capacity = data.len();
        Ok(())
    }
}
