use super::opengl::{GraphicsContext, ProgramHandle, UniformLocation};
use std::{cell::RefCell, collections::HashMap, fmt};

/// A successfully linked program. Uniform locations are resolved on first use
/// and remembered, including names the driver does not know.
pub struct LinkedProgram<'gl, C: GraphicsContext + ?Sized> {
    gl: &'gl C,
    handle: ProgramHandle,
    uniform_locations: RefCell<HashMap<String, Option<UniformLocation>>>,
    warn_unbound_uniforms: bool,
}

impl<'gl, C: GraphicsContext + ?Sized> LinkedProgram<'gl, C> {
    pub(crate) fn new(
        gl: &'gl C,
        handle: ProgramHandle,
        warn_unbound_uniforms: bool,
    ) -> LinkedProgram<'gl, C> {
        LinkedProgram {
            gl,
            handle,
            uniform_locations: RefCell::new(HashMap::new()),
            warn_unbound_uniforms,
        }
    }

    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    pub fn context(&self) -> &'gl C {
        self.gl
    }

    pub fn use_by(&self) {
        self.gl.use_program(Some(self.handle));
    }

    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        if let Some(&location) = self.uniform_locations.borrow().get(name) {
            return location;
        }

        let location = self.gl.get_uniform_location(self.handle, name);

        if location.is_none() && self.warn_unbound_uniforms {
            log::warn!(
                "Uniform `{}` is not active in program {}",
                name,
                self.handle
            );
        }

        self.uniform_locations
            .borrow_mut()
            .insert(String::from(name), location);

        location
    }

    pub fn resolved_uniforms(&self) -> usize {
        self.uniform_locations.borrow().len()
    }

    /// Deletes the native program unless the context no longer knows it.
    pub(crate) fn release(self) {
        if self.gl.is_program(self.handle) {
            self.gl.delete_program(self.handle);
        } else {
            log::trace!("Program {} already released", self.handle);
        }
    }
}

impl<C: GraphicsContext + ?Sized> fmt::Debug for LinkedProgram<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedProgram")
            .field("handle", &self.handle)
            .field("resolved_uniforms", &self.resolved_uniforms())
            .finish()
    }
}
