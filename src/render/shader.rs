use super::{
    gl_program::LinkedProgram,
    opengl::{GraphicsContext, ProgramHandle, ShaderHandle},
};
use std::fmt;

/// Stable identity of a compiled stage, supplied by whatever compiled it. Equal
/// for semantically identical stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StageId(pub u64);

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// A compiled stage as seen by the link cache. Compilation happens elsewhere.
pub trait ShaderStage {
    fn id(&self) -> StageId;
    fn handle(&self) -> ShaderHandle;

    /// Called on the vertex stage between attaching and linking.
    fn bind_attribute_locations<C: GraphicsContext + ?Sized>(
        &self,
        _gl: &C,
        _program: ProgramHandle,
    ) {
    }

    /// Called on the pixel stage once the program is linked and active.
    fn assign_texture_units<C: GraphicsContext + ?Sized>(&self, _program: &LinkedProgram<C>) {}
}

/// An already compiled GL stage together with its binding metadata.
#[derive(Clone, Debug)]
pub struct GlStage {
    id: StageId,
    handle: ShaderHandle,
    attributes: Vec<(u32, String)>,
    samplers: Vec<(String, i32)>,
}

impl GlStage {
    pub fn new(handle: ShaderHandle, id: StageId) -> GlStage {
        GlStage {
            id,
            handle,
            attributes: Vec::new(),
            samplers: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, index: u32, name: &str) -> GlStage {
        self.attributes.push((index, String::from(name)));
        self
    }

    pub fn with_sampler(mut self, name: &str, unit: i32) -> GlStage {
        self.samplers.push((String::from(name), unit));
        self
    }

    pub fn attributes(&self) -> &[(u32, String)] {
        &self.attributes
    }

    pub fn samplers(&self) -> &[(String, i32)] {
        &self.samplers
    }
}

impl ShaderStage for GlStage {
    fn id(&self) -> StageId {
        self.id
    }

    fn handle(&self) -> ShaderHandle {
        self.handle
    }

    fn bind_attribute_locations<C: GraphicsContext + ?Sized>(
        &self,
        gl: &C,
        program: ProgramHandle,
    ) {
        for (index, name) in &self.attributes {
            gl.bind_attrib_location(program, *index, name);
        }
    }

    fn assign_texture_units<C: GraphicsContext + ?Sized>(&self, program: &LinkedProgram<C>) {
        for (name, unit) in &self.samplers {
            // Samplers optimized away by the driver simply have no location.
            if let Some(location) = program.uniform_location(name) {
                program.context().set_uniform_i32(location, *unit);
            }
        }
    }
}
