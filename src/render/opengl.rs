use glow::HasContext;

pub type ProgramHandle = u32;
pub type ShaderHandle = u32;
pub type UniformLocation = u32;

/// The driver calls the link cache needs. All of them are expected to run on the
/// thread that owns the GL context.
///
/// `is_program` must answer `false` rather than fail when the context has been
/// lost, so teardown can treat such handles as already released.
pub trait GraphicsContext {
    fn create_program(&self) -> Result<ProgramHandle, String>;
    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle);
    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle);
    fn bind_attrib_location(&self, program: ProgramHandle, index: u32, name: &str);
    fn link_program(&self, program: ProgramHandle);
    fn use_program(&self, program: Option<ProgramHandle>);
    fn get_program_link_status(&self, program: ProgramHandle) -> bool;
    fn get_program_info_log(&self, program: ProgramHandle) -> String;
    fn get_uniform_location(&self, program: ProgramHandle, name: &str)
        -> Option<UniformLocation>;
    fn set_uniform_i32(&self, location: UniformLocation, value: i32);
    fn is_program(&self, program: ProgramHandle) -> bool;
    fn delete_program(&self, program: ProgramHandle);
}

impl GraphicsContext for glow::Context {
    fn create_program(&self) -> Result<ProgramHandle, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    fn bind_attrib_location(&self, program: ProgramHandle, index: u32, name: &str) {
        unsafe { HasContext::bind_attrib_location(self, program, index, name) }
    }

    fn link_program(&self, program: ProgramHandle) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn get_program_link_status(&self, program: ProgramHandle) -> bool {
        unsafe { HasContext::get_program_link_status(self, program) }
    }

    fn get_program_info_log(&self, program: ProgramHandle) -> String {
        unsafe { HasContext::get_program_info_log(self, program) }
    }

    fn get_uniform_location(
        &self,
        program: ProgramHandle,
        name: &str,
    ) -> Option<UniformLocation> {
        unsafe { HasContext::get_uniform_location(self, program, name) }
    }

    fn set_uniform_i32(&self, location: UniformLocation, value: i32) {
        unsafe { HasContext::uniform_1_i32(self, Some(&location), value) }
    }

    fn is_program(&self, program: ProgramHandle) -> bool {
        unsafe { HasContext::is_program(self, program) }
    }

    fn delete_program(&self, program: ProgramHandle) {
        unsafe { HasContext::delete_program(self, program) }
    }
}
