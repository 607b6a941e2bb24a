#![allow(dead_code)]

use shader_link_cache::{GraphicsContext, ProgramHandle, ShaderHandle, UniformLocation};
use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateProgram(ProgramHandle),
    AttachShader(ProgramHandle, ShaderHandle),
    DetachShader(ProgramHandle, ShaderHandle),
    BindAttribLocation(ProgramHandle, u32, String),
    LinkProgram(ProgramHandle),
    UseProgram(Option<ProgramHandle>),
    GetLinkStatus(ProgramHandle),
    GetInfoLog(ProgramHandle),
    GetUniformLocation(ProgramHandle, String),
    SetUniformI32(UniformLocation, i32),
    IsProgram(ProgramHandle),
    DeleteProgram(ProgramHandle),
}

/// Records every driver call and simulates program objects.
pub struct RecordingContext {
    calls: RefCell<Vec<Call>>,
    next_handle: Cell<ProgramHandle>,
    live_programs: RefCell<HashSet<ProgramHandle>>,
    uniforms: RefCell<HashMap<String, UniformLocation>>,
    failing_link_log: RefCell<Option<String>>,
    refuse_create: Cell<bool>,
    lost: Cell<bool>,
}

impl RecordingContext {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        Self {
            calls: RefCell::new(Vec::new()),
            next_handle: Cell::new(1),
            live_programs: RefCell::new(HashSet::new()),
            uniforms: RefCell::new(HashMap::new()),
            failing_link_log: RefCell::new(None),
            refuse_create: Cell::new(false),
            lost: Cell::new(false),
        }
    }

    pub fn with_uniform(self, name: &str, location: UniformLocation) -> Self {
        self.uniforms
            .borrow_mut()
            .insert(String::from(name), location);
        self
    }

    pub fn fail_links_with(&self, log: &str) {
        *self.failing_link_log.borrow_mut() = Some(String::from(log));
    }

    pub fn succeed_links(&self) {
        *self.failing_link_log.borrow_mut() = None;
    }

    pub fn refuse_create(&self) {
        self.refuse_create.set(true);
    }

    pub fn lose(&self) {
        self.lost.set(true);
    }

    /// Simulates someone else deleting a program behind the cache's back.
    pub fn forget_program(&self, program: ProgramHandle) {
        self.live_programs.borrow_mut().remove(&program);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| predicate(call)).count()
    }

    pub fn link_count(&self) -> usize {
        self.count(|call| matches!(call, Call::LinkProgram(_)))
    }

    pub fn deleted(&self) -> Vec<ProgramHandle> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::DeleteProgram(program) => Some(*program),
                _ => None,
            })
            .collect()
    }

    pub fn live_programs(&self) -> usize {
        self.live_programs.borrow().len()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl GraphicsContext for RecordingContext {
    fn create_program(&self) -> Result<ProgramHandle, String> {
        if self.refuse_create.get() {
            return Err(String::from("out of memory"));
        }

        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);
        self.live_programs.borrow_mut().insert(handle);
        self.record(Call::CreateProgram(handle));
        Ok(handle)
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        self.record(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        self.record(Call::DetachShader(program, shader));
    }

    fn bind_attrib_location(&self, program: ProgramHandle, index: u32, name: &str) {
        self.record(Call::BindAttribLocation(program, index, String::from(name)));
    }

    fn link_program(&self, program: ProgramHandle) {
        self.record(Call::LinkProgram(program));
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        self.record(Call::UseProgram(program));
    }

    fn get_program_link_status(&self, program: ProgramHandle) -> bool {
        self.record(Call::GetLinkStatus(program));
        self.failing_link_log.borrow().is_none()
    }

    fn get_program_info_log(&self, program: ProgramHandle) -> String {
        self.record(Call::GetInfoLog(program));
        self.failing_link_log.borrow().clone().unwrap_or_default()
    }

    fn get_uniform_location(
        &self,
        program: ProgramHandle,
        name: &str,
    ) -> Option<UniformLocation> {
        self.record(Call::GetUniformLocation(program, String::from(name)));
        self.uniforms.borrow().get(name).copied()
    }

    fn set_uniform_i32(&self, location: UniformLocation, value: i32) {
        self.record(Call::SetUniformI32(location, value));
    }

    fn is_program(&self, program: ProgramHandle) -> bool {
        self.record(Call::IsProgram(program));
        !self.lost.get() && self.live_programs.borrow().contains(&program)
    }

    fn delete_program(&self, program: ProgramHandle) {
        self.live_programs.borrow_mut().remove(&program);
        self.record(Call::DeleteProgram(program));
    }
}
