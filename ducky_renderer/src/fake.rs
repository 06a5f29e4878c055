//! An in-memory [`GlApi`] that records every state-changing call and tracks which objects are
//! alive, so the wrappers can be tested without a window or a driver.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::ffi::CStr;

use crate::gl_api::GlApi;
use crate::shader::ShaderStage;
use crate::CAMERA_UNIFORM;

/// Location handed out for the camera uniform.
pub const CAMERA_LOCATION: i32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(u32),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(u32),
    DeleteProgram(u32),
    UniformMatrix4(i32, [f32; 16]),
    GenVertexArray(u32),
    BindVertexArray(u32),
    DeleteVertexArray(u32),
    GenBuffer(u32),
    DeleteBuffer(u32),
    BindBuffer(u32, u32),
    BufferData { target: u32, floats: usize, usage: u32 },
    VertexAttribPointer {
        index: u32,
        size: i32,
        kind: u32,
        normalized: bool,
        stride: i32,
        offset: usize,
    },
    EnableVertexAttribArray(u32),
    DrawArrays(u32, i32, i32),
    Enable(u32),
    BlendFunc(u32, u32),
    DepthFunc(u32),
    CullFace(u32),
    FrontFace(u32),
    ClearColor([f32; 4]),
    Clear(u32),
}

#[derive(Default)]
pub struct RecordingGl {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
    shaders: RefCell<HashMap<u32, u32>>,
    programs: RefCell<BTreeSet<u32>>,
    vaos: RefCell<BTreeSet<u32>>,
    buffers: RefCell<BTreeSet<u32>>,
    enabled: RefCell<HashSet<u32>>,
    errors: RefCell<VecDeque<u32>>,
    compile_failure: RefCell<Option<(u32, String)>>,
    link_failure: RefCell<Option<String>>,
    no_camera_uniform: Cell<bool>,
    null_handles: Cell<bool>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn live_shaders(&self) -> Vec<u32> {
        self.shaders.borrow().keys().copied().collect()
    }

    pub fn live_programs(&self) -> Vec<u32> {
        self.programs.borrow().iter().copied().collect()
    }

    pub fn live_vaos(&self) -> Vec<u32> {
        self.vaos.borrow().iter().copied().collect()
    }

    pub fn live_buffers(&self) -> Vec<u32> {
        self.buffers.borrow().iter().copied().collect()
    }

    pub fn push_error(&self, code: u32) {
        self.errors.borrow_mut().push_back(code);
    }

    /// Every shader of `stage` compiled from now on fails with `log`.
    pub fn fail_compile(&self, stage: ShaderStage, log: &str) {
        *self.compile_failure.borrow_mut() = Some((stage.gl_enum(), log.to_owned()));
    }

    pub fn fail_link(&self, log: &str) {
        *self.link_failure.borrow_mut() = Some(log.to_owned());
    }

    /// Makes linked programs look like the camera uniform was optimised out.
    pub fn drop_camera_uniform(&self) {
        self.no_camera_uniform.set(true);
    }

    /// Makes every object creation call return 0.
    pub fn return_null_handles(&self) {
        self.null_handles.set(true);
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn alloc(&self) -> u32 {
        if self.null_handles.get() {
            return 0;
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

impl GlApi for RecordingGl {
    fn create_shader(&self, kind: u32) -> u32 {
        let id = self.alloc();
        if id != 0 {
            self.shaders.borrow_mut().insert(id, kind);
        }
        self.record(Call::CreateShader(kind));
        id
    }

    fn shader_source(&self, shader: u32, _source: &CStr) {
        self.record(Call::ShaderSource(shader));
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compiled(&self, shader: u32) -> bool {
        let kind = self.shaders.borrow().get(&shader).copied();
        match (&*self.compile_failure.borrow(), kind) {
            (Some((failing, _)), Some(kind)) => *failing != kind,
            _ => true,
        }
    }

    fn shader_info_log(&self, _shader: u32) -> String {
        self.compile_failure
            .borrow()
            .as_ref()
            .map(|(_, log)| log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        self.shaders.borrow_mut().remove(&shader);
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> u32 {
        let id = self.alloc();
        if id != 0 {
            self.programs.borrow_mut().insert(id);
        }
        self.record(Call::CreateProgram(id));
        id
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_linked(&self, _program: u32) -> bool {
        self.link_failure.borrow().is_none()
    }

    fn program_info_log(&self, _program: u32) -> String {
        self.link_failure.borrow().clone().unwrap_or_default()
    }

    fn use_program(&self, program: u32) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.programs.borrow_mut().remove(&program);
        self.record(Call::DeleteProgram(program));
    }

    fn uniform_location(&self, _program: u32, name: &CStr) -> i32 {
        if !self.no_camera_uniform.get() && name.to_bytes() == CAMERA_UNIFORM.as_bytes() {
            CAMERA_LOCATION
        } else {
            -1
        }
    }

    fn uniform_matrix4(&self, location: i32, matrix: &[f32; 16]) {
        self.record(Call::UniformMatrix4(location, *matrix));
    }

    fn gen_vertex_array(&self) -> u32 {
        let id = self.alloc();
        if id != 0 {
            self.vaos.borrow_mut().insert(id);
        }
        self.record(Call::GenVertexArray(id));
        id
    }

    fn bind_vertex_array(&self, vao: u32) {
        self.record(Call::BindVertexArray(vao));
    }

    fn delete_vertex_array(&self, vao: u32) {
        self.vaos.borrow_mut().remove(&vao);
        self.record(Call::DeleteVertexArray(vao));
    }

    fn gen_buffer(&self) -> u32 {
        let id = self.alloc();
        if id != 0 {
            self.buffers.borrow_mut().insert(id);
        }
        self.record(Call::GenBuffer(id));
        id
    }

    fn bind_buffer(&self, target: u32, buffer: u32) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: u32, data: &[f32], usage: u32) {
        self.record(Call::BufferData {
            target,
            floats: data.len(),
            usage,
        });
    }

    fn delete_buffer(&self, buffer: u32) {
        self.buffers.borrow_mut().remove(&buffer);
        self.record(Call::DeleteBuffer(buffer));
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        kind: u32,
        normalized: bool,
        stride: i32,
        offset: usize,
    ) {
        self.record(Call::VertexAttribPointer {
            index,
            size,
            kind,
            normalized,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        self.record(Call::DrawArrays(mode, first, count));
    }

    fn enable(&self, capability: u32) {
        self.enabled.borrow_mut().insert(capability);
        self.record(Call::Enable(capability));
    }

    fn is_enabled(&self, capability: u32) -> bool {
        self.enabled.borrow().contains(&capability)
    }

    fn blend_func(&self, src: u32, dst: u32) {
        self.record(Call::BlendFunc(src, dst));
    }

    fn depth_func(&self, func: u32) {
        self.record(Call::DepthFunc(func));
    }

    fn cull_face(&self, mode: u32) {
        self.record(Call::CullFace(mode));
    }

    fn front_face(&self, mode: u32) {
        self.record(Call::FrontFace(mode));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn get_error(&self) -> u32 {
        self.errors.borrow_mut().pop_front().unwrap_or(gl::NO_ERROR)
    }
}
