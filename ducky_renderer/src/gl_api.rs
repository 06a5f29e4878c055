//! The seam between the renderer and OpenGL itself.
//!
//! Each method on [`GlApi`] is a single GL entry point with the raw pointers taken out of the
//! signature. Handles and enums stay as plain `u32`/`i32`, which is all the `gl::types` aliases are
//! anyway.

use std::ffi::{c_void, CStr};
use std::marker::PhantomData;
use std::mem::size_of;
use std::ptr::null;

use crate::error::RenderError;

pub trait GlApi {
    fn create_shader(&self, kind: u32) -> u32;
    fn shader_source(&self, shader: u32, source: &CStr);
    fn compile_shader(&self, shader: u32);
    /// `GL_COMPILE_STATUS` of the shader.
    fn shader_compiled(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32) -> String;
    fn delete_shader(&self, shader: u32);

    fn create_program(&self) -> u32;
    fn attach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32);
    /// `GL_LINK_STATUS` of the program.
    fn program_linked(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32) -> String;
    fn use_program(&self, program: u32);
    fn delete_program(&self, program: u32);

    /// Returns -1 if the program has no active uniform called `name`.
    fn uniform_location(&self, program: u32, name: &CStr) -> i32;
    /// Uploads a column-major 4x4 matrix without transposing it.
    fn uniform_matrix4(&self, location: i32, matrix: &[f32; 16]);

    fn gen_vertex_array(&self) -> u32;
    fn bind_vertex_array(&self, vao: u32);
    fn delete_vertex_array(&self, vao: u32);

    fn gen_buffer(&self) -> u32;
    fn bind_buffer(&self, target: u32, buffer: u32);
    fn buffer_data(&self, target: u32, data: &[f32], usage: u32);
    fn delete_buffer(&self, buffer: u32);

    /// `stride` and `offset` are in bytes.
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        kind: u32,
        normalized: bool,
        stride: i32,
        offset: usize,
    );
    fn enable_vertex_attrib_array(&self, index: u32);

    fn draw_arrays(&self, mode: u32, first: i32, count: i32);

    fn enable(&self, capability: u32);
    fn is_enabled(&self, capability: u32) -> bool;
    fn blend_func(&self, src: u32, dst: u32);
    fn depth_func(&self, func: u32);
    fn cull_face(&self, mode: u32);
    fn front_face(&self, mode: u32);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear(&self, mask: u32);

    /// Pops one entry off the GL error queue, `gl::NO_ERROR` once it's empty.
    fn get_error(&self) -> u32;
}

/// Borrowed contexts work too, so one context can be shared by several renderers.
impl<T: GlApi + ?Sized> GlApi for &T {
    fn create_shader(&self, kind: u32) -> u32 {
        (**self).create_shader(kind)
    }
    fn shader_source(&self, shader: u32, source: &CStr) {
        (**self).shader_source(shader, source)
    }
    fn compile_shader(&self, shader: u32) {
        (**self).compile_shader(shader)
    }
    fn shader_compiled(&self, shader: u32) -> bool {
        (**self).shader_compiled(shader)
    }
    fn shader_info_log(&self, shader: u32) -> String {
        (**self).shader_info_log(shader)
    }
    fn delete_shader(&self, shader: u32) {
        (**self).delete_shader(shader)
    }

    fn create_program(&self) -> u32 {
        (**self).create_program()
    }
    fn attach_shader(&self, program: u32, shader: u32) {
        (**self).attach_shader(program, shader)
    }
    fn link_program(&self, program: u32) {
        (**self).link_program(program)
    }
    fn program_linked(&self, program: u32) -> bool {
        (**self).program_linked(program)
    }
    fn program_info_log(&self, program: u32) -> String {
        (**self).program_info_log(program)
    }
    fn use_program(&self, program: u32) {
        (**self).use_program(program)
    }
    fn delete_program(&self, program: u32) {
        (**self).delete_program(program)
    }

    fn uniform_location(&self, program: u32, name: &CStr) -> i32 {
        (**self).uniform_location(program, name)
    }
    fn uniform_matrix4(&self, location: i32, matrix: &[f32; 16]) {
        (**self).uniform_matrix4(location, matrix)
    }

    fn gen_vertex_array(&self) -> u32 {
        (**self).gen_vertex_array()
    }
    fn bind_vertex_array(&self, vao: u32) {
        (**self).bind_vertex_array(vao)
    }
    fn delete_vertex_array(&self, vao: u32) {
        (**self).delete_vertex_array(vao)
    }

    fn gen_buffer(&self) -> u32 {
        (**self).gen_buffer()
    }
    fn bind_buffer(&self, target: u32, buffer: u32) {
        (**self).bind_buffer(target, buffer)
    }
    fn buffer_data(&self, target: u32, data: &[f32], usage: u32) {
        (**self).buffer_data(target, data, usage)
    }
    fn delete_buffer(&self, buffer: u32) {
        (**self).delete_buffer(buffer)
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
        (**self).vertex_attrib_pointer(index, size, kind, normalized, stride, offset)
    }
    fn enable_vertex_attrib_array(&self, index: u32) {
        (**self).enable_vertex_attrib_array(index)
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        (**self).draw_arrays(mode, first, count)
    }

    fn enable(&self, capability: u32) {
        (**self).enable(capability)
    }
    fn is_enabled(&self, capability: u32) -> bool {
        (**self).is_enabled(capability)
    }
    fn blend_func(&self, src: u32, dst: u32) {
        (**self).blend_func(src, dst)
    }
    fn depth_func(&self, func: u32) {
        (**self).depth_func(func)
    }
    fn cull_face(&self, mode: u32) {
        (**self).cull_face(mode)
    }
    fn front_face(&self, mode: u32) {
        (**self).front_face(mode)
    }
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        (**self).clear_color(r, g, b, a)
    }
    fn clear(&self, mask: u32) {
        (**self).clear(mask)
    }

    fn get_error(&self) -> u32 {
        (**self).get_error()
    }
}

/// The real thing: forwards every call to the function pointers loaded into the `gl` crate.
///
/// GL contexts are bound to a single thread, so this type is neither `Send` nor `Sync`.
pub struct NativeGl {
    _context_thread: PhantomData<*const ()>,
}

impl NativeGl {
    /// Loads the GL function pointers with `loader` (usually the windowing library's
    /// `get_proc_address`) and checks the entry points the renderer needs are there.
    ///
    /// The context that `loader` belongs to must be current on this thread.
    pub fn load_with<F>(loader: F) -> Result<Self, RenderError>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        let required = [
            ("glCreateShader", gl::CreateShader::is_loaded()),
            ("glCreateProgram", gl::CreateProgram::is_loaded()),
            ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
            ("glGenBuffers", gl::GenBuffers::is_loaded()),
            ("glDrawArrays", gl::DrawArrays::is_loaded()),
            ("glUniformMatrix4fv", gl::UniformMatrix4fv::is_loaded()),
        ];

        for &(name, loaded) in required.iter() {
            if !loaded {
                return Err(RenderError::NotLoaded(name));
            }
        }

        log::debug!("OpenGL function pointers loaded");

        Ok(Self {
            _context_thread: PhantomData,
        })
    }
}

// Info logs come back NUL-terminated; `written` excludes the terminator.
fn info_log_from(mut buf: Vec<u8>, written: i32) -> String {
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).trim_end().to_owned()
}

impl GlApi for NativeGl {
    fn create_shader(&self, kind: u32) -> u32 {
        unsafe { gl::CreateShader(kind) }
    }

    fn shader_source(&self, shader: u32, source: &CStr) {
        unsafe { gl::ShaderSource(shader, 1, &source.as_ptr(), null()) }
    }

    fn compile_shader(&self, shader: u32) {
        unsafe { gl::CompileShader(shader) }
    }

    fn shader_compiled(&self, shader: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };
        success != 0
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let mut len = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len) };
        if len <= 0 {
            return String::new();
        }

        let mut buf = vec![0u8; len as usize];
        let mut written = 0;
        let ptr = buf.as_mut_ptr() as *mut gl::types::GLchar;
        unsafe { gl::GetShaderInfoLog(shader, len, &mut written, ptr) };

        info_log_from(buf, written)
    }

    fn delete_shader(&self, shader: u32) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn link_program(&self, program: u32) {
        unsafe { gl::LinkProgram(program) }
    }

    fn program_linked(&self, program: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut success) };
        success != 0
    }

    fn program_info_log(&self, program: u32) -> String {
        let mut len = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len) };
        if len <= 0 {
            return String::new();
        }

        let mut buf = vec![0u8; len as usize];
        let mut written = 0;
        let ptr = buf.as_mut_ptr() as *mut gl::types::GLchar;
        unsafe { gl::GetProgramInfoLog(program, len, &mut written, ptr) };

        info_log_from(buf, written)
    }

    fn use_program(&self, program: u32) {
        unsafe { gl::UseProgram(program) }
    }

    fn delete_program(&self, program: u32) {
        unsafe { gl::DeleteProgram(program) }
    }

    fn uniform_location(&self, program: u32, name: &CStr) -> i32 {
        unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
    }

    fn uniform_matrix4(&self, location: i32, matrix: &[f32; 16]) {
        unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, matrix.as_ptr()) }
    }

    fn gen_vertex_array(&self) -> u32 {
        let mut vao = 0u32;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        vao
    }

    fn bind_vertex_array(&self, vao: u32) {
        unsafe { gl::BindVertexArray(vao) }
    }

    fn delete_vertex_array(&self, vao: u32) {
        unsafe { gl::DeleteVertexArrays(1, &vao) }
    }

    fn gen_buffer(&self) -> u32 {
        let mut vbo = 0u32;
        unsafe { gl::GenBuffers(1, &mut vbo) };
        vbo
    }

    fn bind_buffer(&self, target: u32, buffer: u32) {
        unsafe { gl::BindBuffer(target, buffer) }
    }

    fn buffer_data(&self, target: u32, data: &[f32], usage: u32) {
        unsafe {
            gl::BufferData(
                target,
                (data.len() * size_of::<f32>()) as gl::types::GLsizeiptr,
                data.as_ptr() as *const c_void,
                usage,
            );
        }
    }

    fn delete_buffer(&self, buffer: u32) {
        unsafe { gl::DeleteBuffers(1, &buffer) }
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
        let normalized = if normalized { gl::TRUE } else { gl::FALSE };
        unsafe {
            gl::VertexAttribPointer(index, size, kind, normalized, stride, offset as *const c_void)
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { gl::EnableVertexAttribArray(index) }
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        unsafe { gl::DrawArrays(mode, first, count) }
    }

    fn enable(&self, capability: u32) {
        unsafe { gl::Enable(capability) }
    }

    fn is_enabled(&self, capability: u32) -> bool {
        unsafe { gl::IsEnabled(capability) == gl::TRUE }
    }

    fn blend_func(&self, src: u32, dst: u32) {
        unsafe { gl::BlendFunc(src, dst) }
    }

    fn depth_func(&self, func: u32) {
        unsafe { gl::DepthFunc(func) }
    }

    fn cull_face(&self, mode: u32) {
        unsafe { gl::CullFace(mode) }
    }

    fn front_face(&self, mode: u32) {
        unsafe { gl::FrontFace(mode) }
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { gl::ClearColor(r, g, b, a) }
    }

    fn clear(&self, mask: u32) {
        unsafe { gl::Clear(mask) }
    }

    fn get_error(&self) -> u32 {
        unsafe { gl::GetError() }
    }
}
