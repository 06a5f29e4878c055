//! Shader compilation and program linking.

use std::ffi::CString;
use std::fmt;

use crate::error::RenderError;
use crate::gl_api::GlApi;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// A compiled shader object. It only needs to live until the program it's attached to has been
/// linked, and is deleted when dropped.
struct Shader<'gl, G: GlApi + ?Sized> {
    gl: &'gl G,
    id: u32,
}

impl<'gl, G: GlApi + ?Sized> Shader<'gl, G> {
    fn compile(gl: &'gl G, stage: ShaderStage, source: &str) -> Result<Self, RenderError> {
        let source = CString::new(source).map_err(|_| RenderError::InvalidSource)?;

        let id = gl.create_shader(stage.gl_enum());
        if id == 0 {
            return Err(RenderError::ObjectCreation("shader"));
        }

        // From here on the shader is deleted on every path.
        let shader = Self { gl, id };

        gl.shader_source(id, &source);
        gl.compile_shader(id);

        if !gl.shader_compiled(id) {
            return Err(RenderError::ShaderCompile {
                stage,
                log: gl.shader_info_log(id),
            });
        }

        log::trace!("compiled {} shader {}", stage, id);
        Ok(shader)
    }
}

impl<G: GlApi + ?Sized> Drop for Shader<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

/// Compiles both stages and links them into a new program.
///
/// The intermediate shader objects are always deleted before this returns. On failure the
/// program object is deleted too and the GL info log is returned in the error.
pub fn build_program<G: GlApi + ?Sized>(
    gl: &G,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<u32, RenderError> {
    let vertex = Shader::compile(gl, ShaderStage::Vertex, vertex_src)?;
    let fragment = Shader::compile(gl, ShaderStage::Fragment, fragment_src)?;

    let program = gl.create_program();
    if program == 0 {
        return Err(RenderError::ObjectCreation("program"));
    }

    gl.attach_shader(program, vertex.id);
    gl.attach_shader(program, fragment.id);
    gl.link_program(program);

    if !gl.program_linked(program) {
        let log = gl.program_info_log(program);
        gl.delete_program(program);
        return Err(RenderError::ProgramLink { log });
    }

    log::trace!("linked program {}", program);
    Ok(program)
}
