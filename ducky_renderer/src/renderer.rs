use crate::error::RenderError;
use crate::gl_api::GlApi;
use crate::shader::build_program;
use crate::vertex::{self, VertexAttribute};
use crate::{CAMERA_UNIFORM, CAMERA_UNIFORM_NAME};

/// Owns one shader program, one vertex array object and one vertex buffer, and draws them as a
/// single batch of triangles.
///
/// Every method is a thin pass-through to GL and must be called on the thread the context is
/// current on. The usual setup order is [`compile_shaders`](Self::compile_shaders),
/// [`gen_vao`](Self::gen_vao), [`gen_vbo`](Self::gen_vbo), one
/// [`link_attrib`](Self::link_attrib) per attribute, then [`unbind_all`](Self::unbind_all). Each
/// frame is [`use_program`](Self::use_program), [`bind_vao`](Self::bind_vao),
/// [`draw`](Self::draw).
///
/// GPU objects are freed by [`delete`](Self::delete), or on drop.
pub struct Renderer<G: GlApi> {
    gl: G,
    program: Option<u32>,
    vao: Option<u32>,
    vbo: Option<u32>,
    vertex_count: usize,
    camera_location: Option<i32>,
}

impl<G: GlApi> Renderer<G> {
    /// Creates an empty renderer. No GL objects exist until they're compiled or generated.
    pub fn new(gl: G) -> Self {
        Self {
            gl,
            program: None,
            vao: None,
            vbo: None,
            vertex_count: 0,
            camera_location: None,
        }
    }

    pub fn gl(&self) -> &G {
        &self.gl
    }

    pub fn program(&self) -> Option<u32> {
        self.program
    }

    pub fn vao(&self) -> Option<u32> {
        self.vao
    }

    pub fn vbo(&self) -> Option<u32> {
        self.vbo
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Compiles and links the shader program, replacing any previous one.
    ///
    /// The vertex and fragment shader objects are deleted once the program is linked.
    pub fn compile_shaders(
        &mut self,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<(), RenderError> {
        let program = build_program(&self.gl, vertex_src, fragment_src)?;

        if let Some(old) = self.program.replace(program) {
            self.gl.delete_program(old);
        }
        self.camera_location = None;

        log::debug!("shader program {} ready", program);
        Ok(())
    }

    /// Generates the vertex array object, replacing any previous one.
    pub fn gen_vao(&mut self) -> Result<(), RenderError> {
        let vao = self.gl.gen_vertex_array();
        if vao == 0 {
            return Err(RenderError::ObjectCreation("vertex array"));
        }

        if let Some(old) = self.vao.replace(vao) {
            self.gl.delete_vertex_array(old);
        }

        log::trace!("generated vao {}", vao);
        Ok(())
    }

    /// Uploads `data` as a static vertex buffer recorded into the VAO.
    ///
    /// `data` holds interleaved vertices of `floats_per_vertex` floats each; the number of
    /// vertices drawn afterwards is `data.len() / floats_per_vertex`. The buffer object is created
    /// on the first upload and reused after that.
    pub fn gen_vbo(&mut self, data: &[f32], floats_per_vertex: usize) -> Result<(), RenderError> {
        let vao = self.vao.ok_or(RenderError::MissingVao)?;
        let vertex_count = vertex::vertex_count(data.len(), floats_per_vertex)?;

        self.gl.bind_vertex_array(vao);

        let vbo = match self.vbo {
            Some(vbo) => vbo,
            None => {
                let vbo = self.gl.gen_buffer();
                if vbo == 0 {
                    self.gl.bind_vertex_array(0);
                    return Err(RenderError::ObjectCreation("vertex buffer"));
                }
                self.vbo = Some(vbo);
                vbo
            }
        };

        self.gl.bind_buffer(gl::ARRAY_BUFFER, vbo);
        self.gl.buffer_data(gl::ARRAY_BUFFER, data, gl::STATIC_DRAW);
        self.gl.bind_vertex_array(0);

        self.vertex_count = vertex_count;

        log::debug!("uploaded {} vertices to vbo {}", vertex_count, vbo);
        Ok(())
    }

    /// Describes one attribute of the bound vertex buffer to the VAO and enables it.
    pub fn link_attrib(&mut self, attribute: VertexAttribute) -> Result<(), RenderError> {
        let vao = self.vao.ok_or(RenderError::MissingVao)?;
        attribute.validate()?;

        self.gl.bind_vertex_array(vao);
        self.gl.vertex_attrib_pointer(
            attribute.index,
            attribute.components,
            attribute.kind.gl_enum(),
            false,
            attribute.stride,
            attribute.offset,
        );
        self.gl.enable_vertex_attrib_array(attribute.index);

        log::trace!("linked attribute {} on vao {}", attribute.index, vao);
        Ok(())
    }

    pub fn unbind_vao(&self) {
        self.gl.bind_vertex_array(0);
    }

    pub fn unbind_vbo(&self) {
        self.gl.bind_buffer(gl::ARRAY_BUFFER, 0);
    }

    pub fn unbind_all(&self) {
        self.unbind_vao();
        self.unbind_vbo();
    }

    /// Makes the program current and uploads `camera_matrix` (column-major, as produced by
    /// `glam::Mat4::to_cols_array`) to its `camera_matrix` uniform.
    ///
    /// A program without that uniform still gets used; the upload is skipped.
    pub fn use_program(&mut self, camera_matrix: &[f32; 16]) -> Result<(), RenderError> {
        let program = self.program.ok_or(RenderError::MissingProgram)?;
        self.gl.use_program(program);

        let location = match self.camera_location {
            Some(location) => location,
            None => {
                let location = self.gl.uniform_location(program, CAMERA_UNIFORM_NAME);
                if location < 0 {
                    log::warn!("program {} has no active `{}` uniform", program, CAMERA_UNIFORM);
                }
                self.camera_location = Some(location);
                location
            }
        };

        if location >= 0 {
            self.gl.uniform_matrix4(location, camera_matrix);
        }

        Ok(())
    }

    pub fn bind_vao(&self) -> Result<(), RenderError> {
        let vao = self.vao.ok_or(RenderError::MissingVao)?;
        self.gl.bind_vertex_array(vao);
        Ok(())
    }

    /// Issues a single `GL_TRIANGLES` draw over every uploaded vertex.
    pub fn draw(&self) {
        if self.vertex_count == 0 {
            return;
        }

        // `vertex::vertex_count` caps uploads at i32::MAX vertices.
        self.gl.draw_arrays(gl::TRIANGLES, 0, self.vertex_count as i32);
    }

    /// Frees the VAO, VBO and program. Calling this again does nothing.
    pub fn delete(&mut self) {
        if let Some(vao) = self.vao.take() {
            self.gl.delete_vertex_array(vao);
        }
        if let Some(vbo) = self.vbo.take() {
            self.gl.delete_buffer(vbo);
        }
        if let Some(program) = self.program.take() {
            self.gl.delete_program(program);
        }

        self.vertex_count = 0;
        self.camera_location = None;
    }
}

impl<G: GlApi> Drop for Renderer<G> {
    fn drop(&mut self) {
        self.delete();
    }
}
