use std::mem::size_of;

use crate::error::RenderError;

/// Component type of a vertex attribute, as passed to `glVertexAttribPointer`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AttribType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    HalfFloat,
    Float,
    Double,
}

impl AttribType {
    pub fn gl_enum(self) -> u32 {
        match self {
            AttribType::Byte => gl::BYTE,
            AttribType::UnsignedByte => gl::UNSIGNED_BYTE,
            AttribType::Short => gl::SHORT,
            AttribType::UnsignedShort => gl::UNSIGNED_SHORT,
            AttribType::Int => gl::INT,
            AttribType::UnsignedInt => gl::UNSIGNED_INT,
            AttribType::HalfFloat => gl::HALF_FLOAT,
            AttribType::Float => gl::FLOAT,
            AttribType::Double => gl::DOUBLE,
        }
    }
}

/// An object that abstracts over the arguments of
/// [glVertexAttribPointer](http://docs.gl/gl3/glVertexAttribPointer), which tells OpenGL how to
/// read one attribute out of the bound vertex buffer.
///
/// `stride` and `offset` are byte counts, exactly as GL takes them.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    pub index: u32,
    pub components: i32,
    pub kind: AttribType,
    pub stride: i32,
    pub offset: usize,
}

impl VertexAttribute {
    pub fn new(index: u32, components: i32, kind: AttribType, stride: i32, offset: usize) -> Self {
        Self {
            index,
            components,
            kind,
            stride,
            offset,
        }
    }

    /// Describes a float attribute inside interleaved float vertices, with the stride and offset
    /// counted in floats rather than bytes.
    ///
    /// For `x y z r g b` vertices the colour is `VertexAttribute::floats(1, 3, 6, 3)`.
    pub fn floats(index: u32, components: i32, stride: usize, offset: usize) -> Self {
        Self::new(
            index,
            components,
            AttribType::Float,
            (stride * size_of::<f32>()) as i32,
            offset * size_of::<f32>(),
        )
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if (1..=4).contains(&self.components) {
            Ok(())
        } else {
            Err(RenderError::InvalidAttribute {
                components: self.components,
            })
        }
    }
}

/// Number of whole vertices in `floats` values laid out `floats_per_vertex` at a time.
///
/// The count has to fit the `GLsizei` that `glDrawArrays` takes.
pub fn vertex_count(floats: usize, floats_per_vertex: usize) -> Result<usize, RenderError> {
    if floats_per_vertex == 0
        || floats % floats_per_vertex != 0
        || floats / floats_per_vertex > i32::MAX as usize
    {
        return Err(RenderError::InvalidVertexLayout {
            floats,
            floats_per_vertex,
        });
    }

    Ok(floats / floats_per_vertex)
}
