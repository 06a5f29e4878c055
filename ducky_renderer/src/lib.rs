//! A small set of wrappers around the OpenGL API for drawing one mesh per frame.
//!
//! The renderer owns exactly one shader program, one vertex array object and one vertex buffer.
//! There's no batching, no materials and no scene: an outside render loop calls the operations on
//! [`Renderer`] in order (compile, upload, link attributes, then use/bind/draw every frame) and
//! flips the global render state with the functions in [`state`].
//!
//! All GL calls go through the [`GlApi`] trait. [`NativeGl`] forwards to the real function
//! pointers loaded by the `gl` crate, which keeps the unsafe surface in one file and lets the rest
//! of the crate be checked without a live context.

pub mod camera;
pub mod error;
pub mod gl_api;
pub mod renderer;
pub mod shader;
pub mod state;
pub mod vertex;

#[cfg(test)]
pub(crate) mod fake;

pub use camera::Camera;
pub use error::{check_errors, poll_errors, GlError, RenderError};
pub use gl_api::{GlApi, NativeGl};
pub use renderer::Renderer;
pub use shader::ShaderStage;
pub use vertex::{AttribType, VertexAttribute};

use std::ffi::CStr;

/// Name of the uniform the camera transform is uploaded to.
pub const CAMERA_UNIFORM: &str = "camera_matrix";

/// [`CAMERA_UNIFORM`] as the NUL-terminated string GL looks it up by.
// SAFETY: the literal ends in its only NUL byte.
pub const CAMERA_UNIFORM_NAME: &CStr =
    unsafe { CStr::from_bytes_with_nul_unchecked(b"camera_matrix\0") };
