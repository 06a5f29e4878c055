use std::panic::Location;

use thiserror::Error;

use crate::gl_api::GlApi;
use crate::shader::ShaderStage;

/// An entry from the GL error queue (`glGetError`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum GlError {
    #[error("INVALID_ENUM")]
    InvalidEnum,
    #[error("INVALID_VALUE")]
    InvalidValue,
    #[error("INVALID_OPERATION")]
    InvalidOperation,
    #[error("STACK_OVERFLOW")]
    StackOverflow,
    #[error("STACK_UNDERFLOW")]
    StackUnderflow,
    #[error("OUT_OF_MEMORY")]
    OutOfMemory,
    #[error("INVALID_FRAMEBUFFER_OPERATION")]
    InvalidFramebufferOperation,
    #[error("UNKNOWN({0:#06x})")]
    Unknown(u32),
}

impl GlError {
    /// Maps a raw `glGetError` code. `GL_NO_ERROR` isn't an error, so it maps to `None`.
    pub fn from_code(code: u32) -> Option<Self> {
        let error = match code {
            gl::NO_ERROR => return None,
            gl::INVALID_ENUM => GlError::InvalidEnum,
            gl::INVALID_VALUE => GlError::InvalidValue,
            gl::INVALID_OPERATION => GlError::InvalidOperation,
            gl::STACK_OVERFLOW => GlError::StackOverflow,
            gl::STACK_UNDERFLOW => GlError::StackUnderflow,
            gl::OUT_OF_MEMORY => GlError::OutOfMemory,
            gl::INVALID_FRAMEBUFFER_OPERATION => GlError::InvalidFramebufferOperation,
            other => GlError::Unknown(other),
        };

        Some(error)
    }

    pub fn code(self) -> u32 {
        match self {
            GlError::InvalidEnum => gl::INVALID_ENUM,
            GlError::InvalidValue => gl::INVALID_VALUE,
            GlError::InvalidOperation => gl::INVALID_OPERATION,
            GlError::StackOverflow => gl::STACK_OVERFLOW,
            GlError::StackUnderflow => gl::STACK_UNDERFLOW,
            GlError::OutOfMemory => gl::OUT_OF_MEMORY,
            GlError::InvalidFramebufferOperation => gl::INVALID_FRAMEBUFFER_OPERATION,
            GlError::Unknown(code) => code,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("OpenGL function {0} could not be loaded")]
    NotLoaded(&'static str),

    #[error("shader source contains an interior NUL byte")]
    InvalidSource,

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {log}")]
    ProgramLink { log: String },

    #[error("OpenGL returned a null handle when creating a {0}")]
    ObjectCreation(&'static str),

    #[error("no vertex array object has been generated")]
    MissingVao,

    #[error("no shader program has been compiled")]
    MissingProgram,

    #[error("{floats} floats can't be split into vertices of {floats_per_vertex} floats")]
    InvalidVertexLayout { floats: usize, floats_per_vertex: usize },

    #[error("vertex attributes have 1 to 4 components, got {components}")]
    InvalidAttribute { components: i32 },

    #[error("OpenGL error: {0}")]
    Gl(#[from] GlError),
}

/// Drains the GL error queue, logging every entry against the caller's source location.
///
/// Returns the last error that was drained, or `None` if the queue was already empty.
#[track_caller]
pub fn poll_errors<G: GlApi + ?Sized>(gl: &G) -> Option<GlError> {
    let mut last = None;

    for (error, line) in drain_errors(gl) {
        log::error!("{}", line);
        last = Some(error);
    }

    last
}

/// Empties the error queue, pairing each error with the line logged for it.
#[track_caller]
fn drain_errors<G: GlApi + ?Sized>(gl: &G) -> Vec<(GlError, String)> {
    let caller = Location::caller();
    let mut drained = Vec::new();

    while let Some(error) = GlError::from_code(gl.get_error()) {
        drained.push((error, report_line(error, caller)));
    }

    drained
}

fn report_line(error: GlError, caller: &Location<'_>) -> String {
    format!("{} | {} ({})", error, caller.file(), caller.line())
}

/// Like [`poll_errors`], but for use with `?`.
#[track_caller]
pub fn check_errors<G: GlApi + ?Sized>(gl: &G) -> Result<(), RenderError> {
    match poll_errors(gl) {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fake::RecordingGl;

    #[test]
    fn codes_map_to_names() {
        assert_eq!(GlError::from_code(gl::INVALID_ENUM).unwrap().to_string(), "INVALID_ENUM");
        assert_eq!(
            GlError::from_code(gl::INVALID_FRAMEBUFFER_OPERATION).unwrap().to_string(),
            "INVALID_FRAMEBUFFER_OPERATION"
        );
        assert_eq!(GlError::Unknown(0x1234).to_string(), "UNKNOWN(0x1234)");
        assert_eq!(GlError::from_code(gl::NO_ERROR), None);
    }

    #[test]
    fn code_is_the_inverse_of_from_code() {
        for &code in [gl::INVALID_VALUE, gl::OUT_OF_MEMORY, gl::STACK_UNDERFLOW, 0x9999].iter() {
            assert_eq!(GlError::from_code(code).unwrap().code(), code);
        }
    }

    #[test]
    fn poll_with_empty_queue_reports_no_error() {
        let gl = RecordingGl::new();

        assert_eq!(poll_errors(&gl), None);
        assert!(check_errors(&gl).is_ok());
    }

    #[test]
    fn poll_drains_queue_and_returns_last_error() {
        let gl = RecordingGl::new();
        gl.push_error(gl::INVALID_ENUM);
        gl.push_error(gl::OUT_OF_MEMORY);

        assert_eq!(poll_errors(&gl), Some(GlError::OutOfMemory));
        assert_eq!(poll_errors(&gl), None);
    }

    #[test]
    fn report_line_names_error_file_and_line() {
        let here = Location::caller();

        assert_eq!(
            report_line(GlError::InvalidValue, here),
            format!("INVALID_VALUE | {} ({})", file!(), here.line())
        );
    }

    #[test]
    fn errors_are_reported_against_the_call_site() {
        let gl = RecordingGl::new();
        gl.push_error(gl::INVALID_ENUM);
        gl.push_error(gl::INVALID_VALUE);

        let (drained, line) = (drain_errors(&gl), line!());

        let site = format!("{} ({})", file!(), line);
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].0, GlError::InvalidEnum);
        assert_eq!(drained[0].1, format!("INVALID_ENUM | {}", site));
        assert_eq!(drained[1].1, format!("INVALID_VALUE | {}", site));
    }

    #[track_caller]
    fn checked_upload(gl: &RecordingGl) -> Vec<(GlError, String)> {
        drain_errors(gl)
    }

    #[test]
    fn tracked_helpers_report_their_own_caller() {
        let gl = RecordingGl::new();
        gl.push_error(gl::OUT_OF_MEMORY);

        let (drained, line) = (checked_upload(&gl), line!());

        assert_eq!(
            drained,
            vec![(GlError::OutOfMemory, format!("OUT_OF_MEMORY | {} ({})", file!(), line))]
        );
    }

    #[test]
    fn check_errors_wraps_the_gl_error() {
        let gl = RecordingGl::new();
        gl.push_error(gl::INVALID_OPERATION);

        match check_errors(&gl) {
            Err(RenderError::Gl(GlError::InvalidOperation)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
