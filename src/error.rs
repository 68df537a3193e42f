use std::fmt;

use thiserror::Error;

/// Top-level error type for the polygon animation.
#[derive(Debug, Error)]
pub enum Error {
    /// Something failed before the first frame. Always fatal.
    #[error("setup failed during {stage}: {reason}")]
    Setup { stage: Stage, reason: String },

    /// The surface reported an error while drawing. Always fatal.
    #[error("render error: {0}")]
    Render(GlErrorCode),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Startup stage named in setup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Window,
    Context,
    Upload,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Window => "window creation",
            Stage::Context => "context activation",
            Stage::Upload => "initial mesh upload",
        })
    }
}

/// Problems with command line flags and their values.
///
/// All of these except [`ConfigError::EmptyRange`] are reported as warnings
/// and the affected setting keeps its default.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("ignoring unknown flag \"{0}\"")]
    UnknownFlag(String),

    #[error("expected value after \"{0}\"")]
    MissingValue(String),

    #[error("expected \"{value}\" to be an integer for \"{flag}\"")]
    InvalidInteger { flag: String, value: String },

    #[error("expected \"{value}\" to be a number for \"{flag}\"")]
    InvalidNumber { flag: String, value: String },

    #[error("side range {start}..{end} is empty (--pmax must exceed --pstart)")]
    EmptyRange { start: u32, end: u32 },
}

/// OpenGL error code as returned by `glGetError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlErrorCode(pub u32);

impl GlErrorCode {
    pub const NO_ERROR: GlErrorCode = GlErrorCode(0);
    pub const INVALID_ENUM: GlErrorCode = GlErrorCode(0x0500);
    pub const INVALID_VALUE: GlErrorCode = GlErrorCode(0x0501);
    pub const INVALID_OPERATION: GlErrorCode = GlErrorCode(0x0502);
    pub const OUT_OF_MEMORY: GlErrorCode = GlErrorCode(0x0505);
    pub const INVALID_FRAMEBUFFER_OPERATION: GlErrorCode = GlErrorCode(0x0506);

    pub fn is_error(self) -> bool {
        self != GlErrorCode::NO_ERROR
    }

    pub fn name(self) -> &'static str {
        match self {
            GlErrorCode::NO_ERROR => "GL_NO_ERROR",
            GlErrorCode::INVALID_ENUM => "GL_INVALID_ENUM",
            GlErrorCode::INVALID_VALUE => "GL_INVALID_VALUE",
            GlErrorCode::INVALID_OPERATION => "GL_INVALID_OPERATION",
            GlErrorCode::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
            GlErrorCode::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
            _ => "unknown error",
        }
    }
}

impl fmt::Display for GlErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:04X})", self.name(), self.0)
    }
}

/// Convenience type alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
