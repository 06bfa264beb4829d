use std::fmt;
use std::os::raw::c_int;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used by every facade operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Native GLFW error codes as reported through the error callback or `glfwGetError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    NoCurrentContext,
    InvalidEnum,
    InvalidValue,
    OutOfMemory,
    ApiUnavailable,
    VersionUnavailable,
    PlatformError,
    FormatUnavailable,
    NoWindowContext,
    Unknown(c_int),
}

impl ErrorCode {
    pub fn from_raw(code: c_int) -> Self {
        match code {
            0x0001_0001 => ErrorCode::NotInitialized,
            0x0001_0002 => ErrorCode::NoCurrentContext,
            0x0001_0003 => ErrorCode::InvalidEnum,
            0x0001_0004 => ErrorCode::InvalidValue,
            0x0001_0005 => ErrorCode::OutOfMemory,
            0x0001_0006 => ErrorCode::ApiUnavailable,
            0x0001_0007 => ErrorCode::VersionUnavailable,
            0x0001_0008 => ErrorCode::PlatformError,
            0x0001_0009 => ErrorCode::FormatUnavailable,
            0x0001_000A => ErrorCode::NoWindowContext,
            other => ErrorCode::Unknown(other),
        }
    }

    pub fn to_raw(self) -> c_int {
        match self {
            ErrorCode::NotInitialized => 0x0001_0001,
            ErrorCode::NoCurrentContext => 0x0001_0002,
            ErrorCode::InvalidEnum => 0x0001_0003,
            ErrorCode::InvalidValue => 0x0001_0004,
            ErrorCode::OutOfMemory => 0x0001_0005,
            ErrorCode::ApiUnavailable => 0x0001_0006,
            ErrorCode::VersionUnavailable => 0x0001_0007,
            ErrorCode::PlatformError => 0x0001_0008,
            ErrorCode::FormatUnavailable => 0x0001_0009,
            ErrorCode::NoWindowContext => 0x0001_000A,
            ErrorCode::Unknown(code) => code,
        }
    }

    /// Generic message used when the native side supplied no description.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::NotInitialized => "GLFW has not been initialized",
            ErrorCode::NoCurrentContext => "no context is current for this thread",
            ErrorCode::InvalidEnum => "one of the arguments was an invalid enum value",
            ErrorCode::InvalidValue => "one of the arguments was an invalid value",
            ErrorCode::OutOfMemory => "a memory allocation failed",
            ErrorCode::ApiUnavailable => "the requested API is unavailable on this system",
            ErrorCode::VersionUnavailable => "the requested API version is unavailable",
            ErrorCode::PlatformError => "a platform-specific error occurred",
            ErrorCode::FormatUnavailable => "the requested format is unavailable",
            ErrorCode::NoWindowContext => "the window does not have a context",
            ErrorCode::Unknown(_) => "an unknown error occurred",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Unknown(code) => write!(f, "unknown error 0x{:08X}", code),
            other => write!(f, "{:?}", other),
        }
    }
}

/// An error reported by native GLFW, with its description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {description}")]
pub struct NativeError {
    pub code: ErrorCode,
    pub description: String,
}

impl NativeError {
    pub fn new(code: ErrorCode, description: impl Into<String>) -> Self {
        let description = description.into();
        let description = if description.is_empty() {
            code.message().to_string()
        } else {
            description
        };
        Self { code, description }
    }
}

/// Which kind of handle an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Window,
    Monitor,
    Cursor,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HandleKind::Window => "window",
            HandleKind::Monitor => "monitor",
            HandleKind::Cursor => "cursor",
        })
    }
}

/// Failure to open the native library or resolve its symbol table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("GLFW library not found (tried: {})", .tried.join(", "))]
    LibraryNotFound { tried: Vec<String> },

    #[error("failed to open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("'{library}' is missing required symbols: {}", .symbols.join(", "))]
    MissingSymbols {
        library: String,
        symbols: Vec<&'static str>,
    },
}

/// Errors returned by the binding facade.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("GLFW is not initialized")]
    NotInitialized,

    #[error("glfwInit failed")]
    InitFailed,

    #[error("null {0} handle")]
    NullHandle(HandleKind),

    #[error("{0} handle is not owned by this GLFW instance or was already destroyed")]
    UnknownHandle(HandleKind),

    #[error("text contains an interior NUL byte")]
    InteriorNul,

    #[error("text must be ASCII: {0:?}")]
    NonAscii(String),

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("invalid gamma ramp: {0}")]
    InvalidGammaRamp(String),

    #[error("native call returned no object")]
    CreationFailed,

    #[error("GLFW error: {0}")]
    Native(#[from] NativeError),
}

impl Error {
    /// Native error code, if this error came from GLFW itself.
    pub fn native_code(&self) -> Option<ErrorCode> {
        match self {
            Error::Native(native) => Some(native.code),
            _ => None,
        }
    }
}
