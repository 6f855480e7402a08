//! Shared error type across osinfo crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid input / malformed config.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Host telemetry could not be read.
    ProbeFailed,
    /// Unknown resource.
    NotFound,
    /// Internal server error.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::ProbeFailed => "PROBE_FAILED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, OsInfoError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum OsInfoError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("{0}")]
    Probe(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl OsInfoError {
    /// Map internal error to a stable client-facing code.
    pub fn code(&self) -> ErrorCode {
        match self {
            OsInfoError::BadRequest(_) => ErrorCode::BadRequest,
            OsInfoError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            OsInfoError::Probe(_) => ErrorCode::ProbeFailed,
            OsInfoError::NotFound(_) => ErrorCode::NotFound,
            OsInfoError::Internal(_) => ErrorCode::Internal,
        }
    }
}
