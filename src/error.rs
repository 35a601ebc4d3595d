//! Error types for notedown library.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for notedown operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or rendering notes.
///
/// Scanning itself never fails: any text is a valid note. Errors only come
/// from getting text in (I/O, bytes that are not text) or pushing output out.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not text at all (invalid UTF-8, null pointer).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error while writing rendered output.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Syntax highlighting failed for a code line.
    #[error("Highlighting error: {0}")]
    Highlight(String),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Error::Render(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::InvalidInput(format!("not valid UTF-8 ({})", err))
    }
}
