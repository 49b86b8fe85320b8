//! Error types shared by the OSC parser, SGR decoder and key encoder
//!
//! Malformed *protocol* data never surfaces here: the decoders are total and
//! fall back to `Command::Invalid` or `Attribute::Unknown`. Errors are only
//! returned for resource exhaustion and malformed caller arguments.

use thiserror::Error;

/// Engine error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A fallible reservation failed while growing an internal buffer
    #[error("Out of memory")]
    OutOfMemory,

    /// The caller-provided output buffer cannot hold the encoded sequence
    #[error("Output buffer too small: {required} bytes required")]
    BufferTooSmall {
        /// Exact number of bytes a successful call would write
        required: usize,
    },

    /// A caller-supplied argument was malformed
    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric result codes, stable across language bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ResultCode {
    Success = 0,
    OutOfMemory = -1,
    InvalidValue = -2,
}

impl Error {
    /// Map this error to its numeric result code.
    ///
    /// A too-small output buffer is reported as an allocation failure so
    /// callers can grow and retry.
    pub fn code(&self) -> ResultCode {
        match self {
            Error::OutOfMemory | Error::BufferTooSmall { .. } => ResultCode::OutOfMemory,
            Error::InvalidValue(_) => ResultCode::InvalidValue,
        }
    }

    /// Bytes required by the failed call, if the failure carried a size
    pub fn required_len(&self) -> Option<usize> {
        match self {
            Error::BufferTooSmall { required } => Some(*required),
            _ => None,
        }
    }
}

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Self {
        Error::OutOfMemory
    }
}

impl<T> From<&Result<T>> for ResultCode {
    fn from(result: &Result<T>) -> Self {
        match result {
            Ok(_) => ResultCode::Success,
            Err(e) => e.code(),
        }
    }
}
