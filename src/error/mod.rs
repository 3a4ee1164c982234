//! Error types for valkit
//!
//! Almost every helper in this crate swallows its failures and hands back
//! the caller's default value. The error type exists for the few operations
//! that propagate (directory creation) and for the internal fallible steps
//! the swallowing wrappers are built on.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for valkit
#[derive(Error, Debug)]
pub enum ValkitError {
    /// Filesystem operation failed on a specific path
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The path the operation was applied to
        path: PathBuf,
        /// The underlying operating system error
        #[source]
        source: std::io::Error,
    },

    /// Input was not valid Base64 after URL-safe translation and padding
    #[error("Invalid base64: {0}")]
    Base64(String),

    /// Decoded bytes are not valid UTF-8
    #[error("UTF-8 error: {0}")]
    Utf8(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid argument or other error with a message
    #[error("{0}")]
    Custom(String),
}

/// Type alias for Results using `ValkitError`
pub type Result<T> = std::result::Result<T, ValkitError>;

impl ValkitError {
    /// Create a custom error with a message
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        Self::Custom(msg.into())
    }

    /// Create an I/O error bound to the path it occurred on
    pub fn io<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Check if this error is a filesystem error
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this error came from decoding input text
    pub const fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::Base64(_) | Self::Utf8(_) | Self::Serialization(_)
        )
    }
}

impl From<base64::DecodeError> for ValkitError {
    fn from(error: base64::DecodeError) -> Self {
        Self::Base64(error.to_string())
    }
}

impl From<serde_json::Error> for ValkitError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<std::string::FromUtf8Error> for ValkitError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        Self::Utf8(error.to_string())
    }
}
