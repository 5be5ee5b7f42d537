//! Error types for stack I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for stack I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while reading or writing image stacks.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// The file does not start with a little-endian TIFF header.
    #[error("invalid TIFF header: {message}")]
    InvalidHeader {
        /// Description of what was invalid.
        message: String,
    },

    /// The file uses a TIFF feature outside the subset this crate writes.
    #[error("unsupported TIFF feature: {message}")]
    Unsupported {
        /// The unsupported feature.
        message: String,
    },

    /// Invalid or truncated file content.
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// A page's byte length does not match the stack dimensions.
    #[error("page size mismatch: expected {expected} bytes, got {got}")]
    PageSize {
        /// Expected byte count (width * height).
        expected: usize,
        /// Actual byte count supplied.
        got: usize,
    },

    /// The stack is too large to address with 32-bit TIFF offsets.
    #[error("stack too large for 32-bit TIFF offsets ({bytes} bytes)")]
    TooLarge {
        /// Total encoded size in bytes.
        bytes: u64,
    },

    /// Grid decoding error.
    #[error(transparent)]
    Grid(#[from] cellvox_grid::GridError),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Create an `InvalidHeader` error with the given message.
    #[must_use]
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create an `Unsupported` error with the given message.
    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}
