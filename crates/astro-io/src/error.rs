//! Error types for I/O operations.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported or undetected format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error reported by the format library.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error reported by the format library.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Unsupported sample type or bit depth.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),

    /// Decoded data does not form a valid image.
    #[error("invalid image: {0}")]
    Image(#[from] astro_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
