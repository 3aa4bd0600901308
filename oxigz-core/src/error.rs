//! Error types for OxiGz operations.
//!
//! Every fallible operation in the workspace reports through [`OxiGzError`].
//! Errors coming out of the codec as [`io::Error`] are sorted into the
//! variants below by [`OxiGzError::from_codec`].

use crate::status::ZlibStatus;
use std::io;
use thiserror::Error;

/// The main error type for OxiGz operations.
#[derive(Debug, Error)]
pub enum OxiGzError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic number at the start of the stream.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Compression level outside the range the codec accepts.
    #[error("Invalid compression level: {level} (expected -1 or 0-9)")]
    InvalidLevel {
        /// The rejected level.
        level: i64,
    },

    /// Invalid header field.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// Corrupted or malformed compressed data.
    #[error("Corrupted data: {message}")]
    CorruptedData {
        /// Description of the corruption.
        message: String,
    },

    /// Compressed stream ended before its trailer.
    #[error("Unexpected end of stream: {message}")]
    UnexpectedEof {
        /// Description of what was missing.
        message: String,
    },

    /// Buffer too small for operation.
    #[error("Buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// Raw zlib decoding finished with a non-success status.
    #[error("zlib decoding failed: {status}")]
    Zlib {
        /// The status reported by the decoder.
        status: ZlibStatus,
    },

    /// Input is neither gzip nor zlib.
    #[error("Unknown format: magic {found:02x?}")]
    UnknownFormat {
        /// Leading bytes of the input.
        found: Vec<u8>,
    },
}

/// Result type alias for OxiGz operations.
pub type Result<T> = std::result::Result<T, OxiGzError>;

impl OxiGzError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an invalid level error.
    pub fn invalid_level(level: impl Into<i64>) -> Self {
        Self::InvalidLevel {
            level: level.into(),
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create a corrupted data error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::CorruptedData {
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(message: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            message: message.into(),
        }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(needed: usize, available: usize) -> Self {
        Self::BufferTooSmall { needed, available }
    }

    /// Create an unknown format error, keeping at most the first 8 bytes.
    pub fn unknown_format(found: &[u8]) -> Self {
        Self::UnknownFormat {
            found: found[..found.len().min(8)].to_vec(),
        }
    }

    /// Classify an error surfaced by the codec's reader/writer adapters.
    ///
    /// The codec reports truncation as `UnexpectedEof` and bad streams as
    /// `InvalidInput` or `InvalidData`.
    pub fn from_codec(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Self::unexpected_eof(err.to_string()),
            io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => {
                Self::corrupted(err.to_string())
            }
            _ => Self::Io(err),
        }
    }
}

impl From<ZlibStatus> for OxiGzError {
    fn from(status: ZlibStatus) -> Self {
        Self::Zlib { status }
    }
}
