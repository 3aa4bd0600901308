//! Status codes of the raw zlib decoding path.
//!
//! The raw path hands its outcome back to the caller instead of failing, so
//! the status keeps zlib's integer codes available through
//! [`ZlibStatus::code`].

/// Outcome of decoding a raw zlib stream into a fixed-size buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZlibStatus {
    /// The whole stream was decoded and its checksum verified.
    Ok,
    /// The destination filled up before the end of the stream.
    BufError,
    /// The input is not a valid zlib stream (bad header, corrupt data,
    /// checksum mismatch, truncation or a required preset dictionary).
    DataError,
}

impl ZlibStatus {
    /// zlib's `Z_OK`.
    pub const Z_OK: i32 = 0;
    /// zlib's `Z_DATA_ERROR`.
    pub const Z_DATA_ERROR: i32 = -3;
    /// zlib's `Z_BUF_ERROR`.
    pub const Z_BUF_ERROR: i32 = -5;

    /// The zlib integer code for this status.
    pub fn code(self) -> i32 {
        match self {
            Self::Ok => Self::Z_OK,
            Self::BufError => Self::Z_BUF_ERROR,
            Self::DataError => Self::Z_DATA_ERROR,
        }
    }

    /// Check if decoding succeeded.
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl std::fmt::Display for ZlibStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::BufError => write!(f, "destination buffer too small"),
            Self::DataError => write!(f, "invalid or corrupt zlib data"),
        }
    }
}
