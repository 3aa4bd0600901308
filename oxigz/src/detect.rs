//! Format sniffing.
//!
//! Both predicates only look at the leading bytes and never allocate, so they
//! are cheap enough to call before every decode to pick the right path.

use crate::gzip::GZIP_MAGIC;
use oxigz_core::error::Result;
use std::io::Read;

/// Compressed stream formats handled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// GZIP member (RFC 1952).
    Gzip,
    /// zlib stream (RFC 1950).
    Zlib,
    /// Anything else.
    Unknown,
}

/// Return true if `bytes` starts with a gzip header using the DEFLATE method
/// (ID1=0x1F, ID2=0x8B, CM=8).
///
/// Buffers shorter than three bytes are never gzip.
#[inline]
pub fn is_gzip(bytes: &[u8]) -> bool {
    matches!(bytes, [0x1F, 0x8B, 0x08, ..])
}

/// Return true if `bytes` starts with a plausible zlib header.
///
/// Checks CM=8, a window size of at most 32K and the FCHECK bits, i.e.
/// `(CMF * 256 + FLG) % 31 == 0`.
#[inline]
pub fn is_zlib(bytes: &[u8]) -> bool {
    match bytes {
        [cmf, flg, ..] => {
            cmf & 0x0F == 8
                && cmf >> 4 <= 7
                && ((u16::from(*cmf) << 8) | u16::from(*flg)) % 31 == 0
        }
        _ => false,
    }
}

impl Format {
    /// Number of leading bytes needed to tell the formats apart.
    pub const MAGIC_LEN: usize = GZIP_MAGIC.len();

    /// Detect format from leading bytes.
    pub fn sniff(magic: &[u8]) -> Self {
        if is_gzip(magic) {
            Self::Gzip
        } else if is_zlib(magic) {
            Self::Zlib
        } else {
            Self::Unknown
        }
    }

    /// Detect format from a reader, returning the bytes consumed.
    pub fn detect<R: Read>(reader: &mut R) -> Result<(Self, Vec<u8>)> {
        let mut magic = Vec::with_capacity(Self::MAGIC_LEN);
        reader
            .by_ref()
            .take(Self::MAGIC_LEN as u64)
            .read_to_end(&mut magic)?;

        Ok((Self::sniff(&magic), magic))
    }

    /// Get the typical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Gzip => "gz",
            Self::Zlib => "zz",
            Self::Unknown => "",
        }
    }

    /// Get the MIME type.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Gzip => "application/gzip",
            Self::Zlib => "application/zlib",
            Self::Unknown => "application/octet-stream",
        }
    }

    /// Guess the format from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "gz" | "gzip" | "tgz" => Self::Gzip,
            "zz" | "zlib" => Self::Zlib,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gzip => write!(f, "GZIP"),
            Self::Zlib => write!(f, "zlib"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}
