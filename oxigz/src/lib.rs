//! # OxiGz
//!
//! Small gzip/zlib toolkit over the `flate2` DEFLATE codec.
//!
//! This crate does no DEFLATE work itself; it manages buffers, translates
//! codec outcomes into [`Result`]s and [`ZlibStatus`] codes, and sniffs
//! magic bytes.
//!
//! - [`gzip`]: compress to / decompress from gzip members
//! - [`zlib`]: raw zlib decoding into a caller-sized buffer
//! - [`detect`]: `is_gzip` / `is_zlib` predicates and [`Format`]
//!
//! ## Example
//!
//! ```rust
//! use oxigz::{CompressionLevel, Format, compress_gzip, decompress_auto};
//!
//! let packed = compress_gzip(b"Hello, World! Hello, World!", CompressionLevel::FAST).unwrap();
//! let (format, data) = decompress_auto(&packed).unwrap();
//! assert_eq!(format, Format::Gzip);
//! assert_eq!(data, b"Hello, World! Hello, World!");
//! ```
//!
//! ## Compression Levels
//!
//! - Level 0: No compression (stored blocks)
//! - Level 1: Fastest, the default for the gzip helpers
//! - Level 6: Balanced (`-1` maps here)
//! - Level 9: Best compression (slower)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod detect;
pub mod gzip;
pub mod zlib;

// Re-exports
pub use detect::{Format, is_gzip, is_zlib};
pub use gzip::{
    GZIP_MAGIC, GZIP_OVERHEAD, GzipInfo, compress_gzip, compress_gzip_default,
    compress_gzip_named, compress_gzip_str, compress_gzip_with_level, decompress_gzip,
    decompress_gzip_members, decompress_gzip_with_info, gzip_info,
};
pub use oxigz_core::{CompressionLevel, OxiGzError, Result, ZlibStatus};
pub use zlib::{compress_zlib, decompress_zlib, zlib_uncompress, zlib_uncompress_exact};

use tracing::debug;

/// Decompress gzip or zlib input, picking the path from the magic bytes.
pub fn decompress_auto(input: &[u8]) -> Result<(Format, Vec<u8>)> {
    let format = Format::sniff(input);
    debug!(%format, input = input.len(), "dispatching on magic");

    let output = match format {
        Format::Gzip => decompress_gzip(input)?,
        Format::Zlib => decompress_zlib(input)?,
        Format::Unknown => return Err(OxiGzError::unknown_format(input)),
    };
    Ok((format, output))
}

/// Compress `input` into the given format.
pub fn compress(input: &[u8], format: Format, level: CompressionLevel) -> Result<Vec<u8>> {
    match format {
        Format::Gzip => compress_gzip(input, level),
        Format::Zlib => compress_zlib(input, level),
        Format::Unknown => Err(OxiGzError::unknown_format(&[])),
    }
}
