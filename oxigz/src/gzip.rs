//! GZIP buffer helpers (RFC 1952).
//!
//! Each call builds its own encoder or decoder, compresses or inflates a
//! buffer held entirely in memory and drops the codec state before
//! returning. [`decompress_gzip`] reads a single member;
//! [`decompress_gzip_members`] reads every member of a concatenated file, the
//! way `cat a.gz b.gz` output is meant to be read.
//!
//! # Format
//!
//! ```text
//! +---+---+---+---+---+---+---+---+---+---+========//========+---+---+---+---+---+---+---+---+
//! |ID1|ID2|CM |FLG|     MTIME     |XFL|OS | (optional) DEFLATE |     CRC32     |     ISIZE     |
//! +---+---+---+---+---+---+---+---+---+---+========//========+---+---+---+---+---+---+---+---+
//! ```

use crate::detect::is_gzip;
use flate2::Compression;
use flate2::GzBuilder;
use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;
use oxigz_core::error::{OxiGzError, Result};
use oxigz_core::level::CompressionLevel;
use std::io::{Read, Write};
use tracing::debug;

/// GZIP magic bytes followed by the DEFLATE method byte.
pub const GZIP_MAGIC: [u8; 3] = [0x1F, 0x8B, 0x08];

/// Fixed size of the member header without optional fields.
pub const GZIP_HEADER_SIZE: usize = 10;

/// Size of the CRC32 + ISIZE trailer.
pub const GZIP_TRAILER_SIZE: usize = 8;

/// Fixed framing overhead of a gzip member.
pub const GZIP_OVERHEAD: usize = GZIP_HEADER_SIZE + GZIP_TRAILER_SIZE;

/// Upper bound on the output pre-allocation taken from the ISIZE trailer.
const MAX_PREALLOC: usize = 64 * 1024 * 1024;

/// Header fields of a decoded gzip member.
///
/// For multi-member input the header fields come from the first member and
/// the sizes cover all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GzipInfo {
    /// Original filename (if FNAME was set).
    pub filename: Option<String>,
    /// Comment (if FCOMMENT was set).
    pub comment: Option<String>,
    /// Modification time (Unix timestamp, 0 if unknown).
    pub mtime: u32,
    /// Operating system byte.
    pub os: u8,
    /// Length of the FEXTRA field, 0 if absent.
    pub extra_len: usize,
    /// Size of the member in bytes.
    pub compressed_size: usize,
    /// Size of the decompressed payload in bytes.
    pub uncompressed_size: usize,
    /// Number of members decoded.
    pub members: usize,
}

impl GzipInfo {
    /// Human readable name of the OS byte.
    pub fn os_name(&self) -> &'static str {
        match self.os {
            0 => "FAT",
            1 => "Amiga",
            2 => "VMS",
            3 => "Unix",
            4 => "VM/CMS",
            5 => "Atari TOS",
            6 => "HPFS",
            7 => "Macintosh",
            8 => "Z-System",
            9 => "CP/M",
            10 => "TOPS-20",
            11 => "NTFS",
            12 => "QDOS",
            13 => "Acorn RISCOS",
            _ => "unknown",
        }
    }
}

fn codec_level(level: CompressionLevel) -> Compression {
    Compression::new(u32::from(level.level()))
}

/// Compress `input` into a single gzip member.
///
/// Empty input yields a minimal member: header, an empty DEFLATE block and
/// the trailer.
///
/// # Example
///
/// ```
/// use oxigz::{CompressionLevel, compress_gzip, decompress_gzip, is_gzip};
///
/// let packed = compress_gzip(b"Hello, World!", CompressionLevel::FAST).unwrap();
/// assert!(is_gzip(&packed));
/// assert_eq!(decompress_gzip(&packed).unwrap(), b"Hello, World!");
/// ```
pub fn compress_gzip(input: &[u8], level: CompressionLevel) -> Result<Vec<u8>> {
    let sink = Vec::with_capacity(input.len() / 2 + GZIP_OVERHEAD);
    let encoder = GzEncoder::new(sink, codec_level(level));
    finish_member(encoder, input, level)
}

/// Compress a string into a single gzip member.
pub fn compress_gzip_str(input: &str, level: CompressionLevel) -> Result<Vec<u8>> {
    compress_gzip(input.as_bytes(), level)
}

/// Compress at [`CompressionLevel::FAST`].
pub fn compress_gzip_default(input: &[u8]) -> Result<Vec<u8>> {
    compress_gzip(input, CompressionLevel::default())
}

/// Compress with a raw integer level.
///
/// `-1` selects the balanced default; values outside `-1..=9` are rejected.
pub fn compress_gzip_with_level(input: &[u8], level: i32) -> Result<Vec<u8>> {
    let level = CompressionLevel::try_from(level)
        .inspect_err(|e| debug!(error = %e, "rejected compression level"))?;
    compress_gzip(input, level)
}

/// Compress with FNAME and MTIME recorded in the member header.
pub fn compress_gzip_named(
    input: &[u8],
    level: CompressionLevel,
    filename: Option<&str>,
    mtime: u32,
) -> Result<Vec<u8>> {
    let mut builder = GzBuilder::new().mtime(mtime);
    if let Some(name) = filename {
        // FNAME is NUL-terminated
        if name.contains('\0') {
            return Err(OxiGzError::invalid_header("filename contains a NUL byte"));
        }
        builder = builder.filename(name);
    }

    let sink = Vec::with_capacity(input.len() / 2 + GZIP_OVERHEAD);
    let encoder = builder.write(sink, codec_level(level));
    finish_member(encoder, input, level)
}

fn finish_member(
    mut encoder: GzEncoder<Vec<u8>>,
    input: &[u8],
    level: CompressionLevel,
) -> Result<Vec<u8>> {
    encoder.write_all(input)?;
    let output = encoder.finish()?;

    debug!(
        input = input.len(),
        output = output.len(),
        %level,
        "gzip member compressed"
    );
    Ok(output)
}

/// Decompress a single gzip member.
///
/// Fails if `input` does not start with the gzip magic (this covers empty and
/// short buffers), if the stream is truncated or corrupt, or if the CRC32 or
/// ISIZE trailer does not match the payload. Bytes after the member are
/// ignored.
pub fn decompress_gzip(input: &[u8]) -> Result<Vec<u8>> {
    let (_, output) = decompress_gzip_with_info(input)?;
    Ok(output)
}

/// Decompress a gzip member and report its header fields.
pub fn gzip_info(input: &[u8]) -> Result<GzipInfo> {
    let (info, _) = decompress_gzip_with_info(input)?;
    Ok(info)
}

/// Decompress a gzip member, returning both its header fields and payload.
pub fn decompress_gzip_with_info(input: &[u8]) -> Result<(GzipInfo, Vec<u8>)> {
    check_magic(input)?;

    let mut output = Vec::with_capacity(size_hint(input));
    let (mut info, _) = inflate_member(input, &mut output)?;
    info.compressed_size = input.len();
    info.uncompressed_size = output.len();

    debug!(
        input = input.len(),
        output = output.len(),
        "gzip member decompressed"
    );
    Ok((info, output))
}

/// Decompress every member of a concatenated gzip file.
///
/// Members are decoded back to back and their payloads joined. Anything after
/// the last member that is not another gzip member is rejected, so a damaged
/// or truncated later member fails the whole call instead of being dropped.
///
/// # Example
///
/// ```
/// use oxigz::{CompressionLevel, compress_gzip, decompress_gzip_members};
///
/// let mut joined = compress_gzip(b"first ", CompressionLevel::FAST).unwrap();
/// joined.extend(compress_gzip(b"second", CompressionLevel::FAST).unwrap());
///
/// let (info, data) = decompress_gzip_members(&joined).unwrap();
/// assert_eq!(data, b"first second");
/// assert_eq!(info.members, 2);
/// ```
pub fn decompress_gzip_members(input: &[u8]) -> Result<(GzipInfo, Vec<u8>)> {
    check_magic(input)?;

    let mut output = Vec::with_capacity(size_hint(input));
    let (mut info, mut rest) = inflate_member(input, &mut output)?;

    while !rest.is_empty() {
        if !is_gzip(rest) {
            return Err(OxiGzError::corrupted(format!(
                "{} bytes of trailing data after gzip member {}",
                rest.len(),
                info.members
            )));
        }
        let (_, next) = inflate_member(rest, &mut output)?;
        info.members += 1;
        rest = next;
    }

    info.compressed_size = input.len();
    info.uncompressed_size = output.len();

    debug!(
        input = input.len(),
        output = output.len(),
        members = info.members,
        "gzip members decompressed"
    );
    Ok((info, output))
}

/// Inflate the member at the start of `input`, appending its payload to
/// `output`. Returns the member's header fields and the bytes after it.
fn inflate_member<'a>(input: &'a [u8], output: &mut Vec<u8>) -> Result<(GzipInfo, &'a [u8])> {
    let mut decoder = GzDecoder::new(input);
    decoder.read_to_end(output).map_err(|e| {
        let err = OxiGzError::from_codec(e);
        debug!(input = input.len(), error = %err, "gzip member rejected");
        err
    })?;

    let header = decoder
        .header()
        .ok_or_else(|| OxiGzError::unexpected_eof("gzip header incomplete"))?;
    let text = |field: Option<&[u8]>| field.map(|b| String::from_utf8_lossy(b).into_owned());

    let info = GzipInfo {
        filename: text(header.filename()),
        comment: text(header.comment()),
        mtime: header.mtime(),
        os: header.operating_system(),
        extra_len: header.extra().map_or(0, <[u8]>::len),
        compressed_size: 0,
        uncompressed_size: 0,
        members: 1,
    };
    Ok((info, decoder.into_inner()))
}

fn check_magic(input: &[u8]) -> Result<()> {
    if is_gzip(input) {
        Ok(())
    } else {
        let found = &input[..input.len().min(GZIP_MAGIC.len())];
        Err(OxiGzError::invalid_magic(GZIP_MAGIC, found))
    }
}

/// Pre-allocation taken from the ISIZE trailer (original size mod 2^32).
fn size_hint(input: &[u8]) -> usize {
    if input.len() < GZIP_OVERHEAD {
        return 0;
    }
    match input {
        [.., a, b, c, d] => (u32::from_le_bytes([*a, *b, *c, *d]) as usize).min(MAX_PREALLOC),
        _ => 0,
    }
}
