//! Raw zlib stream helpers (RFC 1950).
//!
//! [`zlib_uncompress`] decodes into a caller-sized buffer and reports a
//! [`ZlibStatus`] instead of failing, leaving the caller to decide what an
//! undersized buffer or bad stream means. It does **not** accept gzip-framed
//! input; use [`crate::decompress_gzip`] for that, or dispatch with
//! [`crate::is_gzip`].
//!
//! # Format
//!
//! ```text
//! +---+---+============+---+---+---+---+
//! |CMF|FLG| compressed |    ADLER32    |
//! +---+---+============+---+---+---+---+
//! ```

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use oxigz_core::error::{OxiGzError, Result};
use oxigz_core::level::CompressionLevel;
use oxigz_core::status::ZlibStatus;
use std::io::Write;
use tracing::{debug, trace};

/// Smallest chunk the growable decoder reserves at a time.
const MIN_RESERVE: usize = 256;

/// Decode a raw zlib stream into `dst`.
///
/// Returns the status and the number of bytes written to `dst`. Nothing is
/// ever written past `dst.len()`.
///
/// - [`ZlibStatus::Ok`]: the stream ended and its Adler-32 matched.
/// - [`ZlibStatus::BufError`]: `dst` filled up before the end of the stream.
/// - [`ZlibStatus::DataError`]: bad header (gzip input included), corrupt
///   blocks, checksum mismatch, preset dictionary, or input that ends early.
///
/// # Example
///
/// ```
/// use oxigz::{CompressionLevel, ZlibStatus, compress_zlib, zlib_uncompress};
///
/// let packed = compress_zlib(b"abcabcabc", CompressionLevel::FAST).unwrap();
/// let mut dst = [0u8; 9];
/// assert_eq!(zlib_uncompress(&mut dst, &packed), (ZlibStatus::Ok, 9));
/// assert_eq!(&dst, b"abcabcabc");
/// ```
pub fn zlib_uncompress(dst: &mut [u8], src: &[u8]) -> (ZlibStatus, usize) {
    if src.is_empty() {
        return (ZlibStatus::DataError, 0);
    }

    let (status, written) = if dst.is_empty() {
        // The codec reports a full buffer before looking at the stream when
        // handed zero bytes of room, so probe with one byte of scratch space.
        let mut scratch = [0u8; 1];
        match inflate_into(&mut scratch, src) {
            (ZlibStatus::Ok, 0) => (ZlibStatus::Ok, 0),
            (ZlibStatus::DataError, _) => (ZlibStatus::DataError, 0),
            _ => (ZlibStatus::BufError, 0),
        }
    } else {
        inflate_into(dst, src)
    };

    debug!(
        input = src.len(),
        capacity = dst.len(),
        written,
        %status,
        "raw zlib stream decoded"
    );
    (status, written)
}

fn inflate_into(dst: &mut [u8], src: &[u8]) -> (ZlibStatus, usize) {
    let mut inflater = Decompress::new(true);
    let result = inflater.decompress(src, dst, FlushDecompress::Finish);
    let written = inflater.total_out() as usize;

    let input_left = (inflater.total_in() as usize) < src.len();

    let status = match result {
        Ok(Status::StreamEnd) => ZlibStatus::Ok,
        // Out of room. Bad data comes back as `Err`, so a clean stop with
        // input still unread means the codec had nowhere to put the next bytes.
        Ok(Status::Ok | Status::BufError) if written == dst.len() || input_left => {
            ZlibStatus::BufError
        }
        // Out of input
        Ok(Status::Ok | Status::BufError) => ZlibStatus::DataError,
        Err(e) => {
            trace!(error = %e, "zlib codec error");
            ZlibStatus::DataError
        }
    };
    (status, written)
}

/// Decode a raw zlib stream whose decompressed length is known up front.
///
/// A stream longer than `expected_len` is [`OxiGzError::BufferTooSmall`]
/// with the size it actually needs; one that ends short of `expected_len` is
/// corrupt. Other failures become [`OxiGzError::Zlib`].
pub fn zlib_uncompress_exact(src: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    let mut dst = vec![0u8; expected_len];
    let (status, written) = zlib_uncompress(&mut dst, src);

    if status.is_ok() {
        if written != expected_len {
            return Err(OxiGzError::corrupted(format!(
                "zlib stream decoded to {written} bytes, expected {expected_len}"
            )));
        }
        return Ok(dst);
    }

    match status {
        ZlibStatus::BufError => {
            // Learn the real size so the caller can retry
            let needed = decompress_zlib(src)?.len();
            Err(OxiGzError::buffer_too_small(needed, expected_len))
        }
        _ => Err(status.into()),
    }
}

/// Compress `input` into a zlib stream.
pub fn compress_zlib(input: &[u8], level: CompressionLevel) -> Result<Vec<u8>> {
    let sink = Vec::with_capacity(input.len() / 2 + 6);
    let mut encoder = ZlibEncoder::new(sink, Compression::new(u32::from(level.level())));
    encoder.write_all(input)?;
    let output = encoder.finish()?;

    debug!(
        input = input.len(),
        output = output.len(),
        %level,
        "zlib stream compressed"
    );
    Ok(output)
}

/// Decode a zlib stream of unknown decompressed length.
///
/// Unlike [`zlib_uncompress`] this fails on anything but a complete stream:
/// truncated input is [`OxiGzError::UnexpectedEof`], a bad stream is
/// [`OxiGzError::CorruptedData`].
pub fn decompress_zlib(input: &[u8]) -> Result<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut output = Vec::with_capacity(input.len().saturating_mul(4).max(MIN_RESERVE));

    loop {
        let (in_before, out_before) = (inflater.total_in(), inflater.total_out());
        let remaining = &input[in_before as usize..];

        let status = inflater
            .decompress_vec(remaining, &mut output, FlushDecompress::None)
            .map_err(|e| OxiGzError::corrupted(e.to_string()))?;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                if output.len() == output.capacity() {
                    output.reserve(output.capacity().max(MIN_RESERVE));
                } else if inflater.total_in() as usize >= input.len() {
                    return Err(OxiGzError::unexpected_eof("zlib stream ended early"));
                } else if inflater.total_in() == in_before && inflater.total_out() == out_before {
                    return Err(OxiGzError::corrupted("zlib decoder made no progress"));
                }
            }
        }
    }

    debug!(
        input = input.len(),
        output = output.len(),
        "zlib stream decompressed"
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gzip::compress_gzip;

    fn sample() -> Vec<u8> {
        b"zlib sample payload, zlib sample payload, zlib sample payload".to_vec()
    }

    #[test]
    fn test_exact_capacity() {
        let data = sample();
        let packed = compress_zlib(&data, CompressionLevel::DEFAULT).unwrap();
        let mut dst = vec![0u8; data.len()];
        assert_eq!(zlib_uncompress(&mut dst, &packed), (ZlibStatus::Ok, data.len()));
        assert_eq!(dst, data);
    }

    #[test]
    fn test_larger_capacity_reports_written() {
        let data = sample();
        let packed = compress_zlib(&data, CompressionLevel::FAST).unwrap();
        let mut dst = vec![0u8; data.len() + 100];
        let (status, written) = zlib_uncompress(&mut dst, &packed);
        assert_eq!(status, ZlibStatus::Ok);
        assert_eq!(&dst[..written], &data[..]);
    }

    #[test]
    fn test_undersized_destination() {
        let data = vec![b'x'; 10_000];
        let packed = compress_zlib(&data, CompressionLevel::FAST).unwrap();
        let mut dst = vec![0u8; 100];
        let (status, written) = zlib_uncompress(&mut dst, &packed);
        assert_eq!(status, ZlibStatus::BufError);
        assert!(written <= 100);
        assert!(dst[..written].iter().all(|&b| b == b'x'));
    }

    #[test]
    fn test_one_byte_short() {
        let data: Vec<u8> = b"abcdefgh".iter().cycle().take(5000).copied().collect();
        for level in [CompressionLevel::NONE, CompressionLevel::FAST, CompressionLevel::BEST] {
            let packed = compress_zlib(&data, level).unwrap();
            let mut dst = vec![0u8; data.len() - 1];
            let (status, written) = zlib_uncompress(&mut dst, &packed);
            assert_eq!(status, ZlibStatus::BufError);
            assert_eq!(status.code(), ZlibStatus::Z_BUF_ERROR);
            assert_eq!(&dst[..written], &data[..written]);
        }
    }

    #[test]
    fn test_zero_capacity() {
        let empty = compress_zlib(b"", CompressionLevel::FAST).unwrap();
        assert_eq!(zlib_uncompress(&mut [], &empty), (ZlibStatus::Ok, 0));

        let packed = compress_zlib(b"abc", CompressionLevel::FAST).unwrap();
        assert_eq!(zlib_uncompress(&mut [], &packed), (ZlibStatus::BufError, 0));
    }

    #[test]
    fn test_gzip_input_is_data_error() {
        let gz = compress_gzip(&sample(), CompressionLevel::FAST).unwrap();
        let mut dst = vec![0u8; 1024];
        let (status, _) = zlib_uncompress(&mut dst, &gz);
        assert_eq!(status, ZlibStatus::DataError);
        assert_eq!(status.code(), ZlibStatus::Z_DATA_ERROR);
    }

    #[test]
    fn test_empty_and_truncated_input() {
        let mut dst = vec![0u8; 64];
        assert_eq!(zlib_uncompress(&mut dst, &[]).0, ZlibStatus::DataError);

        let packed = compress_zlib(&sample(), CompressionLevel::FAST).unwrap();
        let truncated = &packed[..packed.len() / 2];
        assert_eq!(zlib_uncompress(&mut dst, truncated).0, ZlibStatus::DataError);
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut packed = compress_zlib(&sample(), CompressionLevel::FAST).unwrap();
        let last = packed.len() - 1;
        packed[last] ^= 0x55;
        let mut dst = vec![0u8; 1024];
        assert_eq!(zlib_uncompress(&mut dst, &packed).0, ZlibStatus::DataError);
    }

    #[test]
    fn test_uncompress_exact() {
        let data = sample();
        let packed = compress_zlib(&data, CompressionLevel::BEST).unwrap();
        assert_eq!(zlib_uncompress_exact(&packed, data.len()).unwrap(), data);

        match zlib_uncompress_exact(&packed, data.len() - 1) {
            Err(OxiGzError::BufferTooSmall { needed, available }) => {
                assert_eq!(needed, data.len());
                assert_eq!(available, data.len() - 1);
            }
            other => panic!("expected BufferTooSmall, got {other:?}"),
        }
        assert!(matches!(
            zlib_uncompress_exact(b"\x78\x9c\xff", 4),
            Err(OxiGzError::Zlib {
                status: ZlibStatus::DataError
            })
        ));
        assert!(matches!(
            zlib_uncompress_exact(&packed, data.len() + 1),
            Err(OxiGzError::CorruptedData { .. })
        ));
    }

    #[test]
    fn test_growable_roundtrip() {
        let data: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();
        let packed = compress_zlib(&data, CompressionLevel::DEFAULT).unwrap();
        assert_eq!(decompress_zlib(&packed).unwrap(), data);
    }

    #[test]
    fn test_growable_truncated() {
        let data = vec![42u8; 4096];
        let packed = compress_zlib(&data, CompressionLevel::NONE).unwrap();
        let err = decompress_zlib(&packed[..packed.len() - 10]).unwrap_err();
        assert!(matches!(err, OxiGzError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_growable_rejects_gzip() {
        let gz = compress_gzip(b"not zlib", CompressionLevel::FAST).unwrap();
        assert!(matches!(
            decompress_zlib(&gz),
            Err(OxiGzError::CorruptedData { .. })
        ));
    }
}
