//! Utility functions for the CLI.

use filetime::FileTime;
use oxigz::{
    Format, GzipInfo, OxiGzError, decompress_gzip_members, decompress_zlib, zlib_uncompress_exact,
};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Path standing for stdin or stdout.
pub const STDIO: &str = "-";

/// Check if a path is the stdin/stdout marker.
pub fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO
}

/// Read a whole file, or stdin for `-`.
pub fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    if is_stdio(path) {
        let mut data = Vec::new();
        io::stdin().lock().read_to_end(&mut data)?;
        Ok(data)
    } else {
        std::fs::read(path)
    }
}

/// Write a whole buffer to a file, or stdout for `-`.
///
/// Existing files are only replaced when `force` is set.
pub fn write_output(path: &Path, data: &[u8], force: bool) -> io::Result<()> {
    if is_stdio(path) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(data)?;
        return stdout.flush();
    }

    if path.exists() && !force {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists (use --force to overwrite)", path.display()),
        ));
    }
    std::fs::write(path, data)
}

/// Output path for compressing `input`: the input path plus the format suffix.
pub fn compressed_path(input: &Path, format: Format) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// Output path for decompressing `input`: the input path without its suffix.
///
/// `.tgz` becomes `.tar`. Returns `None` when the suffix is not recognised.
pub fn decompressed_path(input: &Path) -> Option<PathBuf> {
    let ext = input.extension()?.to_str()?;
    match Format::from_extension(ext) {
        Format::Unknown => None,
        _ if ext.eq_ignore_ascii_case("tgz") => Some(input.with_extension("tar")),
        _ => Some(input.with_extension("")),
    }
}

/// File name to record in a gzip header.
pub fn header_name(input: &Path) -> Option<&str> {
    if is_stdio(input) {
        return None;
    }
    input.file_name().and_then(|n| n.to_str())
}

/// Modification time of a file as a gzip MTIME (0 when unknown).
pub fn file_mtime(path: &Path) -> u32 {
    if is_stdio(path) {
        return 0;
    }
    std::fs::metadata(path)
        .map(|m| FileTime::from_last_modification_time(&m).unix_seconds())
        .ok()
        .and_then(|secs| u32::try_from(secs).ok())
        .unwrap_or(0)
}

/// Stamp `path` with a gzip MTIME. A zero MTIME means "unknown" and is skipped.
pub fn restore_mtime(path: &Path, mtime: u32) -> io::Result<()> {
    if mtime == 0 || is_stdio(path) {
        return Ok(());
    }
    filetime::set_file_mtime(path, FileTime::from_unix_time(i64::from(mtime), 0))
}

/// A fully decoded input file.
#[derive(Debug)]
pub struct Decoded {
    pub format: Format,
    pub payload: Vec<u8>,
    /// Header fields, for gzip input.
    pub gzip: Option<GzipInfo>,
}

/// Decode a whole file: every gzip member, or one zlib stream.
///
/// `expected_size` decodes a zlib stream into a buffer of exactly that size.
pub fn decode(data: &[u8], expected_size: Option<usize>) -> oxigz::Result<Decoded> {
    match Format::sniff(data) {
        Format::Gzip => {
            let (info, payload) = decompress_gzip_members(data)?;
            Ok(Decoded {
                format: Format::Gzip,
                payload,
                gzip: Some(info),
            })
        }
        Format::Zlib => {
            let payload = match expected_size {
                Some(size) => zlib_uncompress_exact(data, size)?,
                None => decompress_zlib(data)?,
            };
            Ok(Decoded {
                format: Format::Zlib,
                payload,
                gzip: None,
            })
        }
        Format::Unknown => Err(OxiGzError::unknown_format(data)),
    }
}

/// Space savings in percent (0 for empty input).
pub fn savings_percent(original: usize, compressed: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

/// Space savings for display, or `-` for empty input.
pub fn format_ratio(original: usize, compressed: usize) -> String {
    if original == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", savings_percent(original, compressed))
}
