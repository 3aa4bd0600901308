//! Decompress command implementation.

use crate::utils::{
    Decoded, STDIO, decode, decompressed_path, is_stdio, read_input, restore_mtime, write_output,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options for `oxigz decompress`.
#[derive(Debug, Clone)]
pub struct DecompressOptions {
    /// Explicit output path (`-` for stdout).
    pub output: Option<PathBuf>,
    /// Known decompressed size of a zlib stream; decoded into a fixed buffer.
    pub expected_size: Option<usize>,
    /// Overwrite existing output.
    pub force: bool,
    /// Print a summary line.
    pub verbose: bool,
}

pub fn cmd_decompress(
    input: &Path,
    options: &DecompressOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(input)?;
    let Decoded {
        format,
        payload,
        gzip,
    } = decode(&data, options.expected_size)?;
    let (stored_name, mtime) = match gzip {
        Some(info) => (info.filename, info.mtime),
        None => (None, 0),
    };

    let output = match &options.output {
        Some(path) => path.clone(),
        None if is_stdio(input) => PathBuf::from(STDIO),
        None => output_path(input, stored_name.as_deref())?,
    };
    write_output(&output, &payload, options.force)?;
    restore_mtime(&output, mtime)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        %format,
        "decompressed"
    );
    if options.verbose && !is_stdio(&output) {
        println!(
            "{} -> {} ({}, {} -> {} bytes)",
            input.display(),
            output.display(),
            format,
            data.len(),
            payload.len()
        );
    }

    Ok(())
}

/// Strip the suffix, falling back to the name stored in the gzip header.
fn output_path(input: &Path, stored_name: Option<&str>) -> Result<PathBuf, String> {
    if let Some(path) = decompressed_path(input) {
        return Ok(path);
    }

    // Only trust the bare file name from the header
    let stored = stored_name
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| input.with_file_name(name))
        .filter(|path| path != input);

    match stored {
        Some(path) => {
            debug!(path = %path.display(), "using name stored in gzip header");
            Ok(path)
        }
        None => Err(format!(
            "{}: unknown suffix, cannot derive output name (use --output)",
            input.display()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigz::{CompressionLevel, compress_gzip_named};

    #[test]
    fn test_output_path_from_suffix() {
        assert_eq!(
            output_path(Path::new("a/b.txt.gz"), None).unwrap(),
            PathBuf::from("a/b.txt")
        );
    }

    #[test]
    fn test_output_path_from_header() {
        assert_eq!(
            output_path(Path::new("a/blob"), Some("report.csv")).unwrap(),
            PathBuf::from("a/report.csv")
        );
        // Directory components in the stored name are dropped
        assert_eq!(
            output_path(Path::new("a/blob"), Some("../../etc/passwd")).unwrap(),
            PathBuf::from("a/passwd")
        );
        assert!(output_path(Path::new("a/blob"), None).is_err());
        assert!(output_path(Path::new("a/blob"), Some("blob")).is_err());
    }

    #[test]
    fn test_decompress_restores_name_and_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let packed = compress_gzip_named(
            b"restored payload",
            CompressionLevel::FAST,
            Some("original.txt"),
            1_500_000_000,
        )
        .unwrap();
        let input = dir.path().join("original.txt.gz");
        std::fs::write(&input, &packed).unwrap();

        let options = DecompressOptions {
            output: None,
            expected_size: None,
            force: false,
            verbose: false,
        };
        cmd_decompress(&input, &options).unwrap();

        let output = dir.path().join("original.txt");
        assert_eq!(std::fs::read(&output).unwrap(), b"restored payload");
        assert_eq!(crate::utils::file_mtime(&output), 1_500_000_000);
    }

    #[test]
    fn test_decompress_joined_members() {
        let dir = tempfile::tempdir().unwrap();
        let mut packed = oxigz::compress_gzip(b"part one, ", CompressionLevel::FAST).unwrap();
        packed.extend(oxigz::compress_gzip(b"part two", CompressionLevel::FAST).unwrap());
        let input = dir.path().join("parts.gz");
        std::fs::write(&input, &packed).unwrap();

        let options = DecompressOptions {
            output: None,
            expected_size: None,
            force: false,
            verbose: false,
        };
        cmd_decompress(&input, &options).unwrap();
        assert_eq!(
            std::fs::read(dir.path().join("parts")).unwrap(),
            b"part one, part two"
        );
    }

    #[test]
    fn test_decompress_broken_second_member_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut packed = oxigz::compress_gzip(b"part one", CompressionLevel::FAST).unwrap();
        packed.extend_from_slice(&[0x1F, 0x8B, 0x08, 0x00, 0, 0, 0, 0, 0, 0xFF, 0, 0]);
        let input = dir.path().join("broken.gz");
        std::fs::write(&input, &packed).unwrap();

        let options = DecompressOptions {
            output: None,
            expected_size: None,
            force: false,
            verbose: false,
        };
        assert!(cmd_decompress(&input, &options).is_err());
        assert!(!dir.path().join("broken").exists());
    }

    #[test]
    fn test_decompress_zlib_with_expected_size() {
        let dir = tempfile::tempdir().unwrap();
        let packed = oxigz::compress_zlib(b"sized", CompressionLevel::FAST).unwrap();
        let input = dir.path().join("blob.zz");
        std::fs::write(&input, &packed).unwrap();

        let mut options = DecompressOptions {
            output: Some(dir.path().join("too_small")),
            expected_size: Some(2),
            force: false,
            verbose: false,
        };
        assert!(cmd_decompress(&input, &options).is_err());

        options.output = None;
        options.expected_size = Some(5);
        cmd_decompress(&input, &options).unwrap();
        assert_eq!(std::fs::read(dir.path().join("blob")).unwrap(), b"sized");
    }
}
