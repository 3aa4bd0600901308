//! Compress command implementation.

use crate::utils::{
    STDIO, compressed_path, file_mtime, format_ratio, header_name, is_stdio, read_input,
    write_output,
};
use oxigz::{CompressionLevel, Format, compress_gzip_named, compress_zlib};
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for `oxigz compress`.
#[derive(Debug, Clone)]
pub struct CompressOptions {
    /// Explicit output path (`-` for stdout).
    pub output: Option<PathBuf>,
    /// Raw compression level, -1 to 9.
    pub level: i32,
    /// Produce a zlib stream instead of gzip.
    pub zlib: bool,
    /// Overwrite existing output and compress already-suffixed input.
    pub force: bool,
    /// Print a summary line.
    pub verbose: bool,
}

pub fn cmd_compress(
    input: &Path,
    options: &CompressOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = CompressionLevel::try_from(options.level)?;
    let format = if options.zlib { Format::Zlib } else { Format::Gzip };

    if !options.force && !is_stdio(input) {
        let ext = input.extension().and_then(|e| e.to_str()).unwrap_or("");
        if Format::from_extension(ext) != Format::Unknown {
            return Err(format!(
                "{} already has a .{} suffix (use --force to compress anyway)",
                input.display(),
                ext
            )
            .into());
        }
    }

    let data = read_input(input)?;
    let packed = match format {
        Format::Zlib => compress_zlib(&data, level)?,
        _ => compress_gzip_named(&data, level, header_name(input), file_mtime(input))?,
    };

    let output = match &options.output {
        Some(path) => path.clone(),
        None if is_stdio(input) => PathBuf::from(STDIO),
        None => compressed_path(input, format),
    };
    write_output(&output, &packed, options.force)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        %level,
        %format,
        "compressed"
    );
    if options.verbose && !is_stdio(&output) {
        println!(
            "{} -> {} ({} -> {} bytes, {} saved)",
            input.display(),
            output.display(),
            data.len(),
            packed.len(),
            format_ratio(data.len(), packed.len())
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigz::{decompress_gzip, decompress_zlib, gzip_info, is_gzip, is_zlib};

    fn options() -> CompressOptions {
        CompressOptions {
            output: None,
            level: 1,
            zlib: false,
            force: false,
            verbose: false,
        }
    }

    #[test]
    fn test_compress_gzip_records_name() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        std::fs::write(&input, b"some notes, some notes, some notes").unwrap();

        cmd_compress(&input, &options()).unwrap();

        let packed = std::fs::read(dir.path().join("notes.txt.gz")).unwrap();
        assert!(is_gzip(&packed));
        assert_eq!(
            decompress_gzip(&packed).unwrap(),
            b"some notes, some notes, some notes"
        );
        assert_eq!(gzip_info(&packed).unwrap().filename.as_deref(), Some("notes.txt"));
    }

    #[test]
    fn test_compress_zlib() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("blob");
        std::fs::write(&input, b"zlib please").unwrap();

        let opts = CompressOptions {
            zlib: true,
            level: 9,
            ..options()
        };
        cmd_compress(&input, &opts).unwrap();

        let packed = std::fs::read(dir.path().join("blob.zz")).unwrap();
        assert!(is_zlib(&packed));
        assert_eq!(decompress_zlib(&packed).unwrap(), b"zlib please");
    }

    #[test]
    fn test_compress_rejects_bad_level_and_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.bin");
        std::fs::write(&input, b"x").unwrap();

        let bad_level = CompressOptions {
            level: 12,
            ..options()
        };
        assert!(cmd_compress(&input, &bad_level).is_err());

        let already = dir.path().join("data.gz");
        std::fs::write(&already, b"x").unwrap();
        assert!(cmd_compress(&already, &options()).is_err());
    }

    #[test]
    fn test_compress_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("file");
        std::fs::write(&input, b"x").unwrap();

        cmd_compress(&input, &options()).unwrap();
        assert!(cmd_compress(&input, &options()).is_err());

        let forced = CompressOptions {
            force: true,
            ..options()
        };
        cmd_compress(&input, &forced).unwrap();
    }
}
