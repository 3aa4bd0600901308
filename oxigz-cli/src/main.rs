//! OxiGz CLI
//!
//! Compress, decompress, inspect and verify gzip and zlib streams.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use commands::{
    CompressOptions, DecompressOptions, cmd_compress, cmd_decompress, cmd_detect, cmd_info,
    cmd_test,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oxigz")]
#[command(author, version, about = "gzip/zlib buffer utility")]
#[command(long_about = "
OxiGz compresses and decompresses single gzip members and raw zlib streams.
Use - as FILE to read stdin (output then goes to stdout).

Examples:
  oxigz compress data.bin
  oxigz compress -l 9 data.bin -o packed.gz
  oxigz compress --zlib blob
  oxigz decompress data.bin.gz
  oxigz decompress blob.zz --expected-size 4096
  oxigz detect unknown.bin
  oxigz info data.bin.gz --json
  oxigz test data.bin.gz
")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbosity: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file to gzip (or zlib)
    #[command(alias = "c")]
    Compress {
        /// File to compress
        file: PathBuf,

        /// Output file (default: FILE.gz / FILE.zz)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compression level, 0-9 (-1 for the balanced default)
        #[arg(
            short,
            long,
            default_value_t = 1,
            allow_hyphen_values = true,
            value_parser = clap::value_parser!(i32).range(-1..=9)
        )]
        level: i32,

        /// Write a raw zlib stream instead of gzip
        #[arg(long)]
        zlib: bool,

        /// Overwrite existing output
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a gzip or zlib file
    #[command(alias = "d")]
    Decompress {
        /// File to decompress
        file: PathBuf,

        /// Output file (default: FILE without .gz / .zz)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Known decompressed size of a zlib stream
        #[arg(long)]
        expected_size: Option<usize>,

        /// Overwrite existing output
        #[arg(short, long)]
        force: bool,
    },

    /// Detect stream format
    Detect {
        /// File to detect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Show information about a compressed file
    #[command(alias = "i")]
    Info {
        /// File to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Test stream integrity
    #[command(alias = "t")]
    Test {
        /// File to test
        file: PathBuf,
    },
}

fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity);
    let verbose = cli.verbosity > 0;

    let result = match cli.command {
        Commands::Compress {
            file,
            output,
            level,
            zlib,
            force,
        } => cmd_compress(
            &file,
            &CompressOptions {
                output,
                level,
                zlib,
                force,
                verbose,
            },
        ),
        Commands::Decompress {
            file,
            output,
            expected_size,
            force,
        } => cmd_decompress(
            &file,
            &DecompressOptions {
                output,
                expected_size,
                force,
                verbose,
            },
        ),
        Commands::Detect { file, json } => cmd_detect(&file, json),
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Test { file } => cmd_test(&file, verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_level_parsing() {
        let cli = Cli::try_parse_from(["oxigz", "compress", "-l", "-1", "f"]).unwrap();
        assert!(matches!(cli.command, Commands::Compress { level: -1, .. }));

        let cli = Cli::try_parse_from(["oxigz", "compress", "f"]).unwrap();
        assert!(matches!(cli.command, Commands::Compress { level: 1, .. }));

        assert!(Cli::try_parse_from(["oxigz", "compress", "-l", "10", "f"]).is_err());
    }

    #[test]
    fn test_overwrite_and_size_flags() {
        let args = ["oxigz", "d", "f.zz", "--expected-size", "64", "-f"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Decompress {
                expected_size: Some(64),
                force: true,
                ..
            }
        ));

        let cli = Cli::try_parse_from(["oxigz", "c", "--force", "f"]).unwrap();
        assert!(matches!(cli.command, Commands::Compress { force: true, .. }));

        // Input is always kept, there is no keep flag
        assert!(Cli::try_parse_from(["oxigz", "compress", "-k", "f"]).is_err());
    }

    #[test]
    fn test_verbosity_is_global() {
        let cli = Cli::try_parse_from(["oxigz", "test", "f", "-vv"]).unwrap();
        assert_eq!(cli.verbosity, 2);
    }
}
