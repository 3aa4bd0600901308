//! Detect command implementation.

use crate::utils::{STDIO, is_stdio};
use oxigz::Format;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// JSON output of `oxigz detect`.
#[derive(Debug, Serialize)]
struct DetectJson {
    file: String,
    format: String,
    extension: &'static str,
    mime_type: &'static str,
    magic: Vec<u8>,
}

pub fn cmd_detect(file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (format, magic) = if is_stdio(file) {
        Format::detect(&mut io::stdin().lock())?
    } else {
        let mut reader = BufReader::new(File::open(file)?);
        Format::detect(&mut reader)?
    };

    if json {
        let output = DetectJson {
            file: if is_stdio(file) {
                STDIO.to_string()
            } else {
                file.display().to_string()
            },
            format: format.to_string(),
            extension: format.extension(),
            mime_type: format.mime_type(),
            magic,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("File: {}", file.display());
    println!("Format: {}", format);
    if format != Format::Unknown {
        println!("Extension: .{}", format.extension());
    }
    println!("MIME type: {}", format.mime_type());
    println!("Magic bytes: {:02X?}", magic);

    Ok(())
}
