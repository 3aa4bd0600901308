//! Info command implementation.

use crate::utils::{Decoded, decode, format_ratio, read_input, savings_percent};
use oxigz::GzipInfo;
use serde::Serialize;
use std::path::Path;

/// JSON output of `oxigz info`.
#[derive(Debug, Serialize)]
struct InfoJson {
    file: String,
    format: String,
    compressed_size: usize,
    uncompressed_size: usize,
    ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<serde_json::Value>,
}

fn header_json(info: &GzipInfo) -> serde_json::Value {
    serde_json::json!({
        "filename": info.filename,
        "comment": info.comment,
        "mtime": info.mtime,
        "os": info.os,
        "os_name": info.os_name(),
        "extra_len": info.extra_len,
        "members": info.members,
    })
}

pub fn cmd_info(file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(file)?;
    let Decoded {
        format,
        payload,
        gzip,
    } = decode(&data, None)?;
    let uncompressed_size = payload.len();

    if json {
        let output = InfoJson {
            file: file.display().to_string(),
            format: format.to_string(),
            compressed_size: data.len(),
            uncompressed_size,
            ratio: savings_percent(uncompressed_size, data.len()),
            header: gzip.as_ref().map(header_json),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Stream Information");
    println!("==================");
    println!("File: {}", file.display());
    println!("Format: {}", format);
    println!("MIME type: {}", format.mime_type());
    println!("Compressed size: {} bytes", data.len());
    println!("Uncompressed size: {} bytes", uncompressed_size);
    println!(
        "Space savings: {}",
        format_ratio(uncompressed_size, data.len())
    );

    if let Some(info) = gzip {
        println!();
        println!("GZIP Header:");
        if let Some(name) = &info.filename {
            println!("  Original filename: {}", name);
        }
        if let Some(comment) = &info.comment {
            println!("  Comment: {}", comment);
        }
        if info.mtime > 0 {
            println!("  Modification time: {} (Unix timestamp)", info.mtime);
        }
        println!("  Operating system: {} ({})", info.os_name(), info.os);
        if info.members > 1 {
            println!("  Members: {}", info.members);
        }
        if info.extra_len > 0 {
            println!("  Extra field: {} bytes", info.extra_len);
        }
    }

    Ok(())
}
