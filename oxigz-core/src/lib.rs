//! # OxiGz Core
//!
//! Core types shared by the OxiGz crates:
//!
//! - [`error`]: Error type and `Result` alias
//! - [`level`]: Compression level
//! - [`status`]: Status codes of the raw zlib path
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI                                                     │
//! │     oxigz compress / decompress / detect / info / test  │
//! ├─────────────────────────────────────────────────────────┤
//! │ Adapter (oxigz)                                         │
//! │     gzip, raw zlib, magic sniffing, auto-dispatch       │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate)                                       │
//! │     OxiGzError, CompressionLevel, ZlibStatus            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxigz_core::{CompressionLevel, ZlibStatus};
//!
//! let level = CompressionLevel::try_from(-1).unwrap();
//! assert_eq!(level, CompressionLevel::DEFAULT);
//! assert_eq!(ZlibStatus::BufError.code(), -5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod level;
pub mod status;

// Re-exports for convenience
pub use error::{OxiGzError, Result};
pub use level::CompressionLevel;
pub use status::ZlibStatus;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{OxiGzError, Result};
    pub use crate::level::CompressionLevel;
    pub use crate::status::ZlibStatus;
}
