//! Compression levels.

use crate::error::{OxiGzError, Result};

/// Compression level passed through to the DEFLATE codec (0-9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompressionLevel(u8);

impl CompressionLevel {
    /// No compression (stored blocks).
    pub const NONE: Self = Self(0);
    /// Fastest compression.
    pub const FAST: Self = Self(1);
    /// Balanced compression.
    pub const DEFAULT: Self = Self(6);
    /// Best compression (slowest).
    pub const BEST: Self = Self(9);

    /// zlib's "use the default level" sentinel.
    pub const ZLIB_DEFAULT_SENTINEL: i32 = -1;

    /// Create a custom compression level (0-9), clamping larger values.
    pub fn new(level: u8) -> Self {
        Self(level.min(9))
    }

    /// Get the level value.
    pub fn level(&self) -> u8 {
        self.0
    }
}

/// Defaults to [`CompressionLevel::FAST`]: the gzip helpers favour speed.
impl Default for CompressionLevel {
    fn default() -> Self {
        Self::FAST
    }
}

impl From<u8> for CompressionLevel {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

impl TryFrom<i32> for CompressionLevel {
    type Error = OxiGzError;

    /// Strict conversion: `-1` selects [`CompressionLevel::DEFAULT`], anything
    /// outside `-1..=9` is rejected instead of clamped.
    fn try_from(level: i32) -> Result<Self> {
        match level {
            Self::ZLIB_DEFAULT_SENTINEL => Ok(Self::DEFAULT),
            0..=9 => Ok(Self(level as u8)),
            _ => Err(OxiGzError::invalid_level(level)),
        }
    }
}

impl std::fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
