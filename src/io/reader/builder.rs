// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Builder pattern for creating readers.
//!
//! The `ReaderBuilder` provides a fluent API for configuring how strictly
//! a stream is validated before opening it.

use std::path::PathBuf;

use crate::io::constants::DEFAULT_MAX_CHUNK_LEN;
use crate::{DrdfError, Result};

use super::DrdfReader;

/// Configuration for creating a reader.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Path to the file to read
    pub path: PathBuf,
    /// Require every image as an uninterrupted `ISRC IFMT IDAT` sequence
    pub strict_staging: bool,
    /// Skip unrecognized chunk tags instead of failing
    pub allow_unknown_tags: bool,
    /// Largest payload accepted for a single chunk
    pub max_chunk_len: u32,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            strict_staging: false,
            allow_unknown_tags: false,
            max_chunk_len: DEFAULT_MAX_CHUNK_LEN,
        }
    }
}

/// Builder for creating readers.
///
/// # Example
///
/// ```rust,no_run
/// use drdf::io::ReaderBuilder;
///
/// let reader = ReaderBuilder::new()
///     .path("response.drdf")
///     .strict_staging(true)
///     .build()?;
/// let (file, info) = reader.read()?;
/// println!("{} runs, checksum {}", file.len(), info.checksum_hex());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReaderBuilder {
    config: ReaderConfig,
}

impl ReaderBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path to the file.
    pub fn path<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config.path = path.as_ref().to_path_buf();
        self
    }

    /// Reject images whose chunks are not an uninterrupted
    /// `ISRC IFMT IDAT` sequence.
    pub fn strict_staging(mut self, strict: bool) -> Self {
        self.config.strict_staging = strict;
        self
    }

    /// Skip unrecognized chunk tags with a warning.
    pub fn allow_unknown_tags(mut self, allow: bool) -> Self {
        self.config.allow_unknown_tags = allow;
        self
    }

    /// Set the largest accepted chunk payload in bytes.
    pub fn max_chunk_len(mut self, len: u32) -> Self {
        self.config.max_chunk_len = len;
        self
    }

    /// Build the reader.
    pub fn build(self) -> Result<DrdfReader> {
        if self.config.path.as_os_str().is_empty() {
            return Err(DrdfError::usage("ReaderBuilder", "Path is not set"));
        }
        Ok(DrdfReader::from_config(self.config))
    }
}
