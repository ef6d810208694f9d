// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Builder pattern for creating writers.

use std::path::PathBuf;

use crate::{DrdfError, Result};

use super::DrdfWriter;

/// Default output buffer size (64 KiB).
const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Configuration for creating a writer.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Path to the output file
    pub path: PathBuf,
    /// Size of the buffered writer wrapped around the file
    pub buffer_capacity: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

/// Builder for creating writers.
#[derive(Debug, Clone, Default)]
pub struct WriterBuilder {
    config: WriterConfig,
}

impl WriterBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path to the output file.
    pub fn path<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config.path = path.as_ref().to_path_buf();
        self
    }

    /// Set the output buffer size in bytes.
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.config.buffer_capacity = capacity;
        self
    }

    /// Build the writer.
    pub fn build(self) -> Result<DrdfWriter> {
        if self.config.path.as_os_str().is_empty() {
            return Err(DrdfError::usage("WriterBuilder", "Path is not set"));
        }
        if self.config.buffer_capacity == 0 {
            return Err(DrdfError::usage(
                "WriterBuilder",
                "buffer capacity must be greater than zero",
            ));
        }
        Ok(DrdfWriter::from_config(self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default() {
        let builder = WriterBuilder::new();
        assert_eq!(builder.config.buffer_capacity, DEFAULT_BUFFER_CAPACITY);
        assert!(builder.config.path.as_os_str().is_empty());
    }

    #[test]
    fn test_builder_fluent() {
        let writer = WriterBuilder::new()
            .path("output.drdf")
            .buffer_capacity(4096)
            .build()
            .unwrap();

        assert_eq!(writer.config().path, PathBuf::from("output.drdf"));
        assert_eq!(writer.config().buffer_capacity, 4096);
    }

    #[test]
    fn test_builder_requires_path() {
        let err = WriterBuilder::new().build().unwrap_err();
        assert!(err.is_usage());
    }
}
