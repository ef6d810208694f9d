// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Summary metadata produced by reading or writing a DRDF stream.

use serde::Serialize;

/// Counts and checksum of one encoded or decoded stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    /// Number of `RSTA` chunks
    pub runs: usize,
    /// Number of `EVNT` chunks
    pub events: usize,
    /// Number of `IDAT` chunks
    pub images: usize,
    /// Number of chunks, including `HRAW` and `ERAW`
    pub chunks: u64,
    /// Total stream size in bytes
    pub bytes: u64,
    /// Checksum stored in the `ERAW` trailer
    pub checksum: u32,
}

impl FileInfo {
    /// Checksum formatted as 8 uppercase hex digits.
    pub fn checksum_hex(&self) -> String {
        format!("{:08X}", self.checksum)
    }
}
