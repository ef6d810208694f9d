// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! DRDF file detection.
//!
//! A DRDF stream always starts with the 8-byte empty `HRAW` chunk, so
//! sniffing the first bytes is enough to tell it apart from other files.
//! The conventional extensions are `.drdf` and `.img`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::constants::FILE_HEADER;
use crate::Result;

/// Extensions conventionally used for DRDF files.
pub const EXTENSIONS: [&str; 2] = ["drdf", "img"];

/// Check whether `bytes` begin with the DRDF stream header.
pub fn has_drdf_magic(bytes: &[u8]) -> bool {
    bytes.starts_with(&FILE_HEADER)
}

/// Read the first bytes of `path` and check for the DRDF stream header.
pub fn detect_drdf<P: AsRef<Path>>(path: P) -> Result<bool> {
    let mut file = File::open(path.as_ref())?;
    let mut header = [0u8; FILE_HEADER.len()];
    let mut filled = 0;
    while filled < header.len() {
        let n = file.read(&mut header[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(has_drdf_magic(&header[..filled]))
}

/// Check whether `path` carries a conventional DRDF extension.
pub fn has_drdf_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Check if a file is a DRDF file, by content.
pub fn is_drdf_file<P: AsRef<Path>>(path: P) -> bool {
    detect_drdf(path).unwrap_or(false)
}
