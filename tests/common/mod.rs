// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use drdf::{ArrayData, Drdf, FormatCode, Image, PixelArray, PixelBuffer, Uuid};

// ============================================================================
// Temporary files
// ============================================================================

/// Cleanup guard for test temporary files.
#[derive(Debug)]
pub struct CleanupGuard(PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

/// Create a unique temporary file path and a guard removing its directory.
pub fn temp_path(suite: &str, name: &str) -> (PathBuf, CleanupGuard) {
    let random = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    let dir = std::env::temp_dir().join(format!(
        "drdf_{suite}_{}_{}_{}",
        name,
        std::process::id(),
        random
    ));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{name}.drdf"));
    (path, CleanupGuard(dir))
}

// ============================================================================
// Fixtures
// ============================================================================

/// Deterministic test image of the given format.
pub fn sample_image(code: FormatCode, width: u16, height: u16, seed: u32) -> Image {
    let count = width as usize * height as usize;
    let value = |i: usize| (i as u32).wrapping_mul(2_654_435_761).wrapping_add(seed);
    let pixels = match code {
        FormatCode::Au8 => PixelBuffer::Au8((0..count).map(|i| value(i) as u8).collect()),
        FormatCode::Au8Tu8 => PixelBuffer::Au8Tu8(
            (0..count)
                .map(|i| [value(i) as u8, (value(i) >> 8) as u8])
                .collect(),
        ),
        FormatCode::Au16 => PixelBuffer::Au16((0..count).map(|i| value(i) as u16).collect()),
        FormatCode::Au16Tu16 => PixelBuffer::Au16Tu16(
            (0..count)
                .map(|i| [value(i) as u16, (value(i) >> 16) as u16])
                .collect(),
        ),
        FormatCode::Af32Tf32 => PixelBuffer::Af32Tf32(
            (0..count)
                .map(|i| [value(i) as f32 * 0.25, -(i as f32) / 3.0])
                .collect(),
        ),
    };
    Image::new(width, height, pixels).unwrap()
}

/// A container exercising every format code across two runs.
pub fn sample_container() -> Drdf {
    let mut file = Drdf::new();

    file.start_run(Uuid::from_u128(0x0123_4567_89ab_cdef_0011_2233_4455_6677));
    file.set_georef("DUMMY").unwrap();
    file.start_event(40_000).unwrap();
    file.add_image("CAM_NORTH_X05_Y00", sample_image(FormatCode::Au16Tu16, 24, 24, 1))
        .unwrap();
    file.add_image("CAM_NORTH_X05_Y01", sample_image(FormatCode::Au8, 7, 3, 2))
        .unwrap();
    file.start_event(17).unwrap();
    file.add_image("CAM_SOUTH_X00_Y00", sample_image(FormatCode::Af32Tf32, 5, 9, 3))
        .unwrap();

    file.start_run(Uuid::from_u128(1));
    file.set_georef("EPSG:4326").unwrap();
    file.start_event(0).unwrap();
    file.add_image("B", sample_image(FormatCode::Au8Tu8, 16, 2, 4))
        .unwrap();
    file.add_image("A", sample_image(FormatCode::Au16, 1, 1, 5))
        .unwrap();
    file
}

/// The smallest meaningful container: one 2x2 `Au8` image.
pub fn minimal_container() -> Drdf {
    let mut file = Drdf::new();
    file.start_run(Uuid::nil());
    file.set_georef("X").unwrap();
    file.start_event(1).unwrap();
    let array = PixelArray::new(vec![2, 2], ArrayData::U8(vec![1, 2, 3, 4])).unwrap();
    file.add_image("CAM", Image::from_array(array).unwrap())
        .unwrap();
    file
}
