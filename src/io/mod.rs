// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for DRDF streams.
//!
//! - [`chunk`] frames tagged payloads and keeps the running checksum
//! - [`reader`] and [`writer`] map the run/event/image tree onto chunks

pub mod chunk;
pub mod constants;
pub mod detection;
pub mod metadata;
pub mod reader;
pub mod writer;

pub use chunk::{Chunk, ChunkReader, ChunkWriter};
pub use constants::Tag;
pub use detection::{detect_drdf, is_drdf_file};
pub use metadata::FileInfo;
pub use reader::{DrdfReader, ReaderBuilder, ReaderConfig};
pub use writer::{DrdfWriter, WriterBuilder, WriterConfig};
