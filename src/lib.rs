// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # DRDF
//!
//! Detector Response Data Format: a binary container for detector images.
//!
//! A file holds runs keyed by UUID, each run holds events keyed by a
//! `u32` id, and each event holds typed images keyed by source name. The
//! stream is a flat sequence of length-prefixed, tagged chunks protected
//! by a running CRC-32.
//!
//! ## Architecture
//!
//! - `core/` - error taxonomy and the insertion-ordered map
//! - `model/` - format codes, pixel buffers, images and the container
//! - `io/` - chunk transport, serialization and the reading state machine
//!
//! ## Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use drdf::Drdf;
//!
//! let file = Drdf::read("response.drdf")?;
//! for (run_id, run) in file.runs() {
//!     println!("Run {run_id} with {} events", run.len());
//!     for (event_id, event) in run.events() {
//!         for (source, image) in event.images() {
//!             println!("  {event_id} {source}: {:?}", image.shape());
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{DrdfError, OrderedMap, Result};

// Data model
pub mod model;

pub use model::{
    ArrayData, Drdf, ElementType, Event, EventId, FormatCode, Image, Pixel, PixelArray,
    PixelBuffer, Run,
};

// Chunk transport and hierarchy codec
pub mod io;

pub use io::{DrdfReader, DrdfWriter, FileInfo, ReaderBuilder, WriterBuilder};

pub use uuid::Uuid;
