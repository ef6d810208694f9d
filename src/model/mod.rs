// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! In-memory data model: runs, events and typed images.

pub mod container;
pub mod format;
pub mod image;
pub mod pixels;

pub use container::{Drdf, Event, EventId, Run};
pub use format::{ElementType, FormatCode};
pub use image::Image;
pub use pixels::{ArrayData, Pixel, PixelArray, PixelBuffer};
