// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout drdf.
//!
//! - [`DrdfError`] - error taxonomy for every read/write/build failure
//! - [`OrderedMap`] - insertion-ordered map backing runs, events and images

pub mod error;
pub mod ordered;

pub use error::{DrdfError, Result};
pub use ordered::OrderedMap;
