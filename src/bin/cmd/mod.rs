// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod inspect;
mod merge;
mod verify;

pub use inspect::InspectCmd;
pub use merge::MergeCmd;
pub use verify::VerifyCmd;
