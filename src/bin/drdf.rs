// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # DRDF CLI
//!
//! Command-line tool for Detector Response Data Format files.
//!
//! ## Usage
//!
//! ```sh
//! # Show runs, events and images
//! drdf inspect response.drdf
//!
//! # Check framing and checksum
//! drdf verify response.drdf
//!
//! # Merge the events of several files into one run
//! drdf merge response.drdf response_0.drdf response_1.drdf
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{InspectCmd, MergeCmd, VerifyCmd};
use common::Result;

/// DRDF - Detector Response Data Format toolkit
#[derive(Parser, Clone)]
#[command(name = "drdf")]
#[command(about = "Detector Response Data Format toolkit", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Show the runs, events and images of a file
    Inspect(InspectCmd),

    /// Read a file and check its framing and checksum
    Verify(VerifyCmd),

    /// Merge the events of several files into a single run
    Merge(MergeCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    common::init_logging(cli.verbose);

    match cli.command {
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Verify(cmd) => cmd.run(),
        Commands::Merge(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
