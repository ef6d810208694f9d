// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show runs, events and images.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::common::{format_bytes, read_file, Result};
use drdf::{Drdf, FileInfo, FormatCode, Uuid};

/// Show the contents of a file.
#[derive(Args, Clone, Debug)]
pub struct InspectCmd {
    /// Input file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// List every image, not only per-event counts
    #[arg(long)]
    images: bool,

    /// Print a JSON summary instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct FileReport {
    path: String,
    info: FileInfo,
    runs: Vec<RunReport>,
}

#[derive(Serialize)]
struct RunReport {
    id: Uuid,
    georef: Option<String>,
    events: Vec<EventReport>,
}

#[derive(Serialize)]
struct EventReport {
    id: u32,
    images: Vec<ImageReport>,
}

#[derive(Serialize)]
struct ImageReport {
    source: String,
    width: u16,
    height: u16,
    format: FormatCode,
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        let (file, info) = read_file(&self.input, false)?;
        let report = build_report(&self.input, &file, info);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("=== {} ===", report.path);
        println!("Size: {}", format_bytes(info.bytes));
        println!("Checksum: {}", info.checksum_hex());
        println!(
            "Runs: {}  Events: {}  Images: {}",
            info.runs, info.events, info.images
        );
        for run in &report.runs {
            println!();
            println!(
                "Run {} with {} events (georef: {})",
                run.id,
                run.events.len(),
                run.georef.as_deref().unwrap_or("<none>")
            );
            for event in &run.events {
                println!("  Event {} with {} images", event.id, event.images.len());
                if self.images {
                    for image in &event.images {
                        println!(
                            "    {:<32} {}x{} {}",
                            image.source, image.width, image.height, image.format
                        );
                    }
                }
            }
        }
        Ok(())
    }
}

fn build_report(path: &std::path::Path, file: &Drdf, info: FileInfo) -> FileReport {
    let runs = file
        .runs()
        .map(|(id, run)| RunReport {
            id: *id,
            georef: run.georef().map(str::to_string),
            events: run
                .events()
                .map(|(event_id, event)| EventReport {
                    id: event_id,
                    images: event
                        .images()
                        .map(|(source, image)| ImageReport {
                            source: source.to_string(),
                            width: image.width(),
                            height: image.height(),
                            format: image.format_code(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();
    FileReport {
        path: path.display().to_string(),
        info,
        runs,
    }
}
