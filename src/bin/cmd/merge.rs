// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Merge command - collect the events of several files into one run.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use tracing::info;

use crate::common::{read_file, Result};
use drdf::{Drdf, Uuid};

/// Merge the events of the input files, in order, into a single new run.
#[derive(Args, Clone, Debug)]
pub struct MergeCmd {
    /// Output file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Input files, merged in the order given
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// UUID of the merged run (random when omitted)
    #[arg(long)]
    run_id: Option<Uuid>,

    /// Georeference of the merged run (defaults to the first input run's)
    #[arg(long)]
    georef: Option<String>,
}

impl MergeCmd {
    pub fn run(self) -> Result<()> {
        let mut merged = Drdf::new();
        let run_id = self.run_id.unwrap_or_else(Uuid::new_v4);
        merged.start_run(run_id);
        let mut georef = self.georef.clone();

        let mut events = 0;
        for input in &self.inputs {
            let (part, _) = read_file(input, false)?;
            if georef.is_none() {
                georef = part
                    .runs()
                    .find_map(|(_, run)| run.georef().map(str::to_string));
            }
            let appended = merged.append_events_from(&part)?;
            info!("Merged {appended} events from {}", input.display());
            events += appended;
        }

        let georef = georef.context("no --georef given and no input run carries one")?;
        merged.set_georef(georef)?;
        merged
            .write(&self.output)
            .with_context(|| format!("failed to write {}", self.output.display()))?;

        println!(
            "Merged {events} events from {} files into run {run_id} of {}",
            self.inputs.len(),
            self.output.display()
        );
        Ok(())
    }
}
