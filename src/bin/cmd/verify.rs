// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Verify command - check framing and the trailer checksum.

use std::path::PathBuf;

use clap::Args;

use crate::common::{read_file, Result};

/// Read every chunk of one or more files and check their checksums.
#[derive(Args, Clone, Debug)]
pub struct VerifyCmd {
    /// Input files
    #[arg(value_name = "FILE", required = true)]
    inputs: Vec<PathBuf>,

    /// Require each image as an uninterrupted ISRC, IFMT, IDAT sequence
    #[arg(long)]
    strict: bool,
}

impl VerifyCmd {
    pub fn run(self) -> Result<()> {
        let mut failures = 0usize;
        for input in &self.inputs {
            match read_file(input, self.strict) {
                Ok((_, info)) => println!(
                    "OK    {} ({} chunks, checksum {})",
                    input.display(),
                    info.chunks,
                    info.checksum_hex()
                ),
                Err(e) => {
                    failures += 1;
                    println!("FAIL  {}: {e:#}", input.display());
                }
            }
        }
        if failures > 0 {
            anyhow::bail!("{failures} of {} files failed verification", self.inputs.len());
        }
        Ok(())
    }
}
