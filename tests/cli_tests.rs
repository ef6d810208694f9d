// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual drdf binary and verify its behavior.

mod common;

use std::path::Path;
use std::process::{Command, Output};

use common::{minimal_container, sample_container, temp_path};
use drdf::{Drdf, Uuid};

/// Run drdf with arguments
fn run(args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_drdf");
    Command::new(bin)
        .args(args)
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {bin:?}"))
}

/// Run drdf and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run drdf and assert failure
fn run_err(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed but succeeded: {:?}",
        args
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_cli_help() {
    let output = run_ok(&["--help"]);
    assert!(output.contains("Detector Response Data Format toolkit"));
    assert!(output.contains("inspect"));
    assert!(output.contains("verify"));
    assert!(output.contains("merge"));
}

#[test]
fn test_inspect_text() {
    let (path, _guard) = temp_path("cli", "inspect");
    sample_container().write(&path).unwrap();

    let output = run_ok(&["inspect", "--images", path_str(&path)]);
    assert!(output.contains("Runs: 2  Events: 3  Images: 5"));
    assert!(output.contains("georef: EPSG:4326"));
    assert!(output.contains("CAM_NORTH_X05_Y00"));
    assert!(output.contains("24x24 Au16Tu16"));
}

#[test]
fn test_inspect_json() {
    let (path, _guard) = temp_path("cli", "inspect_json");
    minimal_container().write(&path).unwrap();

    let output = run_ok(&["inspect", "--json", path_str(&path)]);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["info"]["images"], 1);
    assert_eq!(json["runs"][0]["id"], "00000000-0000-0000-0000-000000000000");
    assert_eq!(json["runs"][0]["georef"], "X");
    assert_eq!(json["runs"][0]["events"][0]["images"][0]["format"], "Au8");
}

#[test]
fn test_verify_reports_corruption() {
    let (good, _guard_good) = temp_path("cli", "verify_good");
    let (bad, _guard_bad) = temp_path("cli", "verify_bad");
    minimal_container().write(&good).unwrap();
    let mut bytes = std::fs::read(&good).unwrap();
    let len = bytes.len();
    bytes[len - 10] ^= 0x01;
    std::fs::write(&bad, bytes).unwrap();

    let output = run_ok(&["verify", path_str(&good)]);
    assert!(output.contains("OK"));

    let stderr = run_err(&["verify", path_str(&good), path_str(&bad)]);
    assert!(stderr.contains("1 of 2 files failed verification"));
}

#[test]
fn test_merge() {
    let (first, _g1) = temp_path("cli", "merge_in_0");
    let (second, _g2) = temp_path("cli", "merge_in_1");
    let (output, _g3) = temp_path("cli", "merge_out");
    minimal_container().write(&first).unwrap();
    sample_container().write(&second).unwrap();

    let run_id = Uuid::from_u128(42);
    run_ok(&[
        "merge",
        path_str(&output),
        path_str(&first),
        path_str(&second),
        "--run-id",
        &run_id.to_string(),
    ]);

    let merged = Drdf::read(&output).unwrap();
    assert_eq!(merged.len(), 1);
    let run = merged.run(&run_id).unwrap();
    assert_eq!(run.georef(), Some("X"));
    let events: Vec<u32> = run.events().map(|(id, _)| id).collect();
    assert_eq!(events, vec![1, 40_000, 17, 0]);
    assert_eq!(merged.image_count(), 6);
}

#[test]
fn test_inspect_missing_file() {
    let stderr = run_err(&["inspect", "/nonexistent/path/file.drdf"]);
    assert!(stderr.contains("Error"));
}
