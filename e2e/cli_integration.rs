//! E2E Suite 04: the `tscrunch` binary as a black box.
//!
//! Spawns the real executable against temp files and checks exit codes,
//! stderr behaviour, and that every output mode decodes back to its input.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;
use tscrunch::crunch::boot::BOOT_LEN;
use tscrunch::{decrunch_inplace, decrunch_raw};

/// Locate the `tscrunch` binary produced by Cargo.
fn tscrunch_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tscrunch"))
}

/// A temp dir holding a compressible PRG-shaped input file.
fn make_temp_prg() -> (TempDir, PathBuf, Vec<u8>) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("input.prg");
    let mut content = vec![0x01, 0x08];
    content.extend_from_slice(&b"BASIC BYTES BASIC BYTES ".repeat(40));
    content.extend_from_slice(&[0u8; 300]);
    fs::write(&path, &content).unwrap();
    (dir, path, content)
}

// ─────────────────────────────────────────────────────────────────────────────
// Raw mode
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn raw_mode_roundtrips_through_files() {
    let (dir, input, content) = make_temp_prg();
    let output = dir.path().join("out.tsc");

    let status = Command::new(tscrunch_bin())
        .args([input.to_str().unwrap(), output.to_str().unwrap()])
        .status()
        .expect("failed to run tscrunch");
    assert!(status.success());

    let crunched = fs::read(&output).unwrap();
    assert_eq!(decrunch_raw(&crunched).unwrap(), content);
}

#[test]
fn prg_mode_strips_the_load_address() {
    let (dir, input, content) = make_temp_prg();
    let output = dir.path().join("out.tsc");

    let status = Command::new(tscrunch_bin())
        .args(["-p", input.to_str().unwrap(), output.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());

    let crunched = fs::read(&output).unwrap();
    assert_eq!(decrunch_raw(&crunched).unwrap(), &content[2..]);
}

// ─────────────────────────────────────────────────────────────────────────────
// SFX and in-place modes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn sfx_mode_prepends_the_boot_block() {
    let (dir, input, content) = make_temp_prg();
    let output = dir.path().join("out.prg");

    let status = Command::new(tscrunch_bin())
        .args([
            "-x",
            "$0810",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    let sfx = fs::read(&output).unwrap();
    // Loads at $0801 like any BASIC program.
    assert_eq!(&sfx[..2], &[0x01, 0x08]);
    assert!(sfx.len() > BOOT_LEN);
    // The stream after the boot block decodes to the PRG payload.
    assert_eq!(decrunch_raw(&sfx[BOOT_LEN..]).unwrap(), &content[2..]);
}

#[test]
fn inplace_mode_roundtrips() {
    let (dir, input, content) = make_temp_prg();
    let output = dir.path().join("out.prg");

    let status = Command::new(tscrunch_bin())
        .args(["-i", input.to_str().unwrap(), output.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());

    let crunched = fs::read(&output).unwrap();
    let (addr, decoded) = decrunch_inplace(&crunched).unwrap();
    assert_eq!(addr, 0x0801);
    assert_eq!(decoded, &content[2..]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Exit codes and diagnostics
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_arguments_print_usage_and_fail() {
    let output = Command::new(tscrunch_bin()).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage"), "stderr: {stderr}");
}

#[test]
fn conflicting_modes_fail() {
    let (dir, input, _) = make_temp_prg();
    let output = dir.path().join("out.prg");
    let result = Command::new(tscrunch_bin())
        .args([
            "-x",
            "$0810",
            "-i",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("bad usage"), "stderr: {stderr}");
}

#[test]
fn bad_hex_address_fails() {
    let result = Command::new(tscrunch_bin())
        .args(["-x", "$nope", "a", "b"])
        .output()
        .unwrap();
    assert!(!result.status.success());
}

#[test]
fn unreadable_input_fails() {
    let dir = TempDir::new().unwrap();
    let result = Command::new(tscrunch_bin())
        .args([
            dir.path().join("missing.bin").to_str().unwrap(),
            dir.path().join("out.tsc").to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("cannot read input file"), "stderr: {stderr}");
}

#[test]
fn quiet_mode_suppresses_progress() {
    let (dir, input, _) = make_temp_prg();
    let output = dir.path().join("out.tsc");
    let result = Command::new(tscrunch_bin())
        .args(["-q", input.to_str().unwrap(), output.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(result.status.success());
    assert!(result.stderr.is_empty(), "quiet run must not print progress");
}

#[test]
fn normal_mode_reports_sizes() {
    let (dir, input, _) = make_temp_prg();
    let output = dir.path().join("out.tsc");
    let result = Command::new(tscrunch_bin())
        .args([input.to_str().unwrap(), output.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("computing shortest path"), "stderr: {stderr}");
    assert!(stderr.contains("crunched to"), "stderr: {stderr}");
}
