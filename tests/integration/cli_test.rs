//! Integration tests for the ttyplay CLI

use std::path::Path;
use std::process::Command;

use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;
use tempfile::TempDir;

use super::helpers::{demo_recording, gzip, temp_recording};

/// Run ttyplay against an absent config file and capture output
fn run_ttyplay(config_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let config = config_dir.join("absent.toml");
    let output = Command::new(env!("CARGO_BIN_EXE_ttyplay"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("TTYPLAY_LOG")
        .output()
        .expect("Failed to execute ttyplay");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    AssertCommand::cargo_bin("ttyplay")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn play_help_documents_options() {
    AssertCommand::cargo_bin("ttyplay")
        .unwrap()
        .args(["play", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<FILE>"))
        .stdout(predicate::str::contains("--speed"))
        .stdout(predicate::str::contains("--max-delay"));
}

#[test]
fn play_without_file_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_ttyplay(dir.path(), &["play"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("<FILE>"));
}

// ============================================================================
// Play Tests
// ============================================================================

#[test]
fn play_writes_payloads_verbatim() {
    let (dir, path) = temp_recording("demo.ttyrec", &demo_recording());
    let (stdout, stderr, exit_code) =
        run_ttyplay(dir.path(), &["play", path_str(&path), "--max-delay", "0"]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert_eq!(stdout, "hello\r\nworld");
}

#[test]
fn play_gzipped_recording() {
    let (dir, path) = temp_recording("demo.ttyrec.gz", &gzip(&demo_recording()));
    let (stdout, _stderr, exit_code) = run_ttyplay(
        dir.path(),
        &["play", path_str(&path), "--speed", "100", "--max-delay", "5"],
    );

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "hello\r\nworld");
}

#[test]
fn play_empty_recording_succeeds_silently() {
    let (dir, path) = temp_recording("empty.ttyrec", b"");
    let (stdout, _stderr, exit_code) = run_ttyplay(dir.path(), &["play", path_str(&path)]);

    assert_eq!(exit_code, 0);
    assert!(stdout.is_empty());
}

#[test]
fn play_truncated_recording_fails() {
    let mut raw = demo_recording();
    raw.truncate(raw.len() - 1);
    let (dir, path) = temp_recording("broken.ttyrec", &raw);
    let (stdout, stderr, exit_code) = run_ttyplay(dir.path(), &["play", path_str(&path)]);

    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("truncated"));
}

#[test]
fn play_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.ttyrec");
    let (_stdout, stderr, exit_code) = run_ttyplay(dir.path(), &["play", path_str(&missing)]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("missing.ttyrec"));
}

#[test]
fn play_rejects_zero_speed() {
    let (dir, path) = temp_recording("demo.ttyrec", &demo_recording());
    let (stdout, stderr, exit_code) =
        run_ttyplay(dir.path(), &["play", path_str(&path), "--speed", "0"]);

    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Invalid playback speed"));
}

#[test]
fn play_uses_config_file() {
    let (dir, path) = temp_recording("demo.ttyrec", &demo_recording());
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[playback]\nspeed = 0.0\n").unwrap();

    AssertCommand::cargo_bin("ttyplay")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .arg("play")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

// ============================================================================
// Info Tests
// ============================================================================

#[test]
fn info_summarizes_recording() {
    let (dir, path) = temp_recording("demo.ttyrec", &demo_recording());
    let (stdout, _stderr, exit_code) = run_ttyplay(dir.path(), &["info", path_str(&path)]);

    assert_eq!(exit_code, 0);
    insta::assert_snapshot!(stdout.trim_end(), @r###"
    File:       demo.ttyrec
    Frames:     3
    Duration:   1.500s
    Payload:    12 B
    Compressed: no
    "###);
}

#[test]
fn info_json_reports_compression() {
    let (dir, path) = temp_recording("demo.ttyrec.gz", &gzip(&demo_recording()));
    let (stdout, _stderr, exit_code) =
        run_ttyplay(dir.path(), &["info", path_str(&path), "--json"]);

    assert_eq!(exit_code, 0);
    let info: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(info["file"], "demo.ttyrec.gz");
    assert_eq!(info["frames"], 3);
    assert_eq!(info["duration_ms"], 1_500);
    assert_eq!(info["payload_bytes"], 12);
    assert_eq!(info["compressed"], true);
}

#[test]
fn info_on_empty_recording() {
    let (dir, path) = temp_recording("empty.ttyrec", b"");
    let (stdout, _stderr, exit_code) = run_ttyplay(dir.path(), &["info", path_str(&path)]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Frames:     0"));
    assert!(stdout.contains("0.000s"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn config_show_prints_defaults_for_missing_file() {
    let dir = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_ttyplay(dir.path(), &["config", "show"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[playback]"));
    assert!(stdout.contains("speed = 1.0"));
    assert!(stdout.contains("max_delay_ms = 1000"));
    assert!(stdout.contains("autostart = true"));
}

#[test]
fn malformed_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[playback\nspeed = ").unwrap();

    AssertCommand::cargo_bin("ttyplay")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config.toml"));
}
