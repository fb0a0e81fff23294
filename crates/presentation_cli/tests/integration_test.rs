//! Integration tests for CLI
//!
//! These tests run the built binary in an empty working directory so no
//! `.env` or `outreach.toml` is picked up, and never reach a real API.

use std::process::{Command, Output};

use tempfile::TempDir;

fn outreach(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_outreach"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("OPENAI_API_KEY")
        .env_remove("OUTREACH_CREDENTIALS__OPENAI_API_KEY")
        .env_remove("OUTREACH_CONFIG")
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run outreach binary")
}

#[test]
fn styles_lists_every_style() {
    let dir = TempDir::new().unwrap();
    let output = outreach(&dir, &["styles"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for style in ["Professional", "Casual", "Cold", "Consultative"] {
        assert!(stdout.contains(style), "missing {style}");
    }
}

#[test]
fn run_without_openai_key_fails_before_any_stage() {
    let dir = TempDir::new().unwrap();
    let output = outreach(&dir, &["run", "--sender-name", "Ada Lovelace"]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("OPENAI_API_KEY"), "stderr: {stderr}");
    assert!(!stdout.contains("1/5"));
    assert!(!dir.path().join("exports").exists());
}

#[test]
fn out_of_range_companies_fail_validation() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_outreach"))
        .args(["run", "--companies", "11"])
        .current_dir(dir.path())
        .env("OPENAI_API_KEY", "sk-test")
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run outreach binary");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("num_companies"));
}

#[test]
fn missing_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let output = outreach(&dir, &["run", "--config", "missing.toml"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load configuration"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = outreach(&dir, &["launch"]);
    assert!(!output.status.success());
}
