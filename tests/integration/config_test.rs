//! Integration tests for the config commands

use std::fs;
use std::process::Command;

use tempfile::TempDir;

use crate::helpers::run_readalong;

fn run_with_config(config: &std::path::Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_readalong"))
        .args(args)
        .arg("--config")
        .arg(config)
        .output()
        .expect("Failed to execute readalong");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

#[test]
fn config_show_prints_defaults_without_file() {
    let (stdout, _stderr, exit_code) = run_readalong(&["config", "show"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[playback]"));
    assert!(stdout.contains("page_size = 1"));
    assert!(stdout.contains("[speech]"));
    assert!(stdout.contains("words_per_minute = 160"));
    assert!(stdout.contains("[log]"));
}

#[test]
fn config_init_writes_file_once() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");

    let (stdout, _stderr, exit_code) = run_with_config(&path, &["config", "init"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with("Wrote "));
    assert!(fs::read_to_string(&path).unwrap().contains("[playback]"));

    let (_stdout, stderr, exit_code) = run_with_config(&path, &["config", "init"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("--force"), "stderr: {}", stderr);

    let (_stdout, _stderr, exit_code) = run_with_config(&path, &["config", "init", "--force"]);
    assert_eq!(exit_code, 0);
}

#[test]
fn config_file_values_are_used() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[playback]\nspeed = 1.2\n").unwrap();

    let (stdout, _stderr, exit_code) = run_with_config(&path, &["config", "show"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("speed = 1.2"));
    assert!(stdout.contains("page_size = 1"));
}

#[test]
fn invalid_config_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[playback\n").unwrap();

    let (_stdout, stderr, exit_code) = run_with_config(&path, &["config", "show"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("config.toml"), "stderr: {}", stderr);
}
