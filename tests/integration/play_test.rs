//! Integration tests for the play command

use std::process::Command;

use tempfile::TempDir;

use crate::helpers::{fixture, fixtures_dir, run_readalong};

#[test]
fn dry_run_reads_chapter_and_reveals_notes() {
    let (stdout, _stderr, exit_code) =
        run_readalong(&["play", &fixture("chapter1.json"), "--dry-run"]);

    assert_eq!(exit_code, 0);
    insta::assert_snapshot!(stdout, @r###"
Fables - Chapter 1
  1. [1/3] The quick fox (1.0x)
       quick = 빠른
  2. [2/3] jumps over the lazy dog (1.0x)
       jumps over = 뛰어넘다
       lazy = 게으른
  3. [3/3] and runs away (1.0x)
Finished: 3 utterance(s), 3 star(s)
"###);
}

#[test]
fn dry_run_in_paged_mode_stops_at_page_end() {
    let (stdout, _stderr, exit_code) = run_readalong(&[
        "play",
        &fixture("chapter1.json"),
        "--dry-run",
        "--page-size",
        "2",
    ]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[2/3] jumps over the lazy dog"));
    assert!(!stdout.contains("and runs away"));
    assert!(stdout.ends_with("Finished: 2 utterance(s), 2 star(s)\n"));
}

#[test]
fn dry_run_uses_requested_speed() {
    let (stdout, _stderr, exit_code) = run_readalong(&[
        "play",
        &fixture("chapter1.json"),
        "--dry-run",
        "--speed",
        "0.8",
    ]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("The quick fox (0.8x)"));
}

#[test]
fn dry_run_with_loop_is_bounded() {
    let (stdout, _stderr, exit_code) = run_readalong(&[
        "play",
        &fixture("chapter1.json"),
        "--dry-run",
        "--loop",
    ]);

    assert_eq!(exit_code, 0);
    assert_eq!(stdout.matches("The quick fox").count(), 6);
    assert!(stdout.ends_with("Finished: 6 utterance(s), 6 star(s)\n"));
}

#[test]
fn play_rejects_unsupported_speed() {
    let (_stdout, stderr, exit_code) = run_readalong(&[
        "play",
        &fixture("chapter1.json"),
        "--dry-run",
        "--speed",
        "40",
    ]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Invalid --speed"), "stderr: {}", stderr);
}

#[test]
fn play_without_terminal_suggests_dry_run() {
    let (_stdout, stderr, exit_code) = run_readalong(&["play", &fixture("chapter1.json")]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("--dry-run"), "stderr: {}", stderr);
}

#[test]
#[cfg(target_os = "linux")]
fn play_without_terminal_leaves_log_file_alone() {
    let data_home = TempDir::new().unwrap();
    let log_dir = data_home.path().join("readalong");
    std::fs::create_dir_all(&log_dir).unwrap();
    let log_file = log_dir.join("readalong.log");
    std::fs::write(&log_file, "previous session\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_readalong"))
        .args(["play", &fixture("chapter1.json")])
        .arg("--config")
        .arg(fixtures_dir().join("no-such-config.toml"))
        .env("XDG_DATA_HOME", data_home.path())
        .output()
        .expect("Failed to execute readalong");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        std::fs::read_to_string(&log_file).unwrap(),
        "previous session\n"
    );
}
