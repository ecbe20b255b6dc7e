//! Integration tests for top-level CLI behavior

use assert_cmd::Command;
use predicates::prelude::*;

fn readalong() -> Command {
    Command::cargo_bin("readalong").expect("binary should be built")
}

#[test]
fn help_lists_subcommands() {
    readalong()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("spans"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn play_help_lists_keys() {
    readalong()
        .args(["play", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("KEYS:"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn version_is_printed() {
    readalong()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("readalong "));
}

#[test]
fn completions_are_generated() {
    readalong()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("readalong"));
}

#[test]
fn unknown_subcommand_fails() {
    readalong()
        .arg("record")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
