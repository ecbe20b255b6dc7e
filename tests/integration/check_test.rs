//! Integration tests for the check command

use crate::helpers::{fixture, run_readalong};

#[test]
fn check_accepts_clean_chapter() {
    let path = fixture("chapter1.json");
    let (stdout, _stderr, exit_code) = run_readalong(&["check", &path]);

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, format!("{}: 3 sentence(s), 3 note(s)\nOK\n", path));
}

#[test]
fn check_lists_notes_that_cannot_be_shown() {
    let (stdout, stderr, exit_code) = run_readalong(&["check", &fixture("bad_notes.json")]);

    assert_eq!(exit_code, 1);
    assert!(stdout.contains("1 sentence(s), 3 note(s)"));
    assert!(stdout.contains(r#"sentence 1: note "red" is covered by an earlier note"#));
    assert!(stdout.contains(r#"sentence 1: note "cube" does not occur in text"#));
    assert!(!stdout.contains(r#"note "big red""#));
    assert!(stderr.contains("2 problem(s) found"), "stderr: {}", stderr);
}
