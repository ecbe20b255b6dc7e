//! Integration tests for the spans command

use crate::helpers::{fixture, run_readalong};

#[test]
fn spans_prints_every_sentence() {
    let (stdout, _stderr, exit_code) = run_readalong(&["spans", &fixture("chapter1.json")]);

    assert_eq!(exit_code, 0);
    insta::assert_snapshot!(stdout, @r###"
1. The quick fox
   0..4     "The "
   4..9     "quick" = 빠른
   9..13    " fox"
2. jumps over the lazy dog
   0..10    "jumps over" = 뛰어넘다
   10..15   " the "
   15..19   "lazy" = 게으른
   19..23   " dog"
3. and runs away
   0..13    "and runs away"
"###);
}

#[test]
fn spans_prints_single_sentence() {
    let (stdout, _stderr, exit_code) =
        run_readalong(&["spans", &fixture("chapter1.json"), "--sentence", "1"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with("1. The quick fox\n"));
    assert!(!stdout.contains("2. jumps"));
}

#[test]
fn spans_rejects_sentence_out_of_range() {
    for number in ["0", "4"] {
        let (_stdout, stderr, exit_code) =
            run_readalong(&["spans", &fixture("chapter1.json"), "--sentence", number]);

        assert_eq!(exit_code, 1);
        assert!(stderr.contains("out of range"), "stderr: {}", stderr);
    }
}

#[test]
fn spans_reports_missing_chapter() {
    let (_stdout, stderr, exit_code) = run_readalong(&["spans", "/nonexistent/chapter.json"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to load chapter"), "stderr: {}", stderr);
}
