//! Integration tests for readalong

mod helpers;

mod check_test;
mod cli_test;
mod config_test;
mod play_test;
mod reader_test;
mod spans_test;
