//! Shared helpers for integration tests

use std::path::PathBuf;
use std::process::Command;

/// Directory holding the test chapters.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Path of a fixture as a string, for use as a CLI argument.
pub fn fixture(name: &str) -> String {
    fixtures_dir().join(name).to_string_lossy().into_owned()
}

/// Run readalong with a config file that does not exist, so every run sees
/// the default configuration regardless of the user's own.
///
/// Returns stdout, stderr and the exit code.
pub fn run_readalong(args: &[&str]) -> (String, String, i32) {
    let missing_config = fixtures_dir().join("no-such-config.toml");
    let output = Command::new(env!("CARGO_BIN_EXE_readalong"))
        .args(args)
        .arg("--config")
        .arg(&missing_config)
        .env_remove("READALONG_LOG")
        .output()
        .expect("Failed to execute readalong");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}
