//! Chapter loading errors.

use std::path::PathBuf;

/// Errors that can occur while loading chapter content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Chapter file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read chapter file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid chapter JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Chapter contains no sentences")]
    Empty,
}
