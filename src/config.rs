//! Configuration file handling.
//!
//! The config lives at `<config dir>/readalong/config.toml`. A missing file
//! means defaults, and every section tolerates missing fields so older
//! files keep loading as new settings are added.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::reader::PlaybackOptions;
use crate::speech::RateRange;

/// Errors from reading or writing the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine the user config directory")]
    NoConfigDir,

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub speech: SpeechConfig,
    pub log: LogConfig,
}

/// `[playback]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Sentences per page (1 = sentence by sentence)
    pub page_size: usize,
    /// Initial speech rate
    pub speed: f64,
    /// Rates offered by the speed control
    pub speed_presets: Vec<f64>,
    /// Start with looping enabled
    pub looping: bool,
    /// Start in quiz mode
    pub quiz_mode: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            page_size: 1,
            speed: 1.0,
            speed_presets: vec![0.8, 1.0, 1.2],
            looping: false,
            quiz_mode: false,
        }
    }
}

impl PlaybackConfig {
    pub fn options(&self) -> PlaybackOptions {
        PlaybackOptions {
            page_size: self.page_size,
            speed: self.speed,
            looping: self.looping,
            quiz_mode: self.quiz_mode,
        }
    }
}

/// `[speech]` section, used by the simulated engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Reading pace at rate 1.0
    pub words_per_minute: u32,
    pub min_rate: f64,
    pub max_rate: f64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        let rates = RateRange::default();
        Self {
            words_per_minute: 160,
            min_rate: rates.min,
            max_rate: rates.max,
        }
    }
}

impl SpeechConfig {
    pub fn rate_range(&self) -> RateRange {
        RateRange::new(self.min_rate, self.max_rate)
    }
}

/// `[log]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default level filter, overridden by `READALONG_LOG`
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("readalong").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Directory for the session log.
    pub fn log_dir() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("readalong"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, content).map_err(write_err)
    }
}
