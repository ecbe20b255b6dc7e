//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Read-along reading trainer
#[derive(Debug, Parser)]
#[command(name = "readalong", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read a chapter aloud, highlighting the spoken word
    #[command(long_about = "Read a chapter aloud in a full-screen session.

Sentences are spoken one at a time (or a page at a time with --page-size).
The word being spoken is highlighted and annotated phrases reveal their
meaning as the reader reaches them. Every sentence read to the end earns
a star.

KEYS:
    space        Play / pause
    n, Right     Next sentence
    p, Left      Previous sentence
    ], PageDown  Next page
    [, PageUp    Previous page
    l            Toggle loop
    z            Toggle quiz mode
    s            Cycle speed
    1-9          Reveal an annotated phrase
    t            Toggle translation
    q, Esc       Quit

EXAMPLES:
    readalong play chapter1.json
    readalong play chapter1.json --page-size 4 --speed 0.8
    readalong play chapter1.json --dry-run")]
    Play(PlayArgs),

    /// Print how sentences are split into plain and annotated spans
    Spans {
        /// Chapter file (JSON)
        chapter: PathBuf,

        /// Only this sentence (1-based)
        #[arg(short, long, value_name = "N")]
        sentence: Option<usize>,
    },

    /// Check a chapter for notes that cannot be shown
    Check {
        /// Chapter file (JSON)
        chapter: PathBuf,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Print shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Chapter file (JSON)
    pub chapter: PathBuf,

    /// Sentences per page (overrides config)
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Speech rate, 1.0 is normal (overrides config)
    #[arg(long, value_name = "RATE")]
    pub speed: Option<f64>,

    /// Reading pace of the simulated voice (overrides config)
    #[arg(long, value_name = "N")]
    pub wpm: Option<u32>,

    /// Start with loop enabled
    #[arg(long = "loop")]
    pub looping: bool,

    /// Start with quiz mode enabled
    #[arg(long)]
    pub quiz: bool,

    /// Read through the chapter without timing or terminal control
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
