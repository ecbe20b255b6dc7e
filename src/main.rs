mod commands;

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use readalong::cli::{Cli, Commands, ConfigCommands};
use readalong::Config;

/// Environment variable overriding the log filter.
const LOG_ENV: &str = "READALONG_LOG";

/// Install the log subscriber.
///
/// The interactive session owns the screen, so its logs go to a file in the
/// data directory. Everything else logs to stderr.
fn init_tracing(level: &str, to_file: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| format!("readalong={}", level).into());

    if to_file {
        let file = Config::log_dir().and_then(|dir| {
            fs::create_dir_all(&dir).ok()?;
            File::create(dir.join("readalong.log")).ok()
        });
        if let Some(file) = file {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Config::config_path()?),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Only a session that can actually run takes over the log file
    let interactive = matches!(&cli.command, Commands::Play(args) if !args.dry_run)
        && atty::is(atty::Stream::Stdout);
    init_tracing(&config.log.level, interactive);

    match cli.command {
        Commands::Play(args) => commands::play::handle(&args, &config),
        Commands::Spans { chapter, sentence } => commands::spans::handle(&chapter, sentence),
        Commands::Check { chapter } => commands::check::handle(&chapter),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(&config),
            ConfigCommands::Init { force } => {
                commands::config::handle_init(&config_path(cli.config.as_deref())?, force)
            }
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "readalong", &mut io::stdout());
            Ok(())
        }
    }
}
