//! Play subcommand handler

use std::io;

use anyhow::{bail, Context, Result};

use readalong::cli::PlayArgs;
use readalong::reader::{PlaybackEngine, PlaybackOptions};
use readalong::session::{dry_run, run_interactive};
use readalong::speech::{ScriptedSpeech, SimulatedSpeech};
use readalong::{Chapter, Config};

/// Merge command-line overrides into the configured playback options.
fn playback_options(args: &PlayArgs, config: &Config) -> Result<PlaybackOptions> {
    let mut options = config.playback.options();
    if let Some(page_size) = args.page_size {
        if page_size == 0 {
            bail!("--page-size must be at least 1");
        }
        options.page_size = page_size;
    }
    if let Some(speed) = args.speed {
        config
            .speech
            .rate_range()
            .check(speed)
            .with_context(|| format!("Invalid --speed {}", speed))?;
        options.speed = speed;
    }
    options.looping |= args.looping;
    options.quiz_mode |= args.quiz;
    Ok(options)
}

/// Read a chapter, interactively or as a dry run.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &PlayArgs, config: &Config) -> Result<()> {
    let chapter = Chapter::load(&args.chapter)
        .with_context(|| format!("Failed to load chapter {}", args.chapter.display()))?;
    let options = playback_options(args, config)?;
    let presets = &config.playback.speed_presets;

    if args.dry_run {
        let mut engine = PlaybackEngine::new(chapter, ScriptedSpeech::new(), options);
        dry_run(&mut engine, presets, &mut io::stdout().lock())?;
        return Ok(());
    }

    if !atty::is(atty::Stream::Stdout) {
        bail!("play needs a terminal; use --dry-run to read without one");
    }

    let words_per_minute = args.wpm.unwrap_or(config.speech.words_per_minute);
    let (speech, events) = SimulatedSpeech::new(words_per_minute, config.speech.rate_range());
    let mut engine = PlaybackEngine::new(chapter, speech, options);
    let summary = run_interactive(&mut engine, &events, presets)?;

    println!(
        "Read up to sentence {} of {}, earned {} star(s)",
        summary.last_sentence,
        engine.chapter().len(),
        summary.stars
    );
    Ok(())
}
