//! Reading sessions.
//!
//! Two ways to drive a [`PlaybackEngine`]:
//!
//! - [`run_interactive`]: full-screen terminal session. Keyboard input and
//!   speech events are handled on one thread, in arrival order.
//! - [`dry_run`]: reads the chapter through a [`ScriptedSpeech`] driver,
//!   reporting each utterance and the annotations it passes, without any
//!   timing or terminal control.

use std::io::{self, Write};
use std::sync::mpsc::Receiver;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use crate::reader::input::{handle_key_event, InputResult};
use crate::reader::render::{render_page, ViewOptions};
use crate::reader::{apply, Command, PlaybackEngine};
use crate::speech::{word_starts, ScriptedSpeech, SpeechDriver, SpeechEvent};

/// How long to wait for input before checking speech events again.
const POLL_INTERVAL: Duration = Duration::from_millis(30);

/// Outcome of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Stars earned during the session
    pub stars: u64,
    /// Utterances spoken to the end
    pub utterances: usize,
    /// One-based number of the last sentence reached
    pub last_sentence: usize,
}

impl SessionSummary {
    fn from_engine<D: SpeechDriver>(engine: &PlaybackEngine<D>, utterances: usize) -> Self {
        Self {
            stars: engine.stars(),
            utterances,
            last_sentence: engine.position().sentence_index() + 1,
        }
    }
}

/// Restores the terminal when dropped, including on early return.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut impl Write) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Run the full-screen read-along session until the reader quits.
///
/// # Arguments
/// * `engine` - Engine over the chapter, not yet started
/// * `events` - Receiver the engine's speech driver reports on
/// * `presets` - Speed presets for the speed key
#[cfg(not(tarpaulin_include))]
pub fn run_interactive<D: SpeechDriver>(
    engine: &mut PlaybackEngine<D>,
    events: &Receiver<SpeechEvent>,
    presets: &[f64],
) -> Result<SessionSummary> {
    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout)?;

    let (cols, _rows) = terminal::size().unwrap_or((80, 24));
    let mut view = ViewOptions {
        width: cols,
        ..ViewOptions::default()
    };
    let mut view_dirty = true;

    apply(engine, Command::Start, presets);

    loop {
        for speech_event in events.try_iter() {
            engine.handle_speech_event(speech_event);
        }

        if engine.needs_render || view_dirty {
            queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
            render_page(&mut stdout, engine, &view)?;
            stdout.flush()?;
            engine.needs_render = false;
            view_dirty = false;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => match handle_key_event(key) {
                InputResult::Command(command) => {
                    if !apply(engine, command, presets) {
                        tracing::debug!(?command, "command rejected");
                    }
                }
                InputResult::ToggleTranslation => {
                    view.show_translation = !view.show_translation;
                    view_dirty = true;
                }
                InputResult::ToggleHelp => {
                    view.show_help = !view.show_help;
                    view_dirty = true;
                }
                InputResult::Quit => break,
                InputResult::Ignored => {}
            },
            Event::Resize(new_cols, _) => {
                view.width = new_cols;
                view_dirty = true;
            }
            _ => {} // Ignore mouse, focus, paste
        }
    }

    engine.stop();
    let completed = engine.stars() as usize;
    Ok(SessionSummary::from_engine(engine, completed))
}

/// Read the chapter with a scripted driver and report what was spoken.
///
/// Every utterance is walked word by word so the annotations the cursor
/// passes are reported, then completed. Stops when playback stops, or
/// after twice the chapter length when looping.
pub fn dry_run(
    engine: &mut PlaybackEngine<ScriptedSpeech>,
    presets: &[f64],
    out: &mut impl Write,
) -> Result<SessionSummary> {
    let chapter = engine.chapter();
    if chapter.book_title.is_empty() {
        writeln!(out, "{}", chapter.title)?;
    } else {
        writeln!(out, "{} - {}", chapter.book_title, chapter.title)?;
    }
    let total = chapter.len();
    let limit = total * 2;

    apply(engine, Command::Start, presets);

    let mut utterances = 0;
    while utterances < limit {
        let Some(spoken) = engine.driver().last_spoken().cloned() else {
            break;
        };
        if engine.driver().active() != Some(spoken.id) {
            break;
        }
        utterances += 1;
        writeln!(
            out,
            "{:>3}. [{}/{}] {} ({:.1}x)",
            utterances,
            engine.position().sentence_index() + 1,
            total,
            spoken.text,
            spoken.rate
        )?;

        let mut last_note: Option<usize> = None;
        for char_index in word_starts(&spoken.text) {
            let Some(boundary) = engine.driver().boundary(char_index) else {
                break;
            };
            engine.handle_speech_event(boundary);

            let Some(span) = engine.active_span() else {
                continue;
            };
            let Some(note) = &span.note else {
                continue;
            };
            if last_note != Some(span.start) {
                writeln!(out, "       {} = {}", span.text, note.meaning)?;
                last_note = Some(span.start);
            }
        }

        match engine.driver_mut().finish() {
            Some(end) => engine.handle_speech_event(end),
            None => break,
        }
    }

    engine.stop();
    let summary = SessionSummary::from_engine(engine, utterances);
    writeln!(
        out,
        "Finished: {} utterance(s), {} star(s)",
        summary.utterances, summary.stars
    )?;
    Ok(summary)
}
