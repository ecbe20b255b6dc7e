//! Reader commands.
//!
//! Every user-facing change to playback goes through [`apply`], which checks
//! the command against the chapter bounds before touching the engine.
//! Commands that would leave the chapter are rejected without side effects.

use crate::speech::SpeechDriver;

use super::state::{PlaybackEngine, PlaybackPosition};

/// A user command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Open the reading session and start playing
    Start,
    Play,
    Pause,
    TogglePlay,
    ToggleLoop,
    SetSpeed(f64),
    /// Step through the configured speed presets
    CycleSpeed,
    ToggleQuizMode,
    NextSentence,
    PrevSentence,
    NextPage,
    PrevPage,
    /// Go to a sentence by absolute index, playing it once started
    JumpTo(usize),
    /// Tap the nth annotated phrase (zero-based) of the current sentence
    ToggleReveal(usize),
}

/// Apply `command` to the engine.
///
/// Returns whether the command was accepted. `presets` is the list used by
/// [`Command::CycleSpeed`].
pub fn apply<D: SpeechDriver>(
    engine: &mut PlaybackEngine<D>,
    command: Command,
    presets: &[f64],
) -> bool {
    tracing::trace!(?command, "command");
    match command {
        Command::Start => engine.start(),
        Command::Play => engine.play(),
        Command::Pause => {
            engine.pause();
            true
        }
        Command::TogglePlay => engine.toggle_play(),
        Command::ToggleLoop => {
            engine.toggle_loop();
            true
        }
        Command::SetSpeed(speed) => engine.set_speed(speed),
        Command::CycleSpeed => match next_preset(presets, engine.mode().speed) {
            Some(speed) => engine.set_speed(speed),
            None => false,
        },
        Command::ToggleQuizMode => {
            engine.toggle_quiz_mode();
            true
        }
        Command::NextSentence => next_sentence(engine),
        Command::PrevSentence => prev_sentence(engine),
        Command::NextPage => next_page(engine),
        Command::PrevPage => prev_page(engine),
        Command::JumpTo(index) => jump_to(engine, index),
        Command::ToggleReveal(nth) => {
            let span_index = engine
                .current_spans()
                .iter()
                .enumerate()
                .filter(|(_, span)| span.is_annotated())
                .nth(nth)
                .map(|(i, _)| i);
            match span_index {
                Some(i) => engine.toggle_reveal(i),
                None => false,
            }
        }
    }
}

/// Page-aligned position of the sentence at `index`.
fn position_for(index: usize, page_size: usize) -> PlaybackPosition {
    let page_size = page_size.max(1);
    let offset = index % page_size;
    PlaybackPosition::new(index - offset, offset)
}

/// Preset following `current`, wrapping around.
fn next_preset(presets: &[f64], current: f64) -> Option<f64> {
    if presets.is_empty() {
        return None;
    }
    let next = presets
        .iter()
        .position(|&p| (p - current).abs() < f64::EPSILON)
        .map(|i| (i + 1) % presets.len())
        .unwrap_or(0);
    Some(presets[next])
}

/// Move to the following sentence, keeping the play state.
fn next_sentence<D: SpeechDriver>(engine: &mut PlaybackEngine<D>) -> bool {
    let target = engine.position().sentence_index() + 1;
    if target >= engine.chapter().len() {
        return false;
    }
    let resume = engine.mode().is_playing;
    engine.move_to(position_for(target, engine.page_size()), resume);
    true
}

/// Move to the preceding sentence, keeping the play state.
fn prev_sentence<D: SpeechDriver>(engine: &mut PlaybackEngine<D>) -> bool {
    let current = engine.position().sentence_index();
    if current == 0 {
        return false;
    }
    let resume = engine.mode().is_playing;
    engine.move_to(position_for(current - 1, engine.page_size()), resume);
    true
}

/// Move to the following page and pause.
fn next_page<D: SpeechDriver>(engine: &mut PlaybackEngine<D>) -> bool {
    let position = engine.position();
    let page_size = engine.page_size();
    if position.unit_index + page_size >= engine.chapter().len() {
        return false;
    }
    engine.move_to(PlaybackPosition::new(position.unit_index + page_size, 0), false);
    true
}

/// Move to the preceding page and pause.
///
/// Less than a full page before the current one clamps to the first sentence.
fn prev_page<D: SpeechDriver>(engine: &mut PlaybackEngine<D>) -> bool {
    let position = engine.position();
    if position.unit_index == 0 {
        return false;
    }
    let unit_index = position.unit_index.saturating_sub(engine.page_size());
    engine.move_to(PlaybackPosition::new(unit_index, 0), false);
    true
}

/// Go to an absolute sentence, playing it once the session has started.
fn jump_to<D: SpeechDriver>(engine: &mut PlaybackEngine<D>, index: usize) -> bool {
    if index >= engine.chapter().len() {
        return false;
    }
    let resume = engine.is_started();
    engine.move_to(position_for(index, engine.page_size()), resume);
    true
}
