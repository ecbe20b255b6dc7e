//! Speech engine boundary.
//!
//! The reader never renders audio itself. It talks to a [`SpeechDriver`]
//! that accepts one utterance at a time and reports progress back as
//! [`SpeechEvent`] values tagged with the utterance they belong to.
//!
//! Driver contract:
//! - `speak` cancels whatever is in flight before starting, so at most one
//!   utterance is ever active.
//! - An empty text starts nothing and produces no events.
//! - A started utterance produces zero or more `Boundary` events with
//!   non-decreasing offsets, then exactly one `End`, unless it is cancelled.
//! - After `cancel` returns, the cancelled utterance emits nothing more.

mod error;
mod scripted;
mod simulated;

pub use error::SpeechError;
pub use scripted::{ScriptedSpeech, SpokenUtterance};
pub use simulated::SimulatedSpeech;

use std::fmt;

/// Identifies one `speak` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UtteranceId(u64);

impl UtteranceId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Progress reported by a speech engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechEvent {
    /// The engine reached `char_index` in the utterance text
    Boundary {
        utterance: UtteranceId,
        char_index: usize,
    },
    /// The utterance finished playing
    End { utterance: UtteranceId },
}

impl SpeechEvent {
    pub fn utterance(&self) -> UtteranceId {
        match self {
            Self::Boundary { utterance, .. } | Self::End { utterance } => *utterance,
        }
    }
}

/// A speech engine that can speak one utterance at a time.
pub trait SpeechDriver {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Start speaking `text` at `rate` (1.0 = normal).
    ///
    /// Cancels any in-flight utterance first. Returns `Ok(None)` when there
    /// is nothing to say.
    fn speak(&mut self, text: &str, rate: f64) -> Result<Option<UtteranceId>, SpeechError>;

    /// Stop the in-flight utterance, if any. Idempotent.
    fn cancel(&mut self);
}

/// Rate limits accepted by a driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
}

impl RateRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Check that `rate` is finite, positive and within range.
    pub fn check(&self, rate: f64) -> Result<(), SpeechError> {
        if rate.is_finite() && rate > 0.0 && rate >= self.min && rate <= self.max {
            Ok(())
        } else {
            Err(SpeechError::UnsupportedRate {
                rate,
                min: self.min,
                max: self.max,
            })
        }
    }
}

impl Default for RateRange {
    /// The range web speech engines accept.
    fn default() -> Self {
        Self {
            min: 0.1,
            max: 10.0,
        }
    }
}

/// Character offsets at which each whitespace-separated word starts.
pub fn word_starts(text: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut in_word = false;
    for (index, ch) in text.chars().enumerate() {
        if ch.is_whitespace() {
            in_word = false;
        } else if !in_word {
            starts.push(index);
            in_word = true;
        }
    }
    starts
}
