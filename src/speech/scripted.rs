//! Deterministic speech driver.
//!
//! Records every request and only produces events when asked to. Used by
//! the test suite and by `play --dry-run`, where the caller decides when a
//! word boundary is reached or an utterance ends.

use super::{RateRange, SpeechDriver, SpeechError, SpeechEvent, UtteranceId};

/// A `speak` request as seen by the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct SpokenUtterance {
    pub id: UtteranceId,
    pub text: String,
    pub rate: f64,
}

/// Speech driver whose events are produced by hand.
#[derive(Debug, Default)]
pub struct ScriptedSpeech {
    spoken: Vec<SpokenUtterance>,
    active: Option<UtteranceId>,
    cancels: usize,
    next_id: u64,
    rates: RateRange,
    failure: Option<SpeechError>,
}

impl ScriptedSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `speak` fail with `error` until cleared.
    pub fn fail_with(&mut self, error: SpeechError) {
        self.failure = Some(error);
    }

    pub fn clear_failure(&mut self) {
        self.failure = None;
    }

    /// All utterances started so far, oldest first.
    pub fn spoken(&self) -> &[SpokenUtterance] {
        &self.spoken
    }

    pub fn last_spoken(&self) -> Option<&SpokenUtterance> {
        self.spoken.last()
    }

    /// Texts of all utterances started so far.
    pub fn spoken_texts(&self) -> Vec<&str> {
        self.spoken.iter().map(|u| u.text.as_str()).collect()
    }

    /// Number of `cancel` calls that stopped an active utterance.
    pub fn cancels(&self) -> usize {
        self.cancels
    }

    /// The utterance currently in flight.
    pub fn active(&self) -> Option<UtteranceId> {
        self.active
    }

    /// Boundary event for the active utterance.
    pub fn boundary(&self, char_index: usize) -> Option<SpeechEvent> {
        self.active.map(|utterance| SpeechEvent::Boundary {
            utterance,
            char_index,
        })
    }

    /// End event for the active utterance, which is then no longer active.
    pub fn finish(&mut self) -> Option<SpeechEvent> {
        self.active
            .take()
            .map(|utterance| SpeechEvent::End { utterance })
    }
}

impl SpeechDriver for ScriptedSpeech {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn speak(&mut self, text: &str, rate: f64) -> Result<Option<UtteranceId>, SpeechError> {
        self.cancel();
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.rates.check(rate)?;
        if text.is_empty() {
            return Ok(None);
        }

        self.next_id += 1;
        let id = UtteranceId::new(self.next_id);
        self.spoken.push(SpokenUtterance {
            id,
            text: text.to_string(),
            rate,
        });
        self.active = Some(id);
        Ok(Some(id))
    }

    fn cancel(&mut self) {
        if self.active.take().is_some() {
            self.cancels += 1;
        }
    }
}
