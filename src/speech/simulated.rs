//! Simulated speech engine.
//!
//! Stands in for a real synthesizer: each utterance runs on its own worker
//! thread that walks the words of the text at a fixed pace and sends a
//! boundary event per word, then an end event, over an mpsc channel.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::{word_starts, RateRange, SpeechDriver, SpeechError, SpeechEvent, UtteranceId};

/// Pause after the last word before the end event.
const TRAILING_PAUSE: Duration = Duration::from_millis(150);

/// Speech engine that emits timed word boundaries without producing audio.
pub struct SimulatedSpeech {
    tx: Sender<SpeechEvent>,
    /// Utterance allowed to emit events; 0 when none.
    ///
    /// Workers hold the lock while sending, so once `cancel` has stored 0
    /// no event of the cancelled utterance can be sent.
    active: Arc<Mutex<u64>>,
    next_id: u64,
    words_per_minute: u32,
    rates: RateRange,
}

impl SimulatedSpeech {
    /// Create the engine and the receiver its events arrive on.
    pub fn new(words_per_minute: u32, rates: RateRange) -> (Self, Receiver<SpeechEvent>) {
        let (tx, rx) = mpsc::channel();
        let engine = Self {
            tx,
            active: Arc::new(Mutex::new(0)),
            next_id: 1,
            words_per_minute: words_per_minute.max(1),
            rates,
        };
        (engine, rx)
    }

    /// Time spent on each word at `rate`.
    pub fn word_duration(&self, rate: f64) -> Duration {
        let per_word_ms = 60_000.0 / (self.words_per_minute as f64 * rate);
        Duration::from_millis(per_word_ms.round() as u64)
    }

    fn set_active(&self, id: u64) {
        *self.active.lock().unwrap_or_else(|e| e.into_inner()) = id;
    }
}

impl SpeechDriver for SimulatedSpeech {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn speak(&mut self, text: &str, rate: f64) -> Result<Option<UtteranceId>, SpeechError> {
        self.cancel();
        self.rates.check(rate)?;
        if text.is_empty() {
            return Ok(None);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.set_active(id);

        let utterance = UtteranceId::new(id);
        let starts = word_starts(text);
        let word_duration = self.word_duration(rate);
        let tx = self.tx.clone();
        let active = Arc::clone(&self.active);

        thread::Builder::new()
            .name(format!("speech-{}", id))
            .spawn(move || utterance_loop(utterance, starts, word_duration, tx, active))
            .map_err(|e| SpeechError::Engine(e.to_string()))?;

        tracing::trace!(%utterance, rate, "simulated utterance started");
        Ok(Some(utterance))
    }

    fn cancel(&mut self) {
        self.set_active(0);
    }
}

/// Worker body for one utterance.
///
/// Exits early as soon as the utterance is no longer the active one, or the
/// receiving side has gone away.
fn utterance_loop(
    utterance: UtteranceId,
    starts: Vec<usize>,
    word_duration: Duration,
    tx: Sender<SpeechEvent>,
    active: Arc<Mutex<u64>>,
) {
    let send_if_active = |event: SpeechEvent| -> bool {
        let guard = active.lock().unwrap_or_else(|e| e.into_inner());
        if *guard != utterance.get() {
            return false;
        }
        tx.send(event).is_ok()
    };

    for char_index in starts {
        if !send_if_active(SpeechEvent::Boundary {
            utterance,
            char_index,
        }) {
            return;
        }
        thread::sleep(word_duration);
    }

    thread::sleep(TRAILING_PAUSE);

    let mut guard = active.lock().unwrap_or_else(|e| e.into_inner());
    if *guard == utterance.get() && tx.send(SpeechEvent::End { utterance }).is_ok() {
        *guard = 0;
    }
}
