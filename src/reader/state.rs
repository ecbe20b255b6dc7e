//! Playback state machine.
//!
//! `PlaybackEngine` owns everything that changes while reading: the current
//! position, the playback mode, the speech cursor and the star counter. It
//! drives a [`SpeechDriver`] and reacts to the events that driver reports.
//!
//! All mutation happens on the caller's thread, through the methods below
//! or through [`crate::reader::navigation::apply`].

use crate::content::{Chapter, Sentence};
use crate::speech::{SpeechDriver, SpeechEvent, UtteranceId};

use super::reveal::{active_span, RevealState};
use super::segment::{segment, Span};

/// Where the reader currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackPosition {
    /// Index of the first sentence of the current page
    pub unit_index: usize,
    /// Which sentence within the page is speaking (0 with page size 1)
    pub page_offset: usize,
}

impl PlaybackPosition {
    pub fn new(unit_index: usize, page_offset: usize) -> Self {
        Self {
            unit_index,
            page_offset,
        }
    }

    /// Absolute index of the speaking sentence.
    pub fn sentence_index(&self) -> usize {
        self.unit_index + self.page_offset
    }
}

/// Play/loop/speed/quiz flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackMode {
    pub is_playing: bool,
    pub is_looping: bool,
    /// Speech rate multiplier (1.0 = normal)
    pub speed: f64,
    pub is_quiz_mode: bool,
}

impl Default for PlaybackMode {
    fn default() -> Self {
        Self {
            is_playing: false,
            is_looping: false,
            speed: 1.0,
            is_quiz_mode: false,
        }
    }
}

/// Last position reported by the speech engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Sentence within the page the cursor belongs to
    pub page_offset: usize,
    /// Character index in that sentence, `None` until the first boundary
    pub char_index: Option<usize>,
}

impl Cursor {
    pub fn reset(page_offset: usize) -> Self {
        Self {
            page_offset,
            char_index: None,
        }
    }
}

/// Stars earned by completed utterances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stars(u64);

impl Stars {
    pub fn count(&self) -> u64 {
        self.0
    }

    pub fn award(&mut self) {
        self.0 += 1;
    }
}

/// Whether an utterance is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Speaking(UtteranceId),
}

/// Construction options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackOptions {
    /// Sentences per page; 1 reads sentence by sentence
    pub page_size: usize,
    /// Initial speech rate
    pub speed: f64,
    pub looping: bool,
    pub quiz_mode: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            page_size: 1,
            speed: 1.0,
            looping: false,
            quiz_mode: false,
        }
    }
}

/// Page-aware playback over a chapter.
#[derive(Debug)]
pub struct PlaybackEngine<D> {
    chapter: Chapter,
    driver: D,
    page_size: usize,
    position: PlaybackPosition,
    mode: PlaybackMode,
    cursor: Cursor,
    stars: Stars,
    status: Status,
    started: bool,
    /// Spans of every sentence on the current page
    page_spans: Vec<Vec<Span>>,
    /// Manual reveals of every sentence on the current page
    reveals: Vec<RevealState>,
    /// True when the screen needs to be redrawn
    pub needs_render: bool,
}

impl<D: SpeechDriver> PlaybackEngine<D> {
    pub fn new(chapter: Chapter, driver: D, options: PlaybackOptions) -> Self {
        let speed = if options.speed.is_finite() && options.speed > 0.0 {
            options.speed
        } else {
            tracing::warn!(speed = options.speed, "invalid initial speed, using 1.0");
            1.0
        };

        let mut engine = Self {
            chapter,
            driver,
            page_size: options.page_size.max(1),
            position: PlaybackPosition::default(),
            mode: PlaybackMode {
                is_playing: false,
                is_looping: options.looping,
                speed,
                is_quiz_mode: options.quiz_mode,
            },
            cursor: Cursor::default(),
            stars: Stars::default(),
            status: Status::Idle,
            started: false,
            page_spans: Vec::new(),
            reveals: Vec::new(),
            needs_render: true,
        };
        engine.refresh_page();
        engine
    }

    // === Read access ===

    pub fn chapter(&self) -> &Chapter {
        &self.chapter
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn position(&self) -> PlaybackPosition {
        self.position
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn stars(&self) -> u64 {
        self.stars.count()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of sentences on the current page (the last page may be short).
    pub fn page_len(&self) -> usize {
        self.chapter
            .len()
            .saturating_sub(self.position.unit_index)
            .min(self.page_size)
    }

    /// Sentences on the current page.
    pub fn page_sentences(&self) -> &[Sentence] {
        let start = self.position.unit_index.min(self.chapter.len());
        &self.chapter.sentences[start..start + self.page_len()]
    }

    /// The sentence currently being read.
    pub fn current_sentence(&self) -> Option<&Sentence> {
        self.chapter.sentence(self.position.sentence_index())
    }

    /// Spans of the sentence at `page_offset` on the current page.
    pub fn spans(&self, page_offset: usize) -> &[Span] {
        self.page_spans
            .get(page_offset)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Spans of the sentence currently being read.
    pub fn current_spans(&self) -> &[Span] {
        self.spans(self.position.page_offset)
    }

    /// Manual reveal state of the sentence at `page_offset`.
    pub fn reveal(&self, page_offset: usize) -> RevealState {
        self.reveals.get(page_offset).copied().unwrap_or_default()
    }

    /// The span under the speech cursor.
    pub fn active_span(&self) -> Option<&Span> {
        active_span(self.spans(self.cursor.page_offset), self.cursor.char_index)
    }

    /// Fraction of the chapter reached, counting the current sentence.
    pub fn progress(&self) -> f64 {
        if self.chapter.is_empty() {
            return 0.0;
        }
        (self.position.sentence_index() + 1) as f64 / self.chapter.len() as f64
    }

    // === Commands ===

    /// Open the reading session and start playing.
    ///
    /// Nothing is spoken before the session is started.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        tracing::info!(
            title = %self.chapter.title,
            sentences = self.chapter.len(),
            page_size = self.page_size,
            "reading session started"
        );
        self.needs_render = true;
        self.play();
        true
    }

    /// Start speaking the current sentence if idle.
    pub fn play(&mut self) -> bool {
        if !self.started || self.chapter.is_empty() {
            return false;
        }
        if let Status::Speaking(_) = self.status {
            return false;
        }
        self.mode.is_playing = true;
        self.speak_current();
        true
    }

    /// Stop speaking and stay on the current sentence.
    ///
    /// A later `play` restarts the sentence from the beginning.
    pub fn pause(&mut self) {
        self.cancel_in_flight();
        self.mode.is_playing = false;
        self.cursor = Cursor::reset(self.position.page_offset);
        self.needs_render = true;
    }

    /// Stop playback, used when the session ends.
    pub fn stop(&mut self) {
        self.pause();
        tracing::info!(stars = self.stars.count(), "reading session stopped");
    }

    pub fn toggle_play(&mut self) -> bool {
        if self.mode.is_playing {
            self.pause();
            true
        } else {
            self.play()
        }
    }

    pub fn toggle_loop(&mut self) {
        self.mode.is_looping = !self.mode.is_looping;
        self.needs_render = true;
    }

    pub fn toggle_quiz_mode(&mut self) {
        self.mode.is_quiz_mode = !self.mode.is_quiz_mode;
        self.needs_render = true;
    }

    /// Change the speech rate for the next utterance.
    ///
    /// The utterance in flight keeps its rate. Non-positive or non-finite
    /// rates are rejected.
    pub fn set_speed(&mut self, speed: f64) -> bool {
        if !speed.is_finite() || speed <= 0.0 {
            return false;
        }
        self.mode.speed = speed;
        self.needs_render = true;
        true
    }

    /// Toggle the manual reveal of a span in the current sentence.
    pub fn toggle_reveal(&mut self, span_index: usize) -> bool {
        let offset = self.position.page_offset;
        let Some(spans) = self.page_spans.get(offset) else {
            return false;
        };
        let Some(reveal) = self.reveals.get_mut(offset) else {
            return false;
        };
        let toggled = reveal.toggle(spans, span_index);
        self.needs_render |= toggled;
        toggled
    }

    /// Move to `position`, cancelling speech first.
    ///
    /// With `resume` the new sentence is spoken right away, otherwise
    /// playback is left paused. Callers validate the position and only
    /// resume a started session.
    pub(crate) fn move_to(&mut self, position: PlaybackPosition, resume: bool) {
        self.cancel_in_flight();

        let page_changed = position.unit_index != self.position.unit_index;
        self.position = position;
        if page_changed {
            self.refresh_page();
        } else {
            self.enter_offset(position.page_offset);
        }
        tracing::debug!(
            unit_index = position.unit_index,
            page_offset = position.page_offset,
            resume,
            "moved"
        );

        self.needs_render = true;
        if resume {
            self.mode.is_playing = true;
            self.speak_current();
        } else {
            self.mode.is_playing = false;
        }
    }

    // === Speech events ===

    /// Apply an event reported by the speech driver.
    ///
    /// Events for any utterance other than the one in flight are stale and
    /// ignored.
    pub fn handle_speech_event(&mut self, event: SpeechEvent) {
        let current = match self.status {
            Status::Speaking(id) if id == event.utterance() => id,
            _ => {
                tracing::trace!(?event, "discarding stale speech event");
                return;
            }
        };

        match event {
            SpeechEvent::Boundary { char_index, .. } => {
                self.cursor.char_index = Some(char_index);
                self.needs_render = true;
            }
            SpeechEvent::End { .. } => {
                tracing::debug!(utterance = %current, "utterance finished");
                self.status = Status::Idle;
                self.finish_utterance();
            }
        }
    }

    /// Award the star for a completed utterance and decide what comes next.
    fn finish_utterance(&mut self) {
        self.stars.award();
        self.cursor = Cursor::reset(self.position.page_offset);
        self.needs_render = true;

        let page_len = self.page_len();
        let next_offset = self.position.page_offset + 1;

        if self.mode.is_looping && self.page_size == 1 {
            self.speak_current();
        } else if next_offset < page_len {
            self.enter_offset(next_offset);
            self.speak_current();
        } else if self.mode.is_looping {
            self.enter_offset(0);
            self.speak_current();
        } else if self.page_size == 1 && self.position.unit_index + 1 < self.chapter.len() {
            self.position.unit_index += 1;
            self.refresh_page();
            self.speak_current();
        } else {
            tracing::info!(stars = self.stars.count(), "reached end of content");
            self.mode.is_playing = false;
        }
    }

    // === Internals ===

    /// Issue `speak` for the current sentence.
    ///
    /// Driver failures and empty sentences leave the engine idle and paused.
    fn speak_current(&mut self) {
        let index = self.position.sentence_index();
        let Some(sentence) = self.chapter.sentence(index) else {
            self.mode.is_playing = false;
            self.status = Status::Idle;
            return;
        };

        self.needs_render = true;
        match self.driver.speak(&sentence.text, self.mode.speed) {
            Ok(Some(id)) => {
                tracing::debug!(
                    utterance = %id,
                    sentence = index,
                    speed = self.mode.speed,
                    driver = self.driver.name(),
                    "speaking"
                );
                self.status = Status::Speaking(id);
            }
            Ok(None) => {
                tracing::debug!(sentence = index, "nothing to speak, pausing");
                self.status = Status::Idle;
                self.mode.is_playing = false;
            }
            Err(e) => {
                tracing::warn!(sentence = index, error = %e, "speech failed, pausing");
                self.status = Status::Idle;
                self.mode.is_playing = false;
            }
        }
    }

    /// Make `page_offset` the speaking sentence of the current page.
    ///
    /// The cursor and any manual reveal on that sentence start over.
    fn enter_offset(&mut self, page_offset: usize) {
        self.position.page_offset = page_offset;
        self.cursor = Cursor::reset(page_offset);
        if let Some(reveal) = self.reveals.get_mut(page_offset) {
            reveal.clear();
        }
    }

    fn cancel_in_flight(&mut self) {
        if let Status::Speaking(id) = self.status {
            tracing::trace!(utterance = %id, "cancelling");
            self.driver.cancel();
            self.status = Status::Idle;
        }
    }

    /// Recompute spans and reveals for the current page.
    fn refresh_page(&mut self) {
        let page: Vec<Vec<Span>> = self
            .page_sentences()
            .iter()
            .map(|s| segment(&s.text, &s.notes))
            .collect();
        self.reveals = vec![RevealState::new(); page.len()];
        self.page_spans = page;
        self.cursor = Cursor::reset(self.position.page_offset);
    }
}
