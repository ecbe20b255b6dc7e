//! Read-along playback synchronization.
//!
//! # Architecture
//!
//! - `segment`: sentence text + notes → plain/annotated spans
//! - `reveal`: which span the speech cursor is on, manual reveals, quiz masking
//! - `state`: `PlaybackEngine`, the playback state machine driving speech
//! - `navigation`: `Command` validation and dispatch
//! - `input`, `render`: keyboard mapping and drawing for the terminal session
//!
//! # Usage
//!
//! ```
//! use readalong::content::{Chapter, Note, Sentence};
//! use readalong::reader::{apply, Command, PlaybackEngine, PlaybackOptions};
//! use readalong::speech::ScriptedSpeech;
//!
//! let chapter = Chapter::new(
//!     "Chapter 1",
//!     vec![Sentence::new(1, "The quick fox").with_note(Note::new("quick", "빠른"))],
//! );
//! let mut engine = PlaybackEngine::new(chapter, ScriptedSpeech::new(), PlaybackOptions::default());
//!
//! apply(&mut engine, Command::Start, &[]);
//! let boundary = engine.driver().boundary(4).unwrap();
//! engine.handle_speech_event(boundary);
//!
//! assert_eq!(engine.active_span().unwrap().text, "quick");
//! ```

pub mod input;
pub mod navigation;
pub mod render;
pub mod reveal;
pub mod segment;
pub mod state;

pub use navigation::{apply, Command};
pub use reveal::{active_span, RevealState};
pub use segment::{segment, Span};
pub use state::{Cursor, PlaybackEngine, PlaybackMode, PlaybackOptions, PlaybackPosition, Status};
