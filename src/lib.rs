//! readalong - read-along reading trainer
//!
//! Plays a chapter sentence by sentence (or page by page) through a speech
//! engine while tracking the spoken word, masks annotated phrases in quiz
//! mode, and counts a star for every sentence read aloud.

pub mod cli;
pub mod config;
pub mod content;
pub mod reader;
pub mod session;
pub mod speech;

pub use config::Config;
pub use content::{Chapter, Note, Sentence};
