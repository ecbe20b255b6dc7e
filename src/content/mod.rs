//! Chapter content: sentences, annotation notes and JSON loading.
//!
//! A chapter is loaded once at session start and never mutated afterwards.
//! The JSON shape mirrors the content files the reader ships with:
//!
//! ```json
//! {
//!   "bookTitle": "The Little Prince",
//!   "title": "Chapter 1",
//!   "sentences": [
//!     {
//!       "id": 1,
//!       "text": "The quick fox",
//!       "translation": "빠른 여우",
//!       "notes": [{ "text": "quick", "meaning": "빠른" }]
//!     }
//!   ]
//! }
//! ```

mod error;

pub use error::ContentError;

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::reader::segment::skipped_notes;

/// An annotated phrase inside a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Literal substring of the owning sentence's text
    pub text: String,
    /// Meaning shown when the phrase is revealed
    pub meaning: String,
}

impl Note {
    pub fn new(text: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            meaning: meaning.into(),
        }
    }
}

/// A single readable sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    #[serde(default)]
    pub id: u32,
    pub text: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Sentence {
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            translation: String::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = translation.into();
        self
    }

    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }
}

/// An ordered sequence of sentences plus display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    #[serde(default)]
    pub book_title: String,
    #[serde(default)]
    pub title: String,
    pub sentences: Vec<Sentence>,
}

impl Chapter {
    pub fn new(title: impl Into<String>, sentences: Vec<Sentence>) -> Self {
        Self {
            book_title: String::new(),
            title: title.into(),
            sentences,
        }
    }

    /// Parse a chapter from its JSON representation.
    ///
    /// A chapter without sentences is rejected since nothing could be read.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let chapter: Chapter = serde_json::from_str(json)?;
        if chapter.sentences.is_empty() {
            return Err(ContentError::Empty);
        }
        Ok(chapter)
    }

    /// Load a chapter from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        if !path.exists() {
            return Err(ContentError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let json = fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let chapter = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            sentences = chapter.len(),
            "loaded chapter"
        );
        Ok(chapter)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn sentence(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    /// Total number of notes across all sentences.
    pub fn note_count(&self) -> usize {
        self.sentences.iter().map(|s| s.notes.len()).sum()
    }

    /// Report content problems that would be invisible while reading.
    ///
    /// Notes that never become an annotated span are listed here: either the
    /// phrase is absent from the sentence, or an earlier note already claimed
    /// its only occurrence.
    pub fn validate(&self) -> Vec<ContentWarning> {
        let mut warnings = Vec::new();

        for (index, sentence) in self.sentences.iter().enumerate() {
            if sentence.text.is_empty() {
                warnings.push(ContentWarning {
                    sentence: index,
                    kind: WarningKind::EmptyText,
                });
                continue;
            }

            for note_index in skipped_notes(&sentence.text, &sentence.notes) {
                let note = &sentence.notes[note_index];
                let kind = if !note.text.is_empty() && sentence.text.contains(&note.text) {
                    WarningKind::NoteShadowed {
                        note: note.text.clone(),
                    }
                } else {
                    WarningKind::NoteNotFound {
                        note: note.text.clone(),
                    }
                };
                warnings.push(ContentWarning {
                    sentence: index,
                    kind,
                });
            }
        }

        warnings
    }
}

/// A content problem found by [`Chapter::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentWarning {
    /// Zero-based sentence index
    pub sentence: usize,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// Sentence has no text and cannot be spoken
    EmptyText,
    /// Note phrase does not occur in the sentence
    NoteNotFound { note: String },
    /// Note phrase only occurs inside a phrase claimed by an earlier note
    NoteShadowed { note: String },
}

impl fmt::Display for ContentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let number = self.sentence + 1;
        match &self.kind {
            WarningKind::EmptyText => write!(f, "sentence {}: text is empty", number),
            WarningKind::NoteNotFound { note } => {
                write!(f, "sentence {}: note {:?} does not occur in text", number, note)
            }
            WarningKind::NoteShadowed { note } => write!(
                f,
                "sentence {}: note {:?} is covered by an earlier note",
                number, note
            ),
        }
    }
}
