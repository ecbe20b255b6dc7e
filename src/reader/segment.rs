//! Sentence segmentation into plain and annotated spans.
//!
//! Notes are applied in declaration order. Each note claims the first
//! occurrence of its phrase that still lies entirely inside a plain span, so
//! earlier notes win when phrases overlap. Notes that find nothing to claim
//! are skipped.

use std::ops::Range;

use crate::content::Note;

/// A contiguous range of a sentence, either plain or annotated.
///
/// Offsets are character (not byte) positions in the sentence text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// The substring covered by this span
    pub text: String,
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// The note this span is annotated with, if any
    pub note: Option<Note>,
}

impl Span {
    pub fn is_annotated(&self) -> bool {
        self.note.is_some()
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `char_index` falls within `[start, end)`.
    pub fn contains(&self, char_index: usize) -> bool {
        (self.start..self.end).contains(&char_index)
    }
}

/// Piece of the sentence during splitting, addressed by byte range.
struct Piece {
    bytes: Range<usize>,
    note: Option<usize>,
}

/// Split `text` into pieces, calling `on_skip` for every note that could
/// not be placed.
fn split(text: &str, notes: &[Note], mut on_skip: impl FnMut(usize)) -> Vec<Piece> {
    if text.is_empty() {
        notes.iter().enumerate().for_each(|(i, _)| on_skip(i));
        return Vec::new();
    }

    let mut pieces = vec![Piece {
        bytes: 0..text.len(),
        note: None,
    }];

    for (note_index, note) in notes.iter().enumerate() {
        if note.text.is_empty() {
            on_skip(note_index);
            continue;
        }

        let hit = pieces.iter().enumerate().find_map(|(i, piece)| {
            if piece.note.is_some() {
                return None;
            }
            text[piece.bytes.clone()]
                .find(&note.text)
                .map(|pos| (i, piece.bytes.start + pos))
        });

        let Some((piece_index, match_start)) = hit else {
            tracing::debug!(note = %note.text, "note phrase not available, skipping");
            on_skip(note_index);
            continue;
        };

        let plain = pieces.remove(piece_index);
        let match_end = match_start + note.text.len();

        let mut replacement = Vec::with_capacity(3);
        if plain.bytes.start < match_start {
            replacement.push(Piece {
                bytes: plain.bytes.start..match_start,
                note: None,
            });
        }
        replacement.push(Piece {
            bytes: match_start..match_end,
            note: Some(note_index),
        });
        if match_end < plain.bytes.end {
            replacement.push(Piece {
                bytes: match_end..plain.bytes.end,
                note: None,
            });
        }

        pieces.splice(piece_index..piece_index, replacement);
    }

    pieces
}

/// Segment a sentence into spans that partition its text.
///
/// An empty text yields no spans.
pub fn segment(text: &str, notes: &[Note]) -> Vec<Span> {
    let pieces = split(text, notes, |_| {});

    let mut offset = 0;
    pieces
        .into_iter()
        .map(|piece| {
            let slice = &text[piece.bytes];
            let start = offset;
            offset += slice.chars().count();
            Span {
                text: slice.to_string(),
                start,
                end: offset,
                note: piece.note.map(|i| notes[i].clone()),
            }
        })
        .collect()
}

/// Indices of the notes that [`segment`] leaves without a span.
pub fn skipped_notes(text: &str, notes: &[Note]) -> Vec<usize> {
    let mut skipped = Vec::new();
    split(text, notes, |i| skipped.push(i));
    skipped
}
