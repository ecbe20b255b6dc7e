//! Annotation reveal tracking.
//!
//! A span's meaning is revealed either automatically, while the speech
//! cursor is inside it, or manually, when the reader taps it. The two are
//! independent: the automatic reveal ends as soon as the cursor leaves the
//! span, a manual reveal stays until tapped again or the sentence changes.

use super::segment::Span;

/// The span containing `char_index`, if any.
///
/// `None` for a cursor that has not reported a position yet, or one past the
/// end of the text.
pub fn active_span(spans: &[Span], char_index: Option<usize>) -> Option<&Span> {
    active_span_index(spans, char_index).map(|i| &spans[i])
}

/// Index of the span containing `char_index`, if any.
pub fn active_span_index(spans: &[Span], char_index: Option<usize>) -> Option<usize> {
    let index = char_index?;
    spans.iter().position(|span| span.contains(index))
}

/// Index of the annotated span the cursor is currently auto-revealing.
pub fn auto_revealed(spans: &[Span], char_index: Option<usize>) -> Option<usize> {
    active_span_index(spans, char_index).filter(|&i| spans[i].is_annotated())
}

/// Manual reveal state for one sentence.
///
/// At most one span is manually revealed at a time; tapping another span
/// moves the reveal there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealState {
    manual: Option<usize>,
}

impl RevealState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The manually revealed span index.
    pub fn manual(&self) -> Option<usize> {
        self.manual
    }

    /// Toggle the manual reveal of `span_index`.
    ///
    /// Only annotated spans can be revealed. Returns false if the tap was
    /// rejected.
    pub fn toggle(&mut self, spans: &[Span], span_index: usize) -> bool {
        match spans.get(span_index) {
            Some(span) if span.is_annotated() => {
                self.manual = if self.manual == Some(span_index) {
                    None
                } else {
                    Some(span_index)
                };
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.manual = None;
    }

    /// Whether the meaning of `span_index` should be shown.
    pub fn is_revealed(&self, spans: &[Span], span_index: usize, char_index: Option<usize>) -> bool {
        self.manual == Some(span_index) || auto_revealed(spans, char_index) == Some(span_index)
    }

    /// Whether the span's text should be hidden in quiz mode.
    pub fn is_masked(
        &self,
        quiz_mode: bool,
        spans: &[Span],
        span_index: usize,
        char_index: Option<usize>,
    ) -> bool {
        quiz_mode
            && spans.get(span_index).is_some_and(Span::is_annotated)
            && !self.is_revealed(spans, span_index, char_index)
    }
}
