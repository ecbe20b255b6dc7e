//! Read-along screen rendering.
//!
//! Draws the current page: a header with title, stars and progress, every
//! sentence of the page with the spoken word highlighted and annotations
//! underlined (or masked in quiz mode), revealed meanings, and a status bar.
//! Lines are built as strings with ANSI codes to keep syscalls down.

use std::io::Write;
use std::ops::Range;

use anyhow::Result;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::speech::SpeechDriver;

use super::reveal::RevealState;
use super::segment::Span;
use super::state::{PlaybackEngine, PlaybackMode};

const RESET: &str = "\x1b[0m";
const WHITE: &str = "\x1b[97m";
const DARK_GREY: &str = "\x1b[90m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GREEN: &str = "\x1b[32m";
/// Underlined yellow
const NOTE: &str = "\x1b[4;33m";
/// Bold reverse video
const SPOKEN: &str = "\x1b[1;7m";

/// Character used to hide masked annotations.
const MASK_CHAR: char = '_';

/// Display toggles that live outside the playback engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub show_translation: bool,
    pub show_help: bool,
    /// Terminal width in columns
    pub width: u16,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_translation: false,
            show_help: true,
            width: 80,
        }
    }
}

/// Render the whole page.
///
/// Lines end with `\r\n` since the terminal is in raw mode.
pub fn render_page<D: SpeechDriver>(
    out: &mut impl Write,
    engine: &PlaybackEngine<D>,
    view: &ViewOptions,
) -> Result<()> {
    let width = view.width.max(20) as usize;
    let chapter = engine.chapter();
    let mode = engine.mode();
    let position = engine.position();
    let cursor = engine.cursor();

    let title = if chapter.book_title.is_empty() {
        chapter.title.clone()
    } else {
        format!("{} - {}", chapter.book_title, chapter.title)
    };
    let stars = format!("★ {}", engine.stars());
    let title_width = width.saturating_sub(stars.width() + 2);
    write!(
        out,
        "{}{}{}  {}{}{}\r\n",
        WHITE,
        fit_width(&title, title_width),
        RESET,
        YELLOW,
        stars,
        RESET
    )?;
    write!(out, "{}\r\n\r\n", progress_bar(width, engine.progress()))?;

    for (offset, sentence) in engine.page_sentences().iter().enumerate() {
        let spans = engine.spans(offset);
        let reveal = engine.reveal(offset);
        let is_current = offset == position.page_offset;
        let char_index = if cursor.page_offset == offset {
            cursor.char_index
        } else {
            None
        };

        let marker = if is_current { "▸ " } else { "  " };
        write!(
            out,
            "{}{}\r\n",
            marker,
            sentence_line(spans, &reveal, char_index, mode.is_quiz_mode, is_current)
        )?;

        for line in meaning_lines(spans, &reveal, char_index) {
            write!(out, "    {}{}{}\r\n", CYAN, line, RESET)?;
        }
        if view.show_translation && !sentence.translation.is_empty() {
            write!(out, "    {}{}{}\r\n", DARK_GREY, sentence.translation, RESET)?;
        }
        write!(out, "\r\n")?;
    }

    let sentence_number = position.sentence_index() + 1;
    write!(
        out,
        "{}\r\n",
        status_line(&mode, sentence_number, chapter.len(), engine.page_size())
    )?;
    if view.show_help {
        write!(
            out,
            "{}space play/pause  ←/→ sentence  [/] page  l loop  s speed  z quiz  1-9 reveal  t translation  q quit{}\r\n",
            DARK_GREY, RESET
        )?;
    }
    Ok(())
}

/// Character range of the word under `char_index`.
///
/// The word runs from `char_index` up to the next whitespace.
pub fn spoken_word(spans: &[Span], char_index: Option<usize>) -> Option<Range<usize>> {
    let start = char_index?;
    let chars: Vec<char> = spans.iter().flat_map(|s| s.text.chars()).collect();
    if start >= chars.len() || chars[start].is_whitespace() {
        return None;
    }
    let end = chars[start..]
        .iter()
        .position(|c| c.is_whitespace())
        .map(|len| start + len)
        .unwrap_or(chars.len());
    Some(start..end)
}

/// Build the styled text of one sentence.
///
/// # Arguments
/// * `spans` - Segmented sentence
/// * `reveal` - Manual reveal state of the sentence
/// * `char_index` - Speech cursor, if it is on this sentence
/// * `quiz_mode` - Whether unrevealed annotations are masked
/// * `is_current` - Whether this is the sentence being read
pub fn sentence_line(
    spans: &[Span],
    reveal: &RevealState,
    char_index: Option<usize>,
    quiz_mode: bool,
    is_current: bool,
) -> String {
    let word = spoken_word(spans, char_index);
    let base = if is_current { WHITE } else { DARK_GREY };

    let mut output = String::with_capacity(spans.iter().map(|s| s.text.len()).sum::<usize>() * 2);
    let mut style: Option<&str> = None;

    for (span_index, span) in spans.iter().enumerate() {
        let masked = reveal.is_masked(quiz_mode, spans, span_index, char_index);
        for (i, ch) in span.text.chars().enumerate() {
            let at = span.start + i;
            let next_style = if masked {
                YELLOW
            } else if word.as_ref().is_some_and(|w| w.contains(&at)) {
                SPOKEN
            } else if span.is_annotated() {
                NOTE
            } else {
                base
            };

            if style != Some(next_style) {
                output.push_str(RESET);
                output.push_str(next_style);
                style = Some(next_style);
            }
            if masked && !ch.is_whitespace() {
                // One mask character per display column
                for _ in 0..ch.width().unwrap_or(1).max(1) {
                    output.push(MASK_CHAR);
                }
            } else {
                output.push(ch);
            }
        }
    }
    output.push_str(RESET);
    output
}

/// Meanings of the revealed annotations, numbered by their reveal key.
pub fn meaning_lines(spans: &[Span], reveal: &RevealState, char_index: Option<usize>) -> Vec<String> {
    spans
        .iter()
        .enumerate()
        .filter(|(_, span)| span.is_annotated())
        .enumerate()
        .filter(|(_, (span_index, _))| reveal.is_revealed(spans, *span_index, char_index))
        .filter_map(|(nth, (_, span))| {
            span.note
                .as_ref()
                .map(|note| format!("{}. {} = {}", nth + 1, span.text, note.meaning))
        })
        .collect()
}

/// Progress bar spanning `width` columns.
pub fn progress_bar(width: usize, progress: f64) -> String {
    let label = format!(" {:>3}%", (progress.clamp(0.0, 1.0) * 100.0).round() as u32);
    let bar_width = width.saturating_sub(label.len());
    let filled = ((bar_width as f64) * progress.clamp(0.0, 1.0)).round() as usize;
    format!(
        "{}{}{}{}{}{}",
        GREEN,
        "━".repeat(filled),
        DARK_GREY,
        "─".repeat(bar_width - filled),
        RESET,
        label
    )
}

/// Status bar with play state and mode flags.
pub fn status_line(mode: &PlaybackMode, sentence: usize, total: usize, page_size: usize) -> String {
    let mut output = String::with_capacity(128);
    output.push_str(WHITE);
    output.push_str(if mode.is_playing { "⏸ " } else { "▶ " });
    output.push_str(&format!(" {}/{}", sentence, total));
    if page_size > 1 {
        output.push_str(&format!("{}  page x{}", DARK_GREY, page_size));
    }
    output.push_str(&format!("{}  spd:{}{:.1}x", DARK_GREY, WHITE, mode.speed));
    if mode.is_looping {
        output.push_str(&format!("  {}[LOOP]", CYAN));
    }
    if mode.is_quiz_mode {
        output.push_str(&format!("  {}[QUIZ]", YELLOW));
    }
    output.push_str(RESET);
    output
}

/// Truncate `text` to at most `width` display columns.
pub fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut output = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        output.push(ch);
        used += w;
    }
    output.push('…');
    output
}
