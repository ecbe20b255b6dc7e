//! Keyboard input for the read-along screen.
//!
//! Maps key presses to reader commands or control-flow signals for the
//! session loop.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::navigation::Command;

/// What the session loop should do with a key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputResult {
    /// Apply a reader command
    Command(Command),
    /// Show or hide the sentence translations
    ToggleTranslation,
    /// Show or hide the key help line
    ToggleHelp,
    /// Leave the session
    Quit,
    /// Key has no binding
    Ignored,
}

/// Translate a key event.
pub fn handle_key_event(key: KeyEvent) -> InputResult {
    // Windows reports releases as well
    if key.kind == KeyEventKind::Release {
        return InputResult::Ignored;
    }

    match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputResult::Quit,

        // === Playback controls ===
        KeyCode::Char(' ') | KeyCode::Enter => InputResult::Command(Command::TogglePlay),
        KeyCode::Char('l') => InputResult::Command(Command::ToggleLoop),
        KeyCode::Char('s') => InputResult::Command(Command::CycleSpeed),
        KeyCode::Char('z') => InputResult::Command(Command::ToggleQuizMode),

        // === Navigation ===
        KeyCode::Right | KeyCode::Char('n') => InputResult::Command(Command::NextSentence),
        KeyCode::Left | KeyCode::Char('p') => InputResult::Command(Command::PrevSentence),
        KeyCode::PageDown | KeyCode::Char(']') => InputResult::Command(Command::NextPage),
        KeyCode::PageUp | KeyCode::Char('[') => InputResult::Command(Command::PrevPage),
        KeyCode::Home => InputResult::Command(Command::JumpTo(0)),

        // === Annotations ===
        KeyCode::Char(c @ '1'..='9') => {
            let nth = c as usize - '1' as usize;
            InputResult::Command(Command::ToggleReveal(nth))
        }

        // === Display ===
        KeyCode::Char('t') => InputResult::ToggleTranslation,
        KeyCode::Char('?') => InputResult::ToggleHelp,

        _ => InputResult::Ignored,
    }
}
