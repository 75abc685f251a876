//! Event handling for the selector
//!
//! Maps terminal key events to the selector's own input vocabulary, so the
//! state machine never sees terminal-library types.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A discrete user input the selector understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Printable character
    Char(char),
    /// Delete the character before the cursor
    Backspace,
    /// Move the list cursor up
    Up,
    /// Move the list cursor down
    Down,
    /// Move the text cursor left
    Left,
    /// Move the text cursor right
    Right,
    /// Jump to the start of the line
    Home,
    /// Jump to the end of the line
    End,
    /// Delete from the text cursor to the end of the line
    KillToEnd,
    /// Delete the previous word
    DeleteWord,
    /// Enter
    Confirm,
    /// Escape or interrupt
    Cancel,
    /// Create a new experiment from the query
    Create,
    /// Promote the selected entry to a project
    Graduate,
    /// Delete the selected entry
    Delete,
    /// Rename the selected entry
    Rename,
}

/// Result of handling an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// State may have changed, keep running
    Continue,
    /// Input had no effect in the current mode
    Ignored,
    /// An outcome was produced, the loop should stop
    Finished,
}

/// Translate a key event into an `Input`
///
/// Returns `None` for key releases and keys the selector does not use.
#[must_use]
pub fn translate(key: &KeyEvent) -> Option<Input> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let input = match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Input::Cancel,
        (KeyCode::Enter, _) => Input::Confirm,
        (KeyCode::Backspace, _) => Input::Backspace,

        (KeyCode::Up, _) | (KeyCode::Char('p'), KeyModifiers::CONTROL) => Input::Up,
        (KeyCode::Down, _) | (KeyCode::Char('n'), KeyModifiers::CONTROL) => Input::Down,
        (KeyCode::Left, _) | (KeyCode::Char('b'), KeyModifiers::CONTROL) => Input::Left,
        (KeyCode::Right, _) | (KeyCode::Char('f'), KeyModifiers::CONTROL) => Input::Right,
        (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => Input::Home,
        (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => Input::End,
        (KeyCode::Char('k'), KeyModifiers::CONTROL) => Input::KillToEnd,
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => Input::DeleteWord,

        (KeyCode::Char('t'), KeyModifiers::CONTROL) => Input::Create,
        (KeyCode::Char('g'), KeyModifiers::CONTROL) => Input::Graduate,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Input::Delete,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Input::Rename,

        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Input::Char(c),
        _ => return None,
    };

    Some(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_cancel_keys() {
        assert_eq!(translate(&key(KeyCode::Esc, KeyModifiers::NONE)), Some(Input::Cancel));
        assert_eq!(
            translate(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Input::Cancel)
        );
    }

    #[test]
    fn test_characters() {
        assert_eq!(
            translate(&key(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(Input::Char('r'))
        );
        assert_eq!(
            translate(&key(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            Some(Input::Char('R'))
        );
        assert_eq!(translate(&key(KeyCode::Char('x'), KeyModifiers::ALT)), None);
    }

    #[test]
    fn test_actions() {
        let ctrl = |c| translate(&key(KeyCode::Char(c), KeyModifiers::CONTROL));
        assert_eq!(ctrl('t'), Some(Input::Create));
        assert_eq!(ctrl('g'), Some(Input::Graduate));
        assert_eq!(ctrl('d'), Some(Input::Delete));
        assert_eq!(ctrl('r'), Some(Input::Rename));
        assert_eq!(ctrl('w'), Some(Input::DeleteWord));
        assert_eq!(ctrl('k'), Some(Input::KillToEnd));
        assert_eq!(ctrl('p'), Some(Input::Up));
        assert_eq!(ctrl('n'), Some(Input::Down));
    }

    #[test]
    fn test_release_ignored() {
        let mut release = key(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(&release), None);
    }
}
