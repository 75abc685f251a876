//! Single-line text editing for the selector dialogs
//!
//! The cursor is a character index, not a byte index, so multi-byte input
//! never splits a character.

/// Editable line with a cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    buffer: String,
    cursor: usize,
}

impl LineEditor {
    /// Create an empty editor
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
        }
    }

    /// Create an editor holding `text` with the cursor at the end
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        let buffer = text.into();
        let cursor = buffer.chars().count();
        Self { buffer, cursor }
    }

    /// Current contents
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text before the cursor, the character under it, and the rest
    #[must_use]
    pub fn split_at_cursor(&self) -> (&str, Option<char>, &str) {
        let at = self.byte_index();
        let (before, rest) = self.buffer.split_at(at);
        let mut chars = rest.chars();
        let under = chars.next();
        (before, under, chars.as_str())
    }

    /// Byte index of the cursor
    fn byte_index(&self) -> usize {
        self.byte_index_of(self.cursor)
    }

    fn byte_index_of(&self, char_idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_idx)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.byte_index();
        self.buffer.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    ///
    /// Returns `false` when the cursor is already at the start.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let byte_idx = self.byte_index();
        self.buffer.remove(byte_idx);
        true
    }

    /// Move cursor left
    pub const fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.cursor < self.buffer.chars().count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start
    pub const fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end
    pub fn cursor_end(&mut self) {
        self.cursor = self.buffer.chars().count();
    }

    /// Delete from the cursor to the end of the line (Ctrl+K)
    pub fn kill_to_end(&mut self) -> bool {
        let byte_idx = self.byte_index();
        if byte_idx == self.buffer.len() {
            return false;
        }
        self.buffer.truncate(byte_idx);
        true
    }

    /// Delete the word before the cursor (Ctrl+W)
    ///
    /// Trailing spaces are skipped first; the word then extends back to the
    /// previous space or `/`, so path components go one at a time.
    pub fn delete_word_backwards(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        let chars: Vec<char> = self.buffer.chars().collect();
        let mut start = self.cursor - 1;
        while start > 0 && chars[start] == ' ' {
            start -= 1;
        }
        while start > 0 && chars[start - 1] != ' ' && chars[start - 1] != '/' {
            start -= 1;
        }

        let from = self.byte_index_of(start);
        let to = self.byte_index();
        self.buffer.drain(from..to);
        self.cursor = start;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_input() {
        let mut editor = LineEditor::new();
        for c in "hello".chars() {
            editor.insert_char(c);
        }

        assert_eq!(editor.text(), "hello");
        assert_eq!(editor.cursor(), 5);
    }

    #[test]
    fn test_cursor_movement() {
        let mut editor = LineEditor::with_text("hello");
        assert_eq!(editor.cursor(), 5);

        editor.cursor_left();
        assert_eq!(editor.cursor(), 4);

        editor.cursor_home();
        assert_eq!(editor.cursor(), 0);
        editor.cursor_left();
        assert_eq!(editor.cursor(), 0);

        editor.cursor_end();
        assert_eq!(editor.cursor(), 5);

        editor.cursor_right();
        assert_eq!(editor.cursor(), 5); // Should not go past end
    }

    #[test]
    fn test_insert_mid_line() {
        let mut editor = LineEditor::with_text("/tmp/redis");
        editor.cursor_home();
        editor.cursor_right();
        editor.insert_char('x');
        assert_eq!(editor.text(), "/xtmp/redis");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn test_backspace() {
        let mut editor = LineEditor::with_text("hello");

        assert!(editor.backspace());
        assert_eq!(editor.text(), "hell");
        assert_eq!(editor.cursor(), 4);

        editor.cursor_home();
        assert!(!editor.backspace());
        assert_eq!(editor.text(), "hell"); // Nothing happens at position 0
    }

    #[test]
    fn test_multibyte() {
        let mut editor = LineEditor::with_text("héllo");
        editor.cursor_left();
        editor.cursor_left();
        editor.cursor_left();
        assert!(editor.backspace());
        assert_eq!(editor.text(), "hllo");
        assert_eq!(editor.split_at_cursor(), ("h", Some('l'), "lo"));
    }

    #[test]
    fn test_kill_to_end() {
        let mut editor = LineEditor::with_text("/home/me/projects");
        editor.cursor_home();
        for _ in 0..5 {
            editor.cursor_right();
        }
        assert!(editor.kill_to_end());
        assert_eq!(editor.text(), "/home");
        assert!(!editor.kill_to_end());
    }

    #[test]
    fn test_delete_word_backwards_stops_at_slash() {
        let mut editor = LineEditor::with_text("/home/u/projects/redis");

        assert!(editor.delete_word_backwards());
        assert_eq!(editor.text(), "/home/u/projects/");
        assert_eq!(editor.cursor(), 17);

        assert!(editor.delete_word_backwards());
        assert_eq!(editor.text(), "/home/u/");
        assert_eq!(editor.cursor(), 8);
    }

    #[test]
    fn test_delete_word_backwards_skips_trailing_spaces() {
        let mut editor = LineEditor::with_text("hello world  ");
        assert!(editor.delete_word_backwards());
        assert_eq!(editor.text(), "hello ");

        assert!(editor.delete_word_backwards());
        assert_eq!(editor.text(), "");
        assert!(!editor.delete_word_backwards());
    }

    #[test]
    fn test_split_at_cursor() {
        let editor = LineEditor::with_text("abc");
        assert_eq!(editor.split_at_cursor(), ("abc", None, ""));

        let mut editor = editor;
        editor.cursor_left();
        assert_eq!(editor.split_at_cursor(), ("ab", Some('c'), ""));
    }
}
