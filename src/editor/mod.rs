//! Editor widget state
//!
//! [`EditorBuffer`] owns the text being edited, the cursor, and the
//! presentation settings ([`ThemeName`], [`SyntaxMode`]). The playground
//! controller only ever reads or replaces the whole text; the key handlers in
//! the TUI drive the finer-grained editing operations.
//!
//! Cursor columns are counted in `char`s, never bytes.

use clap::ValueEnum;
use std::fmt;

/// Visual theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeName {
    #[default]
    Monokai,
    Mocha,
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeName::Monokai => f.write_str("monokai"),
            ThemeName::Mocha => f.write_str("mocha"),
        }
    }
}

/// Syntax highlighting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SyntaxMode {
    #[default]
    #[value(name = "javascript")]
    JavaScript,
    PlainText,
}

impl fmt::Display for SyntaxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxMode::JavaScript => f.write_str("javascript"),
            SyntaxMode::PlainText => f.write_str("plain text"),
        }
    }
}

/// Text buffer with a cursor. Always holds at least one (possibly empty) line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorBuffer {
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
    theme: ThemeName,
    mode: SyntaxMode,
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorBuffer {
    pub fn new() -> Self {
        EditorBuffer {
            lines: vec![String::new()],
            cursor_row: 0,
            cursor_col: 0,
            theme: ThemeName::default(),
            mode: SyntaxMode::default(),
        }
    }

    /// Replace the whole text; the cursor moves to the end.
    ///
    /// Line endings are normalised: `\r\n` is stored as `\n`, so [`value`]
    /// returns LF-only text for a CRLF input.
    ///
    /// [`value`]: EditorBuffer::value
    pub fn set_value(&mut self, text: &str) {
        self.lines = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        self.cursor_row = self.lines.len() - 1;
        self.cursor_col = self.line_len(self.cursor_row);
    }

    /// The whole text, lines joined with `\n`
    pub fn value(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// (row, column) of the cursor, both zero-based
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    pub fn theme(&self) -> ThemeName {
        self.theme
    }

    pub fn set_theme(&mut self, theme: ThemeName) {
        self.theme = theme;
    }

    pub fn mode(&self) -> SyntaxMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SyntaxMode) {
        self.mode = mode;
    }

    // ===== Editing =====

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.insert_newline();
            return;
        }
        let idx = self.byte_index(self.cursor_row, self.cursor_col);
        self.lines[self.cursor_row].insert(idx, c);
        self.cursor_col += 1;
    }

    /// Split the line at the cursor, carrying over the current indentation
    pub fn insert_newline(&mut self) {
        let idx = self.byte_index(self.cursor_row, self.cursor_col);
        let current = &mut self.lines[self.cursor_row];
        let rest = current.split_off(idx);
        let indent: String = current.chars().take_while(|c| *c == ' ' || *c == '\t').collect();

        let indent_len = indent.chars().count();
        self.lines.insert(self.cursor_row + 1, indent + &rest);
        self.cursor_row += 1;
        self.cursor_col = indent_len;
    }

    /// Delete the character before the cursor, joining lines at column 0
    pub fn backspace(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            let idx = self.byte_index(self.cursor_row, self.cursor_col);
            self.lines[self.cursor_row].remove(idx);
        } else if self.cursor_row > 0 {
            let line = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.line_len(self.cursor_row);
            self.lines[self.cursor_row].push_str(&line);
        }
    }

    /// Delete the character under the cursor, joining with the next line at
    /// end of line
    pub fn delete(&mut self) {
        if self.cursor_col < self.line_len(self.cursor_row) {
            let idx = self.byte_index(self.cursor_row, self.cursor_col);
            self.lines[self.cursor_row].remove(idx);
        } else if self.cursor_row + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_row + 1);
            self.lines[self.cursor_row].push_str(&next);
        }
    }

    // ===== Cursor movement =====

    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.line_len(self.cursor_row);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_col < self.line_len(self.cursor_row) {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_row));
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_row));
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_col = self.line_len(self.cursor_row);
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    fn byte_index(&self, row: usize, col: usize) -> usize {
        let line = &self.lines[row];
        line.char_indices()
            .nth(col)
            .map(|(idx, _)| idx)
            .unwrap_or(line.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> EditorBuffer {
        let mut buffer = EditorBuffer::new();
        buffer.set_value(text);
        buffer
    }

    #[test]
    fn test_set_and_get_value() {
        let text = "var x = 3;\nvar y = 4;\nreturn (x + y);";
        let buffer = buffer(text);

        assert_eq!(buffer.value(), text);
        assert_eq!(buffer.lines().len(), 3);
        assert_eq!(buffer.cursor(), (2, 15));
    }

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buffer = buffer("");
        assert_eq!(buffer.lines(), &[String::new()]);
        assert_eq!(buffer.cursor(), (0, 0));
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut buffer = buffer("ab");
        buffer.move_left();
        buffer.insert_char('X');
        assert_eq!(buffer.value(), "aXb");

        buffer.backspace();
        buffer.backspace();
        assert_eq!(buffer.value(), "b");
        assert_eq!(buffer.cursor(), (0, 0));
    }

    #[test]
    fn test_newline_keeps_indentation() {
        let mut buffer = buffer("  if (a) {");
        buffer.insert_newline();
        buffer.insert_char('b');

        assert_eq!(buffer.value(), "  if (a) {\n  b");
        assert_eq!(buffer.cursor(), (1, 3));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut buffer = buffer("one\ntwo");
        buffer.move_home();
        buffer.backspace();

        assert_eq!(buffer.value(), "onetwo");
        assert_eq!(buffer.cursor(), (0, 3));
    }

    #[test]
    fn test_delete_joins_next_line() {
        let mut buffer = buffer("one\ntwo");
        buffer.move_up();
        buffer.move_end();
        buffer.delete();

        assert_eq!(buffer.value(), "onetwo");
    }

    #[test]
    fn test_vertical_movement_clamps_column() {
        let mut buffer = buffer("a\nlonger line");
        buffer.move_up();
        assert_eq!(buffer.cursor(), (0, 1));

        buffer.move_down();
        assert_eq!(buffer.cursor(), (1, 1));
    }

    #[test]
    fn test_multibyte_characters() {
        let mut buffer = buffer("'é'");
        buffer.move_left();
        buffer.backspace();
        assert_eq!(buffer.value(), "''");
    }

    #[test]
    fn test_crlf_is_normalised() {
        let mut buffer = EditorBuffer::new();
        buffer.set_value("var x = 1;\r\nx\r\n");

        assert_eq!(buffer.lines(), &["var x = 1;", "x", ""]);
        assert_eq!(buffer.value(), "var x = 1;\nx\n");

        // A lone carriage return inside a line is kept
        buffer.set_value("a\rb");
        assert_eq!(buffer.value(), "a\rb");
    }
}
