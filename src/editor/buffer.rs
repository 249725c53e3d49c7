use ropey::Rope;

/// Cursor position in the editor buffer.
///
/// `col` is a byte offset within the line. A remembered column keeps the
/// cursor from drifting left when moving vertically through short lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::at(0, 0)
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The source text being edited, backed by a rope.
///
/// Every mutation marks the buffer dirty; the application clears the flag
/// after a successful save. The full text is handed to the converter on each
/// change, so extraction stays cheap relative to edits.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    dirty: bool,
}

impl EditorBuffer {
    /// Create a buffer holding `text`, cursor at the origin.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::default(),
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the buffer has unsaved modifications.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Total number of lines.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// The content of a line without its trailing newline.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(line.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Byte length of a line, excluding the trailing newline.
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// The full text content.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the entire content, moving the cursor to the origin.
    ///
    /// Used when loading a draft or file and when starting a new document;
    /// the buffer comes back clean.
    pub fn replace_all(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = Cursor::default();
        self.dirty = false;
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        let idx = self.cursor_char_idx();
        self.rope.insert_char(idx, ch);
        self.cursor.set_col(self.cursor.col + ch.len_utf8());
        self.dirty = true;
    }

    /// Insert a string at the cursor, leaving the cursor after it.
    pub fn insert_str(&mut self, s: &str) {
        self.insert_snippet(s, s.len());
    }

    /// Insert `text` at the cursor and place the cursor `caret` bytes into
    /// the inserted text.
    ///
    /// Formatting shortcuts use this to drop the caret between the markers
    /// they insert (e.g. inside a fresh `**``**` pair).
    pub fn insert_snippet(&mut self, text: &str, caret: usize) {
        if text.is_empty() {
            return;
        }
        let idx = self.cursor_char_idx();
        self.rope.insert(idx, text);

        let mut caret = caret.min(text.len());
        while !text.is_char_boundary(caret) {
            caret -= 1;
        }
        let before = &text[..caret];
        match before.rsplit_once('\n') {
            Some((head, tail)) => {
                self.cursor.line += head.matches('\n').count() + 1;
                self.cursor.set_col(tail.len());
            }
            None => self.cursor.set_col(self.cursor.col + before.len()),
        }
        self.dirty = true;
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        let idx = self.cursor_char_idx();
        self.rope.insert_char(idx, '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
        self.dirty = true;
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Joins with the previous line at column zero. Returns `true` if
    /// anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor.line == 0 && self.cursor.col == 0 {
            return false;
        }
        let idx = self.cursor_char_idx();
        if self.cursor.col == 0 {
            let prev_len = self.line_len(self.cursor.line - 1);
            self.rope.remove(idx - 1..idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_len);
        } else {
            let line = self.rope.line(self.cursor.line).to_string();
            let removed = line[..self.cursor.col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.rope.remove(idx - 1..idx);
            self.cursor.set_col(self.cursor.col - removed);
        }
        self.dirty = true;
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Joins with the next line at end of line. Returns `true` if anything
    /// was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let at_line_end = self.cursor.col >= self.line_len(self.cursor.line);
        if at_line_end && self.cursor.line + 1 >= self.line_count() {
            return false;
        }
        let idx = self.cursor_char_idx();
        self.rope.remove(idx..=idx);
        self.dirty = true;
        true
    }

    /// Move the cursor one step in `direction`, wrapping across lines.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_vertical(true),
            Direction::Down => self.move_vertical(false),
        }
    }

    /// Move to the beginning of the line (Home).
    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    /// Move to the end of the line (End).
    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Move to a specific position, clamped to the buffer.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let max_col = self.line_len(self.cursor.line);
        self.cursor.set_col(col.min(max_col));
    }

    /// Move to the start of the buffer (Ctrl+Home).
    pub const fn move_to_start(&mut self) {
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    /// Move to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        let last = self.line_count().saturating_sub(1);
        self.cursor.line = last;
        self.cursor.set_col(self.line_len(last));
    }

    // --- Private helpers ---

    /// Convert the cursor position to a ropey char index.
    fn cursor_char_idx(&self) -> usize {
        let line_start = self.rope.line_to_char(self.cursor.line);
        let line: String = self.rope.line(self.cursor.line).chars().collect();
        let byte_col = self.cursor.col.min(line.len());
        line_start + line[..byte_col].chars().count()
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let step = line[..self.cursor.col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - step);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let step = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + step);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    /// Vertical movement keeps the sticky column rather than resetting it.
    fn move_vertical(&mut self, up: bool) {
        if up {
            if self.cursor.line == 0 {
                return;
            }
            self.cursor.line -= 1;
        } else {
            if self.cursor.line + 1 >= self.line_count() {
                return;
            }
            self.cursor.line += 1;
        }
        let max_col = self.line_len(self.cursor.line);
        self.cursor.col = self.cursor.col_memory.min(max_col);
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field("lines", &self.rope.len_lines())
            .field("cursor", &self.cursor)
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = EditorBuffer::from_text("alpha\nbeta");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("alpha".to_string()));
        assert_eq!(buf.line_at(1), Some("beta".to_string()));
        assert_eq!(buf.text(), "alpha\nbeta");
    }

    #[test]
    fn test_line_at_out_of_bounds() {
        let buf = EditorBuffer::from_text("alpha");
        assert_eq!(buf.line_at(3), None);
    }

    // --- Editing ---

    #[test]
    fn test_insert_char_advances_cursor() {
        let mut buf = EditorBuffer::empty();
        buf.insert_char('a');
        buf.insert_char('b');
        assert_eq!(buf.text(), "ab");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
        assert!(buf.is_dirty());
    }

    #[test]
    fn test_insert_str_lands_cursor_after_text() {
        let mut buf = EditorBuffer::from_text("ad");
        buf.move_cursor(Direction::Right);
        buf.insert_str("bc");
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), Cursor::at(0, 3));
    }

    #[test]
    fn test_split_line_at_cursor() {
        let mut buf = EditorBuffer::from_text("leftright");
        buf.move_to(0, 4);
        buf.split_line();
        assert_eq!(buf.line_at(0), Some("left".to_string()));
        assert_eq!(buf.line_at(1), Some("right".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_delete_back_at_origin_is_noop() {
        let mut buf = EditorBuffer::from_text("x");
        assert!(!buf.delete_back());
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(0, 2);
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut buf = EditorBuffer::from_text("ab");
        buf.move_to_end();
        assert!(!buf.delete_forward());
    }

    #[test]
    fn test_replace_all_resets_cursor_and_dirty() {
        let mut buf = EditorBuffer::from_text("old");
        buf.insert_char('!');
        buf.replace_all("new text");
        assert_eq!(buf.text(), "new text");
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
        assert!(!buf.is_dirty());
    }

    // --- Snippet insertion ---

    #[test]
    fn test_insert_snippet_places_caret_inside() {
        let mut buf = EditorBuffer::empty();
        buf.insert_snippet("****", 2);
        assert_eq!(buf.text(), "****");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_insert_snippet_multiline_caret() {
        let mut buf = EditorBuffer::empty();
        // Caret lands just after the opening fence line.
        buf.insert_snippet("```\ncode\n```", 4);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_insert_snippet_caret_clamped_to_text() {
        let mut buf = EditorBuffer::empty();
        buf.insert_snippet("ab", 99);
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_insert_snippet_mid_document() {
        let mut buf = EditorBuffer::from_text("one\ntwo");
        buf.move_to(1, 3);
        buf.insert_snippet("\n---\n", 5);
        assert_eq!(buf.text(), "one\ntwo\n---\n");
        assert_eq!(buf.cursor(), Cursor::at(3, 0));
    }

    // --- Movement ---

    #[test]
    fn test_horizontal_movement_wraps_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(0, 2);
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_vertical_movement_clamps_to_line_length() {
        let mut buf = EditorBuffer::from_text("long line\nab\nlonger line");
        buf.move_to(0, 7);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
        buf.move_cursor(Direction::Down);
        // Sticky column restores the original target.
        assert_eq!(buf.cursor().col, 7);
    }

    #[test]
    fn test_vertical_movement_at_edges_is_noop() {
        let mut buf = EditorBuffer::from_text("a\nb");
        buf.move_cursor(Direction::Up);
        assert_eq!(buf.cursor().line, 0);
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().line, 1);
    }

    #[test]
    fn test_home_end_and_buffer_extremes() {
        let mut buf = EditorBuffer::from_text("alpha\nbeta");
        buf.move_to(1, 2);
        buf.move_home();
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
        buf.move_end();
        assert_eq!(buf.cursor(), Cursor::at(1, 4));
        buf.move_to_start();
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
        buf.move_to_end();
        assert_eq!(buf.cursor(), Cursor::at(1, 4));
    }

    #[test]
    fn test_move_to_clamps() {
        let mut buf = EditorBuffer::from_text("abc");
        buf.move_to(9, 9);
        assert_eq!(buf.cursor(), Cursor::at(0, 3));
    }

    // --- Multi-byte safety ---

    #[test]
    fn test_multibyte_insert_and_delete() {
        let mut buf = EditorBuffer::from_text("caf");
        buf.move_end();
        buf.insert_char('é');
        assert_eq!(buf.cursor().col, 5);
        buf.delete_back();
        assert_eq!(buf.line_at(0), Some("caf".to_string()));
    }

    #[test]
    fn test_multibyte_horizontal_movement() {
        let mut buf = EditorBuffer::from_text("café!");
        buf.move_end();
        buf.move_cursor(Direction::Left); // before '!'
        buf.move_cursor(Direction::Left); // before 'é'
        assert_eq!(buf.cursor().col, 3);
    }

    // --- Editing sequences ---

    #[test]
    fn test_type_correct_type() {
        let mut buf = EditorBuffer::empty();
        for ch in "markdwn".chars() {
            buf.insert_char(ch);
        }
        buf.move_to(0, 5);
        buf.insert_char('o');
        assert_eq!(buf.text(), "markdown");
    }

    #[test]
    fn test_split_then_rejoin_roundtrip() {
        let mut buf = EditorBuffer::from_text("oneword");
        buf.move_to(0, 3);
        buf.split_line();
        assert_eq!(buf.line_count(), 2);
        buf.delete_back();
        assert_eq!(buf.text(), "oneword");
    }
}
