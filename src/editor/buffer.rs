use ropey::Rope;

use super::TextBuffer;
use super::history::{EditKind, History, Snapshot};

/// Cursor position in the editor buffer.
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
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

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

    const fn same_position(self, other: Self) -> bool {
        self.line == other.line && self.col == other.col
    }

    const fn is_before(self, other: Self) -> bool {
        self.line < other.line || (self.line == other.line && self.col < other.col)
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
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

/// A text buffer backed by a rope data structure.
///
/// Besides text and cursor it owns the selection anchor, the undo history
/// and the modified flag. The flag is derived from revision ids: every edit
/// produces a fresh revision, and the buffer is modified whenever its current
/// revision is not the one marked clean. Undoing back to the clean revision
/// therefore makes the buffer unmodified again.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    anchor: Option<Cursor>,
    history: History,
    revision: u64,
    last_revision: u64,
    clean_revision: Option<u64>,
    reported_modified: bool,
    pending_change: Option<bool>,
}

impl EditorBuffer {
    /// Create a new, unmodified buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            anchor: None,
            history: History::default(),
            revision: 0,
            last_revision: 0,
            clean_revision: Some(0),
            reported_modified: false,
            pending_change: None,
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

    /// Whether the buffer differs from its last clean revision.
    pub fn is_modified(&self) -> bool {
        self.clean_revision != Some(self.revision)
    }

    /// Mark the current revision as clean (e.g., after saving).
    pub fn mark_clean(&mut self) {
        self.clean_revision = Some(self.revision);
        self.history.break_group();
        self.sync_reported();
    }

    /// Mark the buffer modified with no reachable clean revision.
    pub fn mark_modified(&mut self) {
        self.clean_revision = None;
        self.sync_reported();
    }

    /// Take the pending modification-changed notification, if any.
    ///
    /// A notification is raised when a user edit, undo or redo flips
    /// [`is_modified`](Self::is_modified). Programmatic resets do not raise one.
    pub const fn take_modification_change(&mut self) -> Option<bool> {
        self.pending_change.take()
    }

    /// Replace the entire content, resetting cursor, history and modified flag.
    pub fn replace_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = Cursor::new();
        self.anchor = None;
        self.history.clear();
        self.last_revision += 1;
        self.revision = self.last_revision;
        self.clean_revision = Some(self.revision);
        self.sync_reported();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub const fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(strip_line_break(&s).to_string())
    }

    /// Length of a line in bytes (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Number of characters in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    // --- Selection ---

    /// The selected range as `(start, end)`, ordered, or `None` when empty.
    pub fn selection(&self) -> Option<(Cursor, Cursor)> {
        let anchor = self.anchor?;
        if anchor.same_position(self.cursor) {
            return None;
        }
        if anchor.is_before(self.cursor) {
            Some((anchor, self.cursor))
        } else {
            Some((self.cursor, anchor))
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    /// Text covered by the selection.
    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection()?;
        let range = self.char_idx_at(start)..self.char_idx_at(end);
        Some(self.rope.slice(range).to_string())
    }

    /// Select the whole buffer, leaving the cursor at the end.
    pub fn select_all(&mut self) {
        self.history.break_group();
        self.anchor = Some(Cursor::new());
        self.move_to_end_raw();
    }

    pub const fn clear_selection(&mut self) {
        self.anchor = None;
    }

    // --- Editing ---

    /// Insert a character at the cursor, replacing any selection.
    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.split_line();
            return;
        }
        let kind = if self.has_selection() {
            EditKind::Other
        } else {
            EditKind::Insert
        };
        self.record(kind);
        self.remove_selection();
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, ch);
        self.cursor = self.position_of(char_idx + 1);
        self.finish_edit();
        if ch.is_whitespace() {
            self.history.break_group();
        }
    }

    /// Insert a string at the cursor, replacing any selection.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() && !self.has_selection() {
            return;
        }
        self.record(EditKind::Other);
        self.remove_selection();
        let char_idx = self.cursor_char_idx();
        self.rope.insert(char_idx, s);
        self.cursor = self.position_of(char_idx + s.chars().count());
        self.finish_edit();
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        self.record(EditKind::Other);
        self.remove_selection();
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, '\n');
        self.cursor = self.position_of(char_idx + 1);
        self.finish_edit();
    }

    /// Delete the selection, or the character before the cursor (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.has_selection() {
            self.record(EditKind::Other);
            self.remove_selection();
            self.finish_edit();
            return true;
        }
        self.anchor = None;
        let end = self.cursor_char_idx();
        if end == 0 {
            return false;
        }
        let start = if self.cursor.col == 0 {
            // Remove the whole line break of the previous line.
            let prev = self.cursor.line - 1;
            self.char_idx_at(Cursor::at(prev, self.line_len(prev)))
        } else {
            end - 1
        };
        if start >= end {
            return false;
        }
        self.record(EditKind::DeleteBack);
        self.rope.remove(start..end);
        self.cursor = self.position_of(start);
        self.finish_edit();
        true
    }

    /// Delete the selection, or the character at the cursor (Delete key).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.has_selection() {
            self.record(EditKind::Other);
            self.remove_selection();
            self.finish_edit();
            return true;
        }
        self.anchor = None;
        let start = self.cursor_char_idx();
        let end = if self.cursor.col >= self.line_len(self.cursor.line) {
            if self.cursor.line + 1 >= self.line_count() {
                return false;
            }
            self.rope.line_to_char(self.cursor.line + 1)
        } else {
            start + 1
        };
        if start >= end {
            return false;
        }
        self.record(EditKind::DeleteForward);
        self.rope.remove(start..end);
        self.cursor = self.position_of(start);
        self.finish_edit();
        true
    }

    /// Remove the selection and return its text.
    pub fn cut_selection(&mut self) -> Option<String> {
        let text = self.selected_text()?;
        self.record(EditKind::Other);
        self.remove_selection();
        self.finish_edit();
        Some(text)
    }

    /// Insert clipboard text at the cursor, replacing any selection.
    pub fn paste(&mut self, text: &str) {
        self.insert_str(text);
    }

    /// Revert the last edit step. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        let Some(previous) = self.history.undo(current) else {
            return false;
        };
        self.restore(previous);
        true
    }

    /// Reapply the last undone step. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        let Some(next) = self.history.redo(current) else {
            return false;
        };
        self.restore(next);
        true
    }

    // --- Cursor movement ---

    /// Move the cursor in the given direction, dropping any selection.
    pub fn move_cursor(&mut self, direction: Direction) {
        self.begin_motion(false);
        self.step(direction);
    }

    /// Move the cursor in the given direction, extending the selection.
    pub fn extend_selection(&mut self, direction: Direction) {
        self.begin_motion(true);
        self.step(direction);
    }

    /// Move cursor to the beginning of the line (Home).
    pub fn move_home(&mut self) {
        self.begin_motion(false);
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        self.begin_motion(false);
        self.cursor.set_col(self.line_len(self.cursor.line));
    }

    /// Extend the selection to the beginning of the line (Shift+Home).
    pub fn select_to_home(&mut self) {
        self.begin_motion(true);
        self.cursor.set_col(0);
    }

    /// Extend the selection to the end of the line (Shift+End).
    pub fn select_to_end(&mut self) {
        self.begin_motion(true);
        self.cursor.set_col(self.line_len(self.cursor.line));
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        self.begin_motion(false);
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let trimmed = line[..self.cursor.col].trim_end();
        let pos = trimmed
            .rfind(|c: char| !c.is_alphanumeric() && c != '_')
            .map_or(0, |i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8));
        self.cursor.set_col(pos);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        self.begin_motion(false);
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col >= line_len {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let after = &line[self.cursor.col..];
        let word_end = after
            .find(|c: char| !c.is_alphanumeric() && c != '_')
            .unwrap_or(after.len());
        let rest = &after[word_end..];
        let gap_end = rest
            .find(|c: char| c.is_alphanumeric() || c == '_')
            .unwrap_or(rest.len());
        self.cursor.set_col(self.cursor.col + word_end + gap_end);
    }

    /// Move cursor to a specific line and column, clamped to the buffer.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.begin_motion(false);
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let text = self.line_at(self.cursor.line).unwrap_or_default();
        self.cursor.set_col(floor_char_boundary(&text, col));
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub fn move_to_start(&mut self) {
        self.begin_motion(false);
        self.cursor = Cursor::new();
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        self.begin_motion(false);
        self.move_to_end_raw();
    }

    // --- Private helpers ---

    fn begin_motion(&mut self, extend: bool) {
        self.history.break_group();
        if extend {
            self.anchor.get_or_insert(self.cursor);
        } else {
            self.anchor = None;
        }
    }

    fn step(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    fn move_to_end_raw(&mut self) {
        let last_line = self.line_count().saturating_sub(1);
        self.cursor.line = last_line;
        self.cursor.set_col(self.line_len(last_line));
    }

    fn record(&mut self, kind: EditKind) {
        let (rope, cursor, revision) = (&self.rope, self.cursor, self.revision);
        self.history.record(kind, || Snapshot {
            rope: rope.clone(),
            cursor,
            revision,
        });
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            rope: self.rope.clone(),
            cursor: self.cursor,
            revision: self.revision,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.rope = snapshot.rope;
        self.cursor = snapshot.cursor;
        self.revision = snapshot.revision;
        self.anchor = None;
        self.notify_if_changed();
    }

    fn finish_edit(&mut self) {
        self.last_revision += 1;
        self.revision = self.last_revision;
        self.notify_if_changed();
    }

    fn notify_if_changed(&mut self) {
        let modified = self.is_modified();
        if modified != self.reported_modified {
            self.reported_modified = modified;
            self.pending_change = Some(modified);
        }
    }

    fn sync_reported(&mut self) {
        self.reported_modified = self.is_modified();
        self.pending_change = None;
    }

    /// Delete the selected range without recording history.
    fn remove_selection(&mut self) {
        if let Some((start, end)) = self.selection() {
            let start_idx = self.char_idx_at(start);
            let end_idx = self.char_idx_at(end);
            self.rope.remove(start_idx..end_idx);
            self.cursor = self.position_of(start_idx);
        }
        self.anchor = None;
    }

    fn cursor_char_idx(&self) -> usize {
        self.char_idx_at(self.cursor)
    }

    /// Convert a (line, byte column) position to a ropey char index.
    fn char_idx_at(&self, pos: Cursor) -> usize {
        let line_start = self.rope.line_to_char(pos.line);
        let line = self.line_at(pos.line).unwrap_or_default();
        let byte_col = floor_char_boundary(&line, pos.col);
        line_start + line[..byte_col].chars().count()
    }

    /// Convert a ropey char index back to a cursor position.
    fn position_of(&self, char_idx: usize) -> Cursor {
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        let col = self
            .rope
            .slice(line_start..char_idx)
            .chars()
            .map(char::len_utf8)
            .sum();
        Cursor::at(line, col)
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let before = &line[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let next_char_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_char_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.clamp_to_memory();
        }
    }

    fn move_down(&mut self) {
        if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.clamp_to_memory();
        }
    }

    fn clamp_to_memory(&mut self) {
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        self.cursor.col = floor_char_boundary(&line, self.cursor.col_memory);
    }
}

/// `line` without its terminating line break.
///
/// Covers every break ropey splits lines on: CRLF, LF, VT, FF, CR, NEL, LS and PS.
fn strip_line_break(line: &str) -> &str {
    if let Some(stripped) = line.strip_suffix("\r\n") {
        return stripped;
    }
    line.strip_suffix(|c| {
        matches!(
            c,
            '\n' | '\u{000B}' | '\u{000C}' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}'
        )
    })
    .unwrap_or(line)
}

/// Largest char boundary in `s` at or below `idx`.
fn floor_char_boundary(s: &str, idx: usize) -> usize {
    let mut idx = idx.min(s.len());
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl TextBuffer for EditorBuffer {
    fn text(&self) -> String {
        Self::text(self)
    }

    fn set_text(&mut self, text: &str) {
        self.replace_text(text);
    }

    fn is_modified(&self) -> bool {
        Self::is_modified(self)
    }

    fn set_modified(&mut self, modified: bool) {
        if modified {
            self.mark_modified();
        } else {
            self.mark_clean();
        }
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("anchor", &self.anchor)
            .field("modified", &self.is_modified())
            .finish_non_exhaustive()
    }
}
