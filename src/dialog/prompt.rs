use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::DialogStep;

/// Single-line text input with a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub label: String,
    value: String,
    /// Cursor as a char index into `value`.
    cursor: usize,
}

impl Prompt {
    pub fn new(title: impl Into<String>, label: impl Into<String>, initial: &str) -> Self {
        Self {
            title: title.into(),
            label: label.into(),
            value: initial.to_string(),
            cursor: initial.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the value and put the cursor at its end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = value.chars().count();
    }

    /// Insert pasted text at the cursor. Control characters are dropped.
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars().filter(|c| !c.is_control()) {
            self.insert_char(ch);
        }
    }

    /// Enter submits, Esc cancels, everything else edits.
    pub fn handle_key(&mut self, key: KeyEvent) -> DialogStep<Option<String>> {
        match key.code {
            KeyCode::Enter => DialogStep::Done(Some(self.value.clone())),
            KeyCode::Esc => DialogStep::Done(None),
            _ => {
                self.edit(key);
                DialogStep::Pending
            }
        }
    }

    /// Apply an editing key. Returns `false` if the key is not an edit.
    pub fn edit(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => {
                self.value.clear();
                self.cursor = 0;
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.insert_char(c);
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.value.chars().count() {
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.value.chars().count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.chars().count(),
            _ => return false,
        }
        true
    }

    fn insert_char(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(prompt: &mut Prompt, text: &str) {
        for ch in text.chars() {
            prompt.handle_key(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn test_initial_value_puts_cursor_at_end() {
        let prompt = Prompt::new("Rename", "Enter a name:", "old.txt");
        assert_eq!(prompt.value(), "old.txt");
        assert_eq!(prompt.cursor(), 7);
    }

    #[test]
    fn test_enter_submits_value() {
        let mut prompt = Prompt::new("t", "l", "");
        type_str(&mut prompt, "notes");
        assert_eq!(
            prompt.handle_key(key(KeyCode::Enter)),
            DialogStep::Done(Some("notes".to_string()))
        );
    }

    #[test]
    fn test_esc_cancels() {
        let mut prompt = Prompt::new("t", "l", "keep");
        assert_eq!(prompt.handle_key(key(KeyCode::Esc)), DialogStep::Done(None));
    }

    #[test]
    fn test_edit_in_middle_with_multibyte() {
        let mut prompt = Prompt::new("t", "l", "héllo");
        prompt.handle_key(key(KeyCode::Home));
        prompt.handle_key(key(KeyCode::Right));
        prompt.handle_key(key(KeyCode::Delete));
        assert_eq!(prompt.value(), "hllo");
        type_str(&mut prompt, "e");
        assert_eq!(prompt.value(), "hello");
        prompt.handle_key(key(KeyCode::Backspace));
        assert_eq!(prompt.value(), "hllo");
        assert_eq!(prompt.cursor(), 1);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut prompt = Prompt::new("t", "l", "something");
        prompt.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(prompt.value(), "");
        assert_eq!(prompt.cursor(), 0);
    }

    #[test]
    fn test_paste_drops_control_chars() {
        let mut prompt = Prompt::new("t", "l", "");
        prompt.insert_str("two\nlines\t");
        assert_eq!(prompt.value(), "twolines");
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut prompt = Prompt::new("t", "l", "ab");
        prompt.handle_key(key(KeyCode::Right));
        prompt.handle_key(key(KeyCode::Right));
        assert_eq!(prompt.cursor(), 2);
        prompt.handle_key(key(KeyCode::Home));
        prompt.handle_key(key(KeyCode::Left));
        assert_eq!(prompt.cursor(), 0);
        prompt.handle_key(key(KeyCode::Backspace));
        assert_eq!(prompt.value(), "ab");
    }
}
