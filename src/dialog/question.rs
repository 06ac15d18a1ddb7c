use crossterm::event::{KeyCode, KeyEvent};

use super::{Choice, DialogStep};

/// Save / Discard / Cancel question with a focused button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub title: String,
    pub message: String,
    selected: Choice,
}

impl Question {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            selected: Choice::Save,
        }
    }

    pub const fn selected(&self) -> Choice {
        self.selected
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogStep<Choice> {
        match key.code {
            KeyCode::Left | KeyCode::BackTab => self.shift(-1),
            KeyCode::Right | KeyCode::Tab => self.shift(1),
            KeyCode::Enter => return DialogStep::Done(self.selected),
            KeyCode::Char('s' | 'S') => return DialogStep::Done(Choice::Save),
            KeyCode::Char('d' | 'D') => return DialogStep::Done(Choice::Discard),
            KeyCode::Char('c' | 'C') | KeyCode::Esc => return DialogStep::Done(Choice::Cancel),
            _ => {}
        }
        DialogStep::Pending
    }

    fn shift(&mut self, delta: isize) {
        let count = Choice::ALL.len();
        let current = Choice::ALL
            .iter()
            .position(|c| *c == self.selected)
            .unwrap_or(0);
        let next = (current + count).saturating_add_signed(delta) % count;
        self.selected = Choice::ALL[next];
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_picks_focused_button() {
        let mut question = Question::new("TextEdit", "Save?");
        assert_eq!(question.selected(), Choice::Save);
        question.handle_key(key(KeyCode::Right));
        assert_eq!(question.handle_key(key(KeyCode::Enter)), DialogStep::Done(Choice::Discard));
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut question = Question::new("t", "m");
        question.handle_key(key(KeyCode::Left));
        assert_eq!(question.selected(), Choice::Cancel);
        question.handle_key(key(KeyCode::Tab));
        assert_eq!(question.selected(), Choice::Save);
    }

    #[test]
    fn test_shortcuts() {
        let mut question = Question::new("t", "m");
        assert_eq!(question.handle_key(key(KeyCode::Char('d'))), DialogStep::Done(Choice::Discard));
        assert_eq!(question.handle_key(key(KeyCode::Char('S'))), DialogStep::Done(Choice::Save));
        assert_eq!(question.handle_key(key(KeyCode::Esc)), DialogStep::Done(Choice::Cancel));
        assert_eq!(question.handle_key(key(KeyCode::Char('x'))), DialogStep::Pending);
    }
}
