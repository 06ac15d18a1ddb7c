use crossterm::event::{KeyCode, KeyEvent};

use super::DialogStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Warning,
    Information,
}

/// A dismissable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBox {
    pub level: MessageLevel,
    pub title: String,
    pub message: String,
}

impl MessageBox {
    pub fn new(level: MessageLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn handle_key(&self, key: KeyEvent) -> DialogStep<()> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => DialogStep::Done(()),
            _ => DialogStep::Pending,
        }
    }
}
