use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};
use crate::editor::Direction;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) if !model.help_visible => {
                Some(Message::InsertText(normalize_paste(text)))
            }
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }

        match mouse.kind {
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(3)),
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(3)),
            MouseEventKind::Down(MouseButton::Left) => {
                let area = model.editor_area();
                if !point_in_rect(mouse.column, mouse.row, area) {
                    return None;
                }
                let total_lines = model.buffer.line_count();
                let rel_row = usize::from(mouse.row - area.y);
                let line = (model.scroll_offset + rel_row).min(total_lines.saturating_sub(1));
                let text_x = area.x + crate::ui::gutter_width(total_lines);
                let display_col = usize::from(mouse.column.saturating_sub(text_x)) + model.scroll_col;
                let text = model.buffer.line_at(line).unwrap_or_default();
                Some(Message::MoveTo(
                    line,
                    crate::ui::byte_col_at_display(&text, display_col),
                ))
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        if ctrl {
            return match key.code {
                // File
                KeyCode::Char('n') => Some(Message::NewFile),
                KeyCode::Char('o') => Some(Message::OpenFile),
                KeyCode::Char('w') => Some(Message::CloseFile),
                KeyCode::Char('s') if shift => Some(Message::SaveFileAs),
                KeyCode::Char('S') => Some(Message::SaveFileAs),
                KeyCode::Char('s') => Some(Message::SaveFile),
                KeyCode::Char('q') => Some(Message::Quit),

                // Edit
                KeyCode::Char('x') => Some(Message::Cut),
                KeyCode::Char('c') => Some(Message::Copy),
                KeyCode::Char('v') => Some(Message::Paste),
                KeyCode::Char('z') if shift => Some(Message::Redo),
                KeyCode::Char('Z' | 'y') => Some(Message::Redo),
                KeyCode::Char('z') => Some(Message::Undo),
                KeyCode::Char('a') => Some(Message::SelectAll),

                // Navigation
                KeyCode::Left => Some(Message::MoveWordLeft),
                KeyCode::Right => Some(Message::MoveWordRight),
                KeyCode::Home => Some(Message::MoveToStart),
                KeyCode::End => Some(Message::MoveToEnd),
                _ => None,
            };
        }

        if alt {
            return match key.code {
                KeyCode::Char('s' | 'S') => Some(Message::SaveFileAs),
                _ => None,
            };
        }

        match key.code {
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::F(2) => Some(Message::RenameFile),
            KeyCode::F(12) => Some(Message::About),

            // Selection
            KeyCode::Up if shift => Some(Message::ExtendSelection(Direction::Up)),
            KeyCode::Down if shift => Some(Message::ExtendSelection(Direction::Down)),
            KeyCode::Left if shift => Some(Message::ExtendSelection(Direction::Left)),
            KeyCode::Right if shift => Some(Message::ExtendSelection(Direction::Right)),
            KeyCode::Home if shift => Some(Message::SelectToHome),
            KeyCode::End if shift => Some(Message::SelectToEnd),

            // Navigation
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),

            // Editing
            KeyCode::Enter => Some(Message::SplitLine),
            KeyCode::Tab => Some(Message::InsertChar('\t')),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Char(c) => Some(Message::InsertChar(c)),
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

/// Terminals deliver pasted line breaks as `\r` or `\r\n`.
fn normalize_paste(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x
        && col < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}
