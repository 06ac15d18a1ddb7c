use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

use super::style::Theme;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect, theme: &Theme) {
    let config = model.controller.config();
    let document = model.controller.document();
    let filename = document.display_name(&config.untitled_name);
    let dirty_indicator = if document.is_modified() {
        " [modified]"
    } else {
        ""
    };

    let cursor = model.buffer.cursor();
    let line_text = model.buffer.line_at(cursor.line).unwrap_or_default();
    let column = line_text
        .get(..cursor.col)
        .map_or(cursor.col, |before| before.chars().count());
    let cursor_info = format!("Ln {}, Col {}", cursor.line + 1, column + 1);

    let status = format!(" {filename}{dirty_indicator}  {cursor_info}  F1:help");

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(theme.status_bg).fg(theme.status_fg));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
