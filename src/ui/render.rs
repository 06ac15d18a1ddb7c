use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::Model;
use crate::editor::Cursor;

use super::style::Theme;
use super::{TAB_WIDTH, char_width, line_number_width, overlays, status};

/// Rows of the main screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub toolbar: Rect,
    pub editor: Rect,
    pub toast: Option<Rect>,
    pub status: Rect,
}

/// Split the screen into title bar, toolbar, text area, toast row and status bar.
pub fn screen_layout(area: Rect, toast_active: bool) -> ScreenLayout {
    let row = |offset: u16| Rect {
        y: area.y + offset.min(area.height.saturating_sub(1)),
        height: area.height.min(1),
        ..area
    };
    let toast_rows = u16::from(toast_active);
    let editor_height = area.height.saturating_sub(3 + toast_rows);
    ScreenLayout {
        title: row(0),
        toolbar: row(1),
        editor: Rect {
            y: area.y + 2.min(area.height),
            height: editor_height,
            ..area
        },
        toast: toast_active.then(|| row(2 + editor_height)),
        status: row(area.height.saturating_sub(1)),
    }
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let theme = Theme::default();
    let layout = screen_layout(area, model.active_toast().is_some());

    render_title_bar(model, frame, layout.title, &theme);
    render_toolbar(model, frame, layout.toolbar, &theme);
    render_editor(model, frame, layout.editor, &theme);
    if let Some(toast_area) = layout.toast {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, layout.status, &theme);

    if model.help_visible {
        overlays::render_help_overlay(frame, area, &theme);
    }
}

fn render_title_bar(model: &Model, frame: &mut Frame, area: Rect, theme: &Theme) {
    let title = Paragraph::new(model.title())
        .alignment(Alignment::Center)
        .style(theme.title_bar);
    frame.render_widget(title, area);
}

fn render_toolbar(model: &Model, frame: &mut Frame, area: Rect, theme: &Theme) {
    let rename_style = if model.controller.can_rename() {
        theme.toolbar
    } else {
        theme.toolbar_disabled
    };
    let spans = vec![
        Span::raw(" ^N New  ^O Open  ^W Close  ^S Save  M-S Save As  "),
        Span::styled("F2 Rename", rename_style),
        Span::raw("  \u{2502}  ^X Cut  ^C Copy  ^V Paste  ^Z Undo  ^Y Redo  ^A All  \u{2502}  F1 Help  ^Q Quit"),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.toolbar), area);
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect, theme: &Theme) {
    let buf = &model.buffer;
    let total_lines = buf.line_count();
    let number_width = usize::from(line_number_width(total_lines));
    let text_width = usize::from(area.width).saturating_sub(number_width + 1);
    let selection = buf.selection();
    let cursor = buf.cursor();

    let mut content: Vec<Line> = Vec::new();
    for row in 0..usize::from(area.height) {
        let line_idx = model.scroll_offset + row;
        if line_idx >= total_lines {
            content.push(Line::styled(format!("{:>number_width$} ", "~"), theme.gutter));
            continue;
        }
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>number_width$} ", line_idx + 1);

        let mut spans = vec![Span::styled(line_num, theme.gutter)];
        let view = LineView {
            text: &line_text,
            scroll_col: model.scroll_col,
            width: text_width,
            selection: selected_cols(selection, line_idx, line_text.len()),
            cursor: (line_idx == cursor.line).then_some(cursor.col),
        };
        spans.extend(view.spans(theme));
        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

/// Selected byte columns on `line_idx`; an end past `line_len` covers the line break.
fn selected_cols(
    selection: Option<(Cursor, Cursor)>,
    line_idx: usize,
    line_len: usize,
) -> Option<(usize, usize)> {
    let (start, end) = selection?;
    if line_idx < start.line || line_idx > end.line {
        return None;
    }
    let from = if line_idx == start.line { start.col } else { 0 };
    let to = if line_idx == end.line {
        end.col
    } else {
        line_len + 1
    };
    Some((from, to))
}

/// One text line clipped to the visible columns.
struct LineView<'a> {
    text: &'a str,
    scroll_col: usize,
    width: usize,
    selection: Option<(usize, usize)>,
    cursor: Option<usize>,
}

impl LineView<'_> {
    fn style_at(&self, byte: usize, theme: &Theme) -> Style {
        if self.cursor == Some(byte) {
            theme.cursor
        } else if self.selection.is_some_and(|(from, to)| byte >= from && byte < to) {
            theme.selection
        } else {
            Style::default()
        }
    }

    fn spans(&self, theme: &Theme) -> Vec<Span<'static>> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut run = String::new();
        let mut run_style = Style::default();
        let mut col = 0;
        let mut drawn = 0;

        for (byte, ch) in self.text.char_indices() {
            let width = char_width(ch);
            if col < self.scroll_col {
                col += width;
                continue;
            }
            if drawn + width > self.width {
                break;
            }
            let style = self.style_at(byte, theme);
            if style != run_style && !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), run_style));
            }
            run_style = style;
            if ch == '\t' {
                run.push_str(&" ".repeat(TAB_WIDTH));
            } else {
                run.push(ch);
            }
            col += width;
            drawn += width;
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, run_style));
        }

        // Cursor or selected line break past the last character.
        let end = self.text.len();
        let end_visible = super::display_width(self.text) >= self.scroll_col && drawn < self.width;
        if end_visible {
            let style = self.style_at(end, theme);
            if style != Style::default() {
                spans.push(Span::styled(" ", style));
            }
        }
        spans
    }
}
