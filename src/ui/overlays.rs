use ratatui::buffer::Buffer;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::dialog::{Choice, FilePicker, MessageBox, MessageLevel, PickerMode, Prompt, Question};

use super::style::Theme;

pub fn render_help_overlay(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_width = area.width.saturating_sub(12).clamp(20, 56);
    let popup_height = area.height.saturating_sub(4).clamp(8, 30);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("File", theme.section));
    lines.push(Line::raw("  Ctrl+N              New"));
    lines.push(Line::raw("  Ctrl+O              Open"));
    lines.push(Line::raw("  Ctrl+W              Close"));
    lines.push(Line::raw("  Ctrl+S              Save"));
    lines.push(Line::raw("  Ctrl+Shift+S, Alt+S Save as"));
    lines.push(Line::raw("  F2                  Rename"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Edit", theme.section));
    lines.push(Line::raw("  Ctrl+X / C / V      Cut / copy / paste"));
    lines.push(Line::raw("  Ctrl+Z              Undo"));
    lines.push(Line::raw("  Ctrl+Y, Ctrl+Shift+Z Redo"));
    lines.push(Line::raw("  Ctrl+A              Select all"));
    lines.push(Line::raw("  Shift+arrows        Extend selection"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Navigation", theme.section));
    lines.push(Line::raw("  Arrows, Home/End    Move cursor"));
    lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    lines.push(Line::raw("  Ctrl+Home/End       Buffer start / end"));
    lines.push(Line::raw("  PageUp/PageDown     Page"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Other", theme.section));
    lines.push(Line::raw("  F1                  Toggle help"));
    lines.push(Line::raw("  F12                 About"));
    lines.push(Line::raw("  Ctrl+Q              Quit"));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(theme.popup);
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let content_height = inner.height.saturating_sub(1);
    let visible: Vec<Line> = lines.into_iter().take(usize::from(content_height)).collect();
    frame.render_widget(
        Paragraph::new(visible),
        Rect::new(inner.x, inner.y, inner.width, content_height),
    );

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    frame.render_widget(
        Paragraph::new(Line::styled("Any key closes", theme.dim)),
        footer_area,
    );
}

/// Copy `backdrop` into the frame where both overlap.
///
/// Dialogs draw over the last main-screen frame instead of redrawing it.
pub fn paint_backdrop(frame: &mut Frame, backdrop: &Buffer) {
    let area = frame.area().intersection(backdrop.area);
    let buf = frame.buffer_mut();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let (Some(src), Some(dst)) = (backdrop.cell((x, y)), buf.cell_mut((x, y))) {
                *dst = src.clone();
            }
        }
    }
}

pub fn render_prompt(frame: &mut Frame, prompt: &Prompt) {
    let theme = Theme::default();
    let area = frame.area();
    let popup = centered_popup_rect(area.width.saturating_sub(4).min(60), 6, area);
    let block = dialog_block(&prompt.title, &theme);
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let lines = vec![
        Line::raw(prompt.label.clone()),
        input_line(prompt, usize::from(inner.width), &theme),
        Line::styled("Enter: OK  Esc: cancel", theme.dim),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn render_question(frame: &mut Frame, question: &Question) {
    let theme = Theme::default();
    let area = frame.area();
    let popup = centered_popup_rect(area.width.saturating_sub(4).min(56), 7, area);
    let block = dialog_block(&question.title, &theme);
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let message_area = Rect {
        height: inner.height.saturating_sub(1),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(question.message.as_str()).wrap(Wrap { trim: true }),
        message_area,
    );

    let mut buttons: Vec<Span> = Vec::new();
    for choice in Choice::ALL {
        let style = if choice == question.selected() {
            theme.focused
        } else {
            theme.button
        };
        buttons.push(Span::styled(format!("[ {} ]", choice.label()), style));
        buttons.push(Span::raw("  "));
    }
    buttons.pop();
    let button_area = Rect {
        y: inner.y + inner.height.saturating_sub(1),
        height: inner.height.min(1),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(Line::from(buttons)).alignment(Alignment::Center),
        button_area,
    );
}

pub fn render_message_box(frame: &mut Frame, message: &MessageBox) {
    let theme = Theme::default();
    let area = frame.area();
    let popup = centered_popup_rect(area.width.saturating_sub(4).min(56), 7, area);
    let mut block = dialog_block(&message.title, &theme);
    if message.level == MessageLevel::Warning {
        block = block.border_style(theme.warning_border);
    }
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let message_area = Rect {
        height: inner.height.saturating_sub(1),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(message.message.as_str()).wrap(Wrap { trim: true }),
        message_area,
    );
    let button_area = Rect {
        y: inner.y + inner.height.saturating_sub(1),
        height: inner.height.min(1),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(Span::styled("[ OK ]", theme.focused)).alignment(Alignment::Center),
        button_area,
    );
}

pub fn render_file_picker(frame: &mut Frame, picker: &FilePicker) {
    let theme = Theme::default();
    let area = frame.area();
    let popup = centered_popup_rect(
        area.width.saturating_sub(8).clamp(30, 80),
        area.height.saturating_sub(4).clamp(10, 24),
        area,
    );
    let title = format!("{} \u{2502} {}", picker.caption, picker.filter());
    let block = dialog_block(&title, &theme);
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Directory line, list, error/blank line, input line, hint line.
    let list_height = usize::from(inner.height.saturating_sub(4));
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::styled(picker.dir().display().to_string(), theme.dim));

    let start = (picker.selected() + 1).saturating_sub(list_height);
    for (idx, entry) in picker
        .entries()
        .iter()
        .enumerate()
        .skip(start)
        .take(list_height)
    {
        let name = if entry.is_dir {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };
        if idx == picker.selected() {
            lines.push(Line::styled(format!("> {name}"), theme.focused));
        } else {
            lines.push(Line::raw(format!("  {name}")));
        }
    }
    while lines.len() < list_height + 1 {
        lines.push(Line::raw(""));
    }

    let notice = if let Some(path) = picker.pending_replace() {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Line::styled(format!("{name} already exists. Replace it? (y/n)"), theme.warning_border)
    } else {
        picker.error().map_or_else(
            || Line::raw(""),
            |err| Line::styled(err.to_string(), theme.warning_border),
        )
    };
    lines.push(notice);

    let label = "File name: ";
    let input_width = usize::from(inner.width).saturating_sub(label.len());
    let mut input_spans = vec![Span::raw(label)];
    input_spans.extend(input_line(picker.input(), input_width, &theme).spans);
    lines.push(Line::from(input_spans));

    let action = match picker.mode {
        PickerMode::Open => "open",
        PickerMode::Save => "save",
    };
    let hint = if picker.pending_replace().is_some() {
        "Enter/y: replace  Esc/n: back".to_string()
    } else {
        format!("Enter: {action}  Tab: complete  Backspace: up  Esc: cancel")
    };
    lines.push(Line::styled(hint, theme.dim));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn dialog_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(theme.popup)
}

/// The prompt's value scrolled so the cursor stays visible, cursor drawn as a block.
fn input_line(prompt: &Prompt, width: usize, theme: &Theme) -> Line<'static> {
    let chars: Vec<char> = prompt.value().chars().collect();
    let cursor = prompt.cursor();
    let start = (cursor + 1).saturating_sub(width.max(1));
    let mut spans = Vec::new();

    let before: String = chars[start..cursor].iter().collect();
    spans.push(Span::styled(before, theme.input));
    let at = chars.get(cursor).map_or(' ', |c| *c);
    spans.push(Span::styled(at.to_string(), theme.cursor));
    let after_end = (start + width).min(chars.len());
    if cursor + 1 < after_end {
        let after: String = chars[cursor + 1..after_end].iter().collect();
        spans.push(Span::styled(after, theme.input));
    }
    Line::from(spans)
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
