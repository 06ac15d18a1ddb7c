//! Terminal UI components.
//!
//! This module contains all rendering code:
//! - the main screen (title bar, toolbar, text area, toast and status bars)
//! - modal dialog overlays drawn over the last main frame
//! - [`style`]: theming and colors

pub mod style;

mod overlays;
mod render;
mod status;

pub use overlays::{
    paint_backdrop, render_file_picker, render_message_box, render_prompt, render_question,
};
pub use render::{ScreenLayout, render, screen_layout};

use unicode_width::UnicodeWidthChar;

/// Columns a tab occupies in the text area.
pub const TAB_WIDTH: usize = 4;

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}

/// Line numbers plus the separating space.
pub const fn gutter_width(total_lines: usize) -> u16 {
    line_number_width(total_lines) + 1
}

/// Display columns taken by one character.
pub fn char_width(ch: char) -> usize {
    if ch == '\t' {
        TAB_WIDTH
    } else {
        ch.width().unwrap_or(0)
    }
}

/// Display columns taken by `text`.
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Byte offset of the character drawn at display column `target`.
///
/// Columns past the end map to the end of the line.
pub fn byte_col_at_display(line: &str, target: usize) -> usize {
    let mut col = 0;
    for (idx, ch) in line.char_indices() {
        let width = char_width(ch);
        if target < col + width.max(1) {
            return idx;
        }
        col += width;
    }
    line.len()
}
