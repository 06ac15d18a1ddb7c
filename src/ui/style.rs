//! Colors and styles for the editor screen and its dialogs.

use ratatui::style::{Color, Modifier, Style};

/// Complete color theme for the editor.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Title bar showing the window title
    pub title_bar: Style,
    /// Toolbar line with command shortcuts
    pub toolbar: Style,
    /// Toolbar entry for a command that does not apply right now
    pub toolbar_disabled: Style,
    /// Line numbers in the gutter
    pub gutter: Style,
    /// Block cursor in the text area
    pub cursor: Style,
    /// Selected text
    pub selection: Style,
    /// Status bar background
    pub status_bg: Color,
    /// Status bar foreground
    pub status_fg: Color,
    /// Dialog body
    pub popup: Style,
    /// Dialog button without focus
    pub button: Style,
    /// Focused dialog button or selected list row
    pub focused: Style,
    /// Input line in prompts and pickers
    pub input: Style,
    /// Section headings in the help overlay
    pub section: Style,
    /// Hints and other secondary text
    pub dim: Style,
    /// Border of a warning box
    pub warning_border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title_bar: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            toolbar: Style::default().bg(Color::Indexed(236)).fg(Color::Indexed(252)),
            toolbar_disabled: Style::default().bg(Color::Indexed(236)).fg(Color::Indexed(242)),
            gutter: Style::default().fg(Color::DarkGray),
            cursor: Style::default().bg(Color::White).fg(Color::Black),
            selection: Style::default().bg(Color::Indexed(24)).fg(Color::White),
            status_bg: Color::DarkGray,
            status_fg: Color::White,
            popup: Style::default().bg(Color::Black).fg(Color::White),
            button: Style::default().fg(Color::White),
            focused: Style::default()
                .bg(Color::White)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            input: Style::default().bg(Color::Indexed(238)).fg(Color::White),
            section: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Indexed(245)),
            warning_border: Style::default().fg(Color::Yellow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_is_visible_against_text() {
        let theme = Theme::default();
        assert_ne!(theme.cursor.bg, theme.cursor.fg);
        assert!(theme.cursor.bg.is_some());
    }

    #[test]
    fn test_focused_button_differs_from_plain() {
        let theme = Theme::default();
        assert_ne!(theme.focused, theme.button);
        assert!(theme.title_bar.add_modifier.contains(Modifier::BOLD));
    }
}
