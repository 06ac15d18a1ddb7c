use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::config::EditorConfig;
use crate::document::DocumentController;
use crate::editor::EditorBuffer;

const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The open document, its path and the window title
    pub controller: DocumentController,
    /// Text, cursor, selection and undo history
    pub buffer: EditorBuffer,
    /// First buffer line shown in the text area
    pub scroll_offset: usize,
    /// First display column shown in the text area
    pub scroll_col: usize,
    /// Terminal width in columns
    pub width: u16,
    /// Terminal height in rows
    pub height: u16,
    /// Editor-local clipboard register used by Paste
    pub clipboard: Option<String>,
    /// Whether the key-binding overlay is shown
    pub help_visible: bool,
    /// Whether the event loop should exit
    pub should_quit: bool,
    toast: Option<Toast>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("title", &self.controller.title())
            .field("path", &self.controller.document().path())
            .field("buffer", &self.buffer)
            .field("scroll_offset", &self.scroll_offset)
            .field("help_visible", &self.help_visible)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model with an empty untitled buffer.
    pub fn new(config: EditorConfig, terminal_size: (u16, u16)) -> Self {
        Self {
            controller: DocumentController::new(config),
            buffer: EditorBuffer::empty(),
            scroll_offset: 0,
            scroll_col: 0,
            width: terminal_size.0,
            height: terminal_size.1,
            clipboard: None,
            help_visible: false,
            should_quit: false,
            toast: None,
        }
    }

    /// Current window title.
    pub fn title(&self) -> &str {
        self.controller.title()
    }

    /// Rect of the text area, gutter included.
    pub fn editor_area(&self) -> Rect {
        let area = Rect::new(0, 0, self.width, self.height);
        crate::ui::screen_layout(area, self.toast.is_some()).editor
    }

    /// Number of buffer lines visible at once.
    pub fn text_rows(&self) -> usize {
        usize::from(self.editor_area().height)
    }

    /// Number of text columns visible at once, gutter excluded.
    pub fn text_cols(&self) -> usize {
        let gutter = crate::ui::gutter_width(self.buffer.line_count());
        usize::from(self.width.saturating_sub(gutter))
    }

    /// Forward a pending modification-changed notification to the controller.
    pub(super) fn sync_modified(&mut self) {
        if let Some(modified) = self.buffer.take_modification_change() {
            self.controller.modification_changed(modified);
        }
    }

    /// Scroll so the cursor is inside the text area.
    pub(super) fn ensure_cursor_visible(&mut self) {
        let cursor = self.buffer.cursor();
        let rows = self.text_rows();
        if rows == 0 {
            self.scroll_offset = cursor.line;
        } else if cursor.line < self.scroll_offset {
            self.scroll_offset = cursor.line;
        } else if cursor.line >= self.scroll_offset + rows {
            self.scroll_offset = cursor.line + 1 - rows;
        }

        let line = self.buffer.line_at(cursor.line).unwrap_or_default();
        let col = line
            .get(..cursor.col)
            .map_or(0, crate::ui::display_width);
        let cols = self.text_cols();
        if cols == 0 {
            self.scroll_col = col;
        } else if col < self.scroll_col {
            self.scroll_col = col;
        } else if col >= self.scroll_col + cols {
            self.scroll_col = col + 1 - cols;
        }
    }

    /// Reset scrolling after the buffer content was replaced.
    pub(super) const fn reset_view(&mut self) {
        self.scroll_offset = 0;
        self.scroll_col = 0;
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(EditorConfig::default(), (80, 24))
    }
}
