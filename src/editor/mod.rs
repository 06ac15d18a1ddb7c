//! Text widget for the single open document.
//!
//! Provides a rope-backed text buffer with cursor, selection, undo/redo and
//! modified-state tracking, designed for integration into the TEA architecture.

mod buffer;
mod history;

pub use buffer::{Cursor, Direction, EditorBuffer};

/// The text widget as the document controller sees it.
///
/// Calls made through this trait are programmatic: they never raise a
/// modification-changed notification. Only user edits on the concrete
/// buffer do.
pub trait TextBuffer {
    /// The full text content.
    fn text(&self) -> String;

    /// Replace the whole content, clearing undo history and the modified flag.
    fn set_text(&mut self, text: &str);

    /// Remove all content, clearing undo history and the modified flag.
    fn clear(&mut self) {
        self.set_text("");
    }

    /// Whether the content differs from the last clean state.
    fn is_modified(&self) -> bool;

    /// Set or reset the modified flag (e.g. after saving).
    fn set_modified(&mut self, modified: bool);
}
