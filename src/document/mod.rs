//! The single open document and the controller that manages it.
//!
//! [`Document`] is the state slot: an optional file path plus the modified
//! flag. The text lives in the editor buffer, never here.
//! [`DocumentController`] runs the file commands against a
//! [`TextBuffer`](crate::editor::TextBuffer) and a
//! [`Dialogs`](crate::dialog::Dialogs) implementation and derives the window
//! title from the resulting state.

mod controller;
pub mod file;

pub use controller::DocumentController;

use std::path::{Path, PathBuf};

/// Result of a file command, used by the shell for feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command ran to completion.
    Completed,
    /// The user dismissed a prompt; nothing changed.
    Cancelled,
    /// An I/O error was reported to the user; prior state kept.
    Failed,
    /// The command does not apply to the current state.
    Unavailable,
}

/// The document currently shown in the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    path: Option<PathBuf>,
    modified: bool,
}

impl Document {
    /// A clean document backed by `path`.
    pub const fn saved(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            modified: false,
        }
    }

    /// Backing file, `None` if the document was never saved.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    pub(crate) const fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    pub(crate) fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    /// Base name of the backing file, or `untitled` when there is none.
    pub fn display_name(&self, untitled: &str) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(
                || untitled.to_string(),
                |name| name.to_string_lossy().into_owned(),
            )
    }

    /// Display name with a trailing `*` while there are unsaved changes.
    pub fn window_title(&self, untitled: &str) -> String {
        let name = self.display_name(untitled);
        if self.modified {
            format!("{name}*")
        } else {
            name
        }
    }
}
