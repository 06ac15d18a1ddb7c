// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. document::DocumentController)
    clippy::module_name_repetitions
)]

//! # TextEdit
//!
//! A minimal plain-text editor for the terminal.
//!
//! TextEdit edits one document at a time with:
//! - New, Open, Close, Save, Save As and Rename file commands
//! - Cut, copy, paste, undo and redo
//! - A window title that tracks the file name and unsaved changes
//!
//! ## Architecture
//!
//! TextEdit uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! File commands need dialogs and the filesystem. They run as side effects
//! after `update`, through the [`document::DocumentController`].
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`document`]: Document state, file commands and file I/O
//! - [`editor`]: Rope-backed text buffer with undo/redo
//! - [`dialog`]: Modal dialogs (file picker, prompt, question, message box)
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod dialog;
pub mod document;
pub mod editor;
pub mod error;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::config::EditorConfig;
    pub use crate::dialog::{Choice, Dialogs};
    pub use crate::document::{CommandOutcome, Document, DocumentController};
    pub use crate::editor::{EditorBuffer, TextBuffer};
    pub use crate::error::DocumentError;
}
