//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! File commands need dialogs and the filesystem, so they run after
//! `update` in the side-effect handler, which drives the document
//! controller with terminal-backed [`Dialogs`](crate::dialog::Dialogs).

mod dialogs;
mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::EditorConfig;

/// Main application struct that owns the startup options and runs the event loop.
pub struct App {
    config: EditorConfig,
    initial_file: Option<PathBuf>,
}

impl App {
    /// Create a new application with an empty untitled buffer.
    pub const fn new(config: EditorConfig) -> Self {
        Self {
            config,
            initial_file: None,
        }
    }

    /// Load this file at startup.
    pub fn with_initial_file(mut self, path: Option<PathBuf>) -> Self {
        self.initial_file = path;
        self
    }
}
