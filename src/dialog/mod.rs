//! Modal dialogs.
//!
//! [`Dialogs`] is everything the document controller may ask of the user.
//! The submodules hold the key-driven state machine of each dialog kind; the
//! terminal shell wraps them in a blocking modal loop, tests script answers.

mod message;
mod picker;
mod prompt;
mod question;
#[cfg(test)]
pub(crate) mod scripted;

pub use message::{MessageBox, MessageLevel};
pub use picker::{FilePicker, PickerEntry, PickerMode};
pub use prompt::Prompt;
pub use question::Question;

use std::path::{Path, PathBuf};

use crate::config::FileFilter;

/// Answer to a save-changes question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Save,
    Discard,
    Cancel,
}

impl Choice {
    pub const ALL: [Self; 3] = [Self::Save, Self::Discard, Self::Cancel];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Save => "Save",
            Self::Discard => "Discard",
            Self::Cancel => "Cancel",
        }
    }
}

/// Progress of a dialog after handling one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogStep<T> {
    Pending,
    Done(T),
}

/// User prompts used by the document controller.
///
/// `None` from a picker or input prompt means the user cancelled.
pub trait Dialogs {
    /// Pick an existing file, starting in `start_dir` when given.
    fn open_file(
        &mut self,
        caption: &str,
        filter: &FileFilter,
        start_dir: Option<&Path>,
    ) -> Option<PathBuf>;

    fn save_file(&mut self, caption: &str, filter: &FileFilter, suggested: &Path)
    -> Option<PathBuf>;

    fn input_text(&mut self, title: &str, label: &str, initial: &str) -> Option<String>;

    fn question(&mut self, title: &str, message: &str) -> Choice;

    fn warning(&mut self, title: &str, message: &str);

    fn information(&mut self, title: &str, message: &str);
}
