use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use super::{Choice, Dialogs};
use crate::config::FileFilter;

/// Dialogs answered from queues, recording what was asked.
///
/// An exhausted queue answers like a cancelled prompt.
#[derive(Debug, Default)]
pub struct ScriptedDialogs {
    pub open_paths: VecDeque<PathBuf>,
    pub save_paths: VecDeque<Option<PathBuf>>,
    pub inputs: VecDeque<Option<String>>,
    pub answers: VecDeque<Choice>,
    pub open_starts: Vec<Option<PathBuf>>,
    pub questions: Vec<String>,
    pub save_suggestions: Vec<PathBuf>,
    pub input_initials: Vec<String>,
    pub warnings: Vec<String>,
    pub information: Vec<(String, String)>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(mut self, path: impl Into<PathBuf>) -> Self {
        self.open_paths.push_back(path.into());
        self
    }

    pub fn save_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_paths.push_back(Some(path.into()));
        self
    }

    pub fn cancel_save(mut self) -> Self {
        self.save_paths.push_back(None);
        self
    }

    pub fn input(mut self, text: impl Into<String>) -> Self {
        self.inputs.push_back(Some(text.into()));
        self
    }

    pub fn answer(mut self, choice: Choice) -> Self {
        self.answers.push_back(choice);
        self
    }

    pub fn asked_nothing(&self) -> bool {
        self.questions.is_empty()
            && self.save_suggestions.is_empty()
            && self.input_initials.is_empty()
            && self.warnings.is_empty()
    }
}

impl Dialogs for ScriptedDialogs {
    fn open_file(
        &mut self,
        _caption: &str,
        _filter: &FileFilter,
        start_dir: Option<&Path>,
    ) -> Option<PathBuf> {
        self.open_starts.push(start_dir.map(Path::to_path_buf));
        self.open_paths.pop_front()
    }

    fn save_file(
        &mut self,
        _caption: &str,
        _filter: &FileFilter,
        suggested: &Path,
    ) -> Option<PathBuf> {
        self.save_suggestions.push(suggested.to_path_buf());
        self.save_paths.pop_front().flatten()
    }

    fn input_text(&mut self, _title: &str, _label: &str, initial: &str) -> Option<String> {
        self.input_initials.push(initial.to_string());
        self.inputs.pop_front().flatten()
    }

    fn question(&mut self, _title: &str, message: &str) -> Choice {
        self.questions.push(message.to_string());
        self.answers.pop_front().unwrap_or(Choice::Cancel)
    }

    fn warning(&mut self, _title: &str, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn information(&mut self, title: &str, message: &str) {
        self.information.push((title.to_string(), message.to_string()));
    }
}
