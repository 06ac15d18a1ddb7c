use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use super::{DialogStep, Prompt};
use crate::config::FileFilter;

const PARENT_ENTRY: &str = "..";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Open,
    Save,
}

/// One row of the directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub name: String,
    pub is_dir: bool,
}

/// File chooser over one directory at a time.
///
/// The listing shows `..`, then sub-directories, then files matching the
/// filter. The input line takes a name or a path relative to the listed
/// directory; when it is empty, Enter acts on the selected entry.
///
/// In save mode an existing target must be confirmed before it is returned.
#[derive(Debug, Clone)]
pub struct FilePicker {
    pub mode: PickerMode,
    pub caption: String,
    filter: FileFilter,
    dir: PathBuf,
    entries: Vec<PickerEntry>,
    selected: usize,
    input: Prompt,
    error: Option<String>,
    replace: Option<PathBuf>,
}

impl FilePicker {
    /// Open a picker at `start`: a directory, or a file whose name pre-fills the input.
    pub fn new(mode: PickerMode, caption: impl Into<String>, filter: &FileFilter, start: &Path) -> Self {
        let start = std::path::absolute(start).unwrap_or_else(|_| start.to_path_buf());
        let (dir, name) = if start.is_dir() {
            (start, String::new())
        } else {
            let name = start
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let dir = start
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            (dir, name)
        };
        let caption = caption.into();
        let mut picker = Self {
            mode,
            input: Prompt::new(caption.clone(), "File name:", &name),
            caption,
            filter: filter.clone(),
            dir,
            entries: Vec::new(),
            selected: 0,
            error: None,
            replace: None,
        };
        picker.refresh();
        picker
    }

    /// Directory currently listed.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[PickerEntry] {
        &self.entries
    }

    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub const fn input(&self) -> &Prompt {
        &self.input
    }

    pub const fn filter(&self) -> &FileFilter {
        &self.filter
    }

    /// Last listing error, if the directory could not be read.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Existing file awaiting a replace confirmation.
    pub fn pending_replace(&self) -> Option<&Path> {
        self.replace.as_deref()
    }

    pub fn insert_str(&mut self, text: &str) {
        if self.replace.is_none() {
            self.input.insert_str(text);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogStep<Option<PathBuf>> {
        if self.replace.is_some() {
            return self.confirm_replace(key);
        }
        match key.code {
            KeyCode::Esc => return DialogStep::Done(None),
            KeyCode::Enter => return self.activate(),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(self.entries.len().saturating_sub(1));
            }
            KeyCode::PageUp => self.selected = self.selected.saturating_sub(10),
            KeyCode::PageDown => {
                self.selected = (self.selected + 10).min(self.entries.len().saturating_sub(1));
            }
            KeyCode::Tab => self.complete(),
            KeyCode::Backspace if self.input.value().is_empty() => self.go_up(),
            _ => {
                self.input.edit(key);
            }
        }
        DialogStep::Pending
    }

    fn activate(&mut self) -> DialogStep<Option<PathBuf>> {
        let typed = self.input.value().trim().to_string();
        if !typed.is_empty() {
            let path = self.dir.join(&typed);
            if path.is_dir() {
                self.change_dir(path);
                return DialogStep::Pending;
            }
            return self.submit(path);
        }
        let Some(entry) = self.entries.get(self.selected).cloned() else {
            return DialogStep::Pending;
        };
        if entry.name == PARENT_ENTRY {
            self.go_up();
            DialogStep::Pending
        } else if entry.is_dir {
            self.change_dir(self.dir.join(&entry.name));
            DialogStep::Pending
        } else {
            self.submit(self.dir.join(&entry.name))
        }
    }

    fn submit(&mut self, path: PathBuf) -> DialogStep<Option<PathBuf>> {
        if self.mode == PickerMode::Save && path.exists() {
            debug!(path = %path.display(), "Asking before replacing");
            self.replace = Some(path);
            return DialogStep::Pending;
        }
        DialogStep::Done(Some(path))
    }

    fn confirm_replace(&mut self, key: KeyEvent) -> DialogStep<Option<PathBuf>> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y' | 'Y') => DialogStep::Done(self.replace.take()),
            KeyCode::Esc | KeyCode::Char('n' | 'N') => {
                self.replace = None;
                DialogStep::Pending
            }
            _ => DialogStep::Pending,
        }
    }

    fn complete(&mut self) {
        let Some(entry) = self.entries.get(self.selected) else {
            return;
        };
        if entry.is_dir {
            let name = format!("{}/", entry.name);
            self.input.set_value(&name);
        } else {
            let name = entry.name.clone();
            self.input.set_value(&name);
        }
    }

    fn go_up(&mut self) {
        if let Some(parent) = self.dir.parent() {
            let parent = parent.to_path_buf();
            self.change_dir(parent);
        }
    }

    fn change_dir(&mut self, dir: PathBuf) {
        debug!(dir = %dir.display(), "Picker changed directory");
        self.dir = dir;
        self.input.set_value("");
        self.selected = 0;
        self.refresh();
    }

    fn refresh(&mut self) {
        let mut entries = Vec::new();
        if self.dir.parent().is_some() {
            entries.push(PickerEntry {
                name: PARENT_ENTRY.to_string(),
                is_dir: true,
            });
        }
        match list_dir(&self.dir, &self.filter) {
            Ok(listed) => {
                entries.extend(listed);
                self.error = None;
            }
            Err(err) => self.error = Some(err.to_string()),
        }
        self.entries = entries;
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
    }
}

/// Visible sub-directories, then visible files matching `filter`.
fn list_dir(dir: &Path, filter: &FileFilter) -> io::Result<Vec<PickerEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let Ok(entry) = entry else {
            continue;
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            dirs.push(PickerEntry { name, is_dir: true });
        } else if filter.matches(&path) {
            files.push(PickerEntry {
                name,
                is_dir: false,
            });
        }
    }
    dirs.sort_by_key(|e| e.name.to_lowercase());
    files.sort_by_key(|e| e.name.to_lowercase());
    dirs.extend(files);
    Ok(dirs)
}
