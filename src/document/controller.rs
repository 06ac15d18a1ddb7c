use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{CommandOutcome, Document, file};
use crate::config::EditorConfig;
use crate::dialog::{Choice, Dialogs};
use crate::editor::TextBuffer;
use crate::error::DocumentError;

const WARNING_TITLE: &str = "Warning";

/// Owns the open document and the window title derived from it.
///
/// Operations take the text buffer and the dialogs as arguments, so the
/// controller never touches the terminal.
#[derive(Debug, Clone)]
pub struct DocumentController {
    config: EditorConfig,
    document: Document,
    title: String,
}

impl DocumentController {
    /// Start with an empty, untitled document and the application name as title.
    pub fn new(config: EditorConfig) -> Self {
        let title = config.app_name.clone();
        Self {
            config,
            document: Document::default(),
            title,
        }
    }

    pub const fn document(&self) -> &Document {
        &self.document
    }

    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether Rename applies (the document has a file).
    pub const fn can_rename(&self) -> bool {
        self.document.path.is_some()
    }

    /// Start a fresh untitled document. Never prompts.
    pub fn new_document(&mut self, buffer: &mut dyn TextBuffer) {
        buffer.clear();
        self.document = Document::default();
        self.title.clone_from(&self.config.untitled_name);
        info!("Started new document");
    }

    /// Pick a file and load it, replacing the buffer.
    pub fn open(&mut self, buffer: &mut dyn TextBuffer, dialogs: &mut dyn Dialogs) -> CommandOutcome {
        let start_dir = self
            .document
            .path()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty());
        let Some(path) = dialogs.open_file("Open", &self.config.filter, start_dir) else {
            debug!("Open cancelled");
            return CommandOutcome::Cancelled;
        };
        match self.load(buffer, &path) {
            Ok(()) => CommandOutcome::Completed,
            Err(err) => {
                warn!(error = %err, "Open failed");
                dialogs.warning(WARNING_TITLE, &err.user_message());
                CommandOutcome::Failed
            }
        }
    }

    /// Load `path` into the buffer without prompting.
    ///
    /// On error the buffer and document are left untouched.
    pub fn load(&mut self, buffer: &mut dyn TextBuffer, path: &Path) -> Result<(), DocumentError> {
        let text = file::read_text(path)?;
        buffer.set_text(&text);
        self.document = Document::saved(path.to_path_buf());
        self.refresh_title();
        info!(path = %path.display(), bytes = text.len(), "Opened document");
        Ok(())
    }

    /// Close the document, offering to save unsaved changes first.
    pub fn close(&mut self, buffer: &mut dyn TextBuffer, dialogs: &mut dyn Dialogs) -> CommandOutcome {
        if !self.confirm_discard(buffer, dialogs) {
            debug!("Close aborted");
            return CommandOutcome::Cancelled;
        }
        buffer.clear();
        self.document = Document::default();
        self.title.clone_from(&self.config.app_name);
        info!("Closed document");
        CommandOutcome::Completed
    }

    /// Ask whether unsaved changes may be dropped.
    ///
    /// Returns `true` when the document is clean, when the user discards, or
    /// when the user saves and the save completes.
    pub fn confirm_discard(&mut self, buffer: &mut dyn TextBuffer, dialogs: &mut dyn Dialogs) -> bool {
        if !self.document.is_modified() {
            return true;
        }
        let name = self.document.display_name(&self.config.untitled_name);
        let message = format!("Do you want to save changes to {name}?");
        match dialogs.question(&self.config.app_name, &message) {
            Choice::Save => self.save(buffer, dialogs) == CommandOutcome::Completed,
            Choice::Discard => true,
            Choice::Cancel => false,
        }
    }

    /// Write the buffer to the document's file, asking for one if untitled.
    pub fn save(&mut self, buffer: &mut dyn TextBuffer, dialogs: &mut dyn Dialogs) -> CommandOutcome {
        let path = match self.document.path.clone() {
            Some(path) => path,
            None => {
                let suggested = self.config.default_file_name();
                match dialogs.save_file("Save", &self.config.filter, &suggested) {
                    Some(path) => path,
                    None => {
                        debug!("Save cancelled");
                        return CommandOutcome::Cancelled;
                    }
                }
            }
        };
        self.write_to(buffer, dialogs, path)
    }

    /// Always ask for a target file, then write there and adopt the path.
    pub fn save_as(&mut self, buffer: &mut dyn TextBuffer, dialogs: &mut dyn Dialogs) -> CommandOutcome {
        let suggested = self
            .document
            .path
            .clone()
            .unwrap_or_else(|| self.config.default_file_name());
        let Some(path) = dialogs.save_file("Save as...", &self.config.filter, &suggested) else {
            debug!("Save As cancelled");
            return CommandOutcome::Cancelled;
        };
        self.write_to(buffer, dialogs, path)
    }

    /// Rename the document's file on disk.
    pub fn rename(&mut self, dialogs: &mut dyn Dialogs) -> CommandOutcome {
        let Some(current) = self.document.path.clone() else {
            return CommandOutcome::Unavailable;
        };
        let initial = self.document.display_name(&self.config.untitled_name);
        let name = match dialogs.input_text("Rename", "Enter a name:", &initial) {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                debug!("Rename cancelled");
                return CommandOutcome::Cancelled;
            }
        };
        let target = file::rename_target(&current, name.trim(), &self.config.filter);
        if target == current {
            return CommandOutcome::Completed;
        }
        if let Err(err) = file::rename(&current, &target) {
            warn!(error = %err, "Rename failed");
            dialogs.warning(WARNING_TITLE, &err.user_message());
            return CommandOutcome::Failed;
        }
        info!(from = %current.display(), to = %target.display(), "Renamed document");
        self.document.set_path(target);
        self.refresh_title();
        CommandOutcome::Completed
    }

    /// React to the text widget's modified flag changing after a user edit.
    pub fn modification_changed(&mut self, modified: bool) {
        if self.document.is_modified() == modified {
            return;
        }
        self.document.set_modified(modified);
        self.refresh_title();
    }

    fn write_to(
        &mut self,
        buffer: &mut dyn TextBuffer,
        dialogs: &mut dyn Dialogs,
        path: PathBuf,
    ) -> CommandOutcome {
        let text = buffer.text();
        if let Err(err) = file::write_text(&path, &text) {
            warn!(error = %err, "Save failed");
            dialogs.warning(WARNING_TITLE, &err.user_message());
            return CommandOutcome::Failed;
        }
        info!(path = %path.display(), bytes = text.len(), "Saved document");
        buffer.set_modified(false);
        self.document.set_path(path);
        self.document.set_modified(false);
        self.refresh_title();
        CommandOutcome::Completed
    }

    fn refresh_title(&mut self) {
        self.title = self.document.window_title(&self.config.untitled_name);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::dialog::scripted::ScriptedDialogs;
    use crate::editor::EditorBuffer;

    fn controller() -> DocumentController {
        DocumentController::new(EditorConfig::default())
    }

    /// Type into the buffer and forward the notification like the shell does.
    fn type_text(ctl: &mut DocumentController, buffer: &mut EditorBuffer, text: &str) {
        for ch in text.chars() {
            buffer.insert_char(ch);
        }
        if let Some(modified) = buffer.take_modification_change() {
            ctl.modification_changed(modified);
        }
    }

    #[test]
    fn test_startup_title_is_app_name() {
        let ctl = controller();
        assert_eq!(ctl.title(), "TextEdit");
        assert_eq!(ctl.document().path(), None);
        assert!(!ctl.can_rename());
    }

    #[test]
    fn test_new_document_resets_state() {
        let mut ctl = controller();
        let mut buffer = EditorBuffer::from_text("leftover");
        type_text(&mut ctl, &mut buffer, "x");

        ctl.new_document(&mut buffer);
        assert_eq!(buffer.text(), "");
        assert_eq!(ctl.document().path(), None);
        assert!(!ctl.document().is_modified());
        assert_eq!(ctl.title(), "Untitled.txt");
    }

    #[test]
    fn test_typing_marks_title() {
        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        type_text(&mut ctl, &mut buffer, "hello");
        assert_eq!(ctl.title(), "Untitled.txt*");
        assert!(ctl.document().is_modified());
    }

    #[test]
    fn test_repeated_notification_is_ignored() {
        let mut ctl = controller();
        ctl.modification_changed(false);
        assert_eq!(ctl.title(), "TextEdit");
    }

    #[test]
    fn test_open_loads_file_and_sets_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story.txt");
        fs::write(&path, "once upon a time").unwrap();

        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        let mut dialogs = ScriptedDialogs::new().open(&path);

        assert_eq!(ctl.open(&mut buffer, &mut dialogs), CommandOutcome::Completed);
        assert_eq!(buffer.text(), "once upon a time");
        assert_eq!(ctl.document().path(), Some(path.as_path()));
        assert_eq!(ctl.title(), "story.txt");
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_open_starts_in_current_document_directory() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.txt");
        fs::write(&first, "one").unwrap();

        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        let mut dialogs = ScriptedDialogs::new().open(&first);
        assert_eq!(ctl.open(&mut buffer, &mut dialogs), CommandOutcome::Completed);
        assert_eq!(ctl.open(&mut buffer, &mut dialogs), CommandOutcome::Cancelled);

        assert_eq!(dialogs.open_starts, vec![None, Some(dir.path().to_path_buf())]);
    }

    #[test]
    fn test_open_cancelled_changes_nothing() {
        let mut ctl = controller();
        let mut buffer = EditorBuffer::from_text("keep");
        let mut dialogs = ScriptedDialogs::new();

        assert_eq!(ctl.open(&mut buffer, &mut dialogs), CommandOutcome::Cancelled);
        assert_eq!(buffer.text(), "keep");
        assert_eq!(ctl.title(), "TextEdit");
    }

    #[test]
    fn test_open_missing_file_warns_and_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        type_text(&mut ctl, &mut buffer, "draft");
        let mut dialogs = ScriptedDialogs::new().open(dir.path().join("gone.txt"));

        assert_eq!(ctl.open(&mut buffer, &mut dialogs), CommandOutcome::Failed);
        assert_eq!(dialogs.warnings.len(), 1);
        assert_eq!(buffer.text(), "draft");
        assert_eq!(ctl.document().path(), None);
        assert_eq!(ctl.title(), "Untitled.txt*");
    }

    #[test]
    fn test_save_untitled_prompts_with_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.txt");
        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        type_text(&mut ctl, &mut buffer, "hello");
        let mut dialogs = ScriptedDialogs::new().save_to(&path);

        assert_eq!(ctl.save(&mut buffer, &mut dialogs), CommandOutcome::Completed);
        assert_eq!(dialogs.save_suggestions, vec![PathBuf::from("Untitled.txt")]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
        assert_eq!(ctl.title(), "draft.txt");
        assert!(!buffer.is_modified());
        assert!(!ctl.document().is_modified());
    }

    #[test]
    fn test_save_existing_path_does_not_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "v1").unwrap();

        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        ctl.load(&mut buffer, &path).unwrap();
        buffer.move_to_end();
        type_text(&mut ctl, &mut buffer, "+v2");
        assert_eq!(ctl.title(), "notes.txt*");

        let mut dialogs = ScriptedDialogs::new();
        assert_eq!(ctl.save(&mut buffer, &mut dialogs), CommandOutcome::Completed);
        assert!(dialogs.asked_nothing());
        assert_eq!(fs::read_to_string(&path).unwrap(), "v1+v2");
        assert_eq!(ctl.title(), "notes.txt");
    }

    #[test]
    fn test_save_cancelled_keeps_untitled() {
        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        type_text(&mut ctl, &mut buffer, "unsaved");
        let mut dialogs = ScriptedDialogs::new().cancel_save();

        assert_eq!(ctl.save(&mut buffer, &mut dialogs), CommandOutcome::Cancelled);
        assert_eq!(ctl.document().path(), None);
        assert!(ctl.document().is_modified());
    }

    #[test]
    fn test_failed_first_save_does_not_commit_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        type_text(&mut ctl, &mut buffer, "text");
        let mut dialogs = ScriptedDialogs::new().save_to(dir.path().join("missing/dir.txt"));

        assert_eq!(ctl.save(&mut buffer, &mut dialogs), CommandOutcome::Failed);
        assert_eq!(dialogs.warnings.len(), 1);
        assert_eq!(ctl.document().path(), None);
        assert!(buffer.is_modified());
        assert_eq!(ctl.title(), "Untitled.txt*");
    }

    #[test]
    fn test_save_as_suggests_current_path_and_adopts_new_one() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        fs::write(&first, "shared").unwrap();

        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        ctl.load(&mut buffer, &first).unwrap();
        let mut dialogs = ScriptedDialogs::new().save_to(&second);

        assert_eq!(ctl.save_as(&mut buffer, &mut dialogs), CommandOutcome::Completed);
        assert_eq!(dialogs.save_suggestions, vec![first.clone()]);
        assert_eq!(ctl.document().path(), Some(second.as_path()));
        assert_eq!(fs::read_to_string(&second).unwrap(), "shared");
        assert_eq!(ctl.title(), "second.txt");
    }

    #[test]
    fn test_close_clean_never_prompts() {
        let mut ctl = controller();
        let mut buffer = EditorBuffer::from_text("clean");
        let mut dialogs = ScriptedDialogs::new();

        assert_eq!(ctl.close(&mut buffer, &mut dialogs), CommandOutcome::Completed);
        assert!(dialogs.asked_nothing());
        assert_eq!(buffer.text(), "");
        assert_eq!(ctl.title(), "TextEdit");
    }

    #[test]
    fn test_close_modified_cancel_keeps_everything() {
        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        type_text(&mut ctl, &mut buffer, "precious");
        let mut dialogs = ScriptedDialogs::new().answer(Choice::Cancel);

        assert_eq!(ctl.close(&mut buffer, &mut dialogs), CommandOutcome::Cancelled);
        assert_eq!(
            dialogs.questions,
            vec!["Do you want to save changes to Untitled.txt?".to_string()]
        );
        assert_eq!(buffer.text(), "precious");
        assert!(ctl.document().is_modified());
        assert_eq!(ctl.title(), "Untitled.txt*");
    }

    #[test]
    fn test_close_modified_discard_clears() {
        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        type_text(&mut ctl, &mut buffer, "throwaway");
        let mut dialogs = ScriptedDialogs::new().answer(Choice::Discard);

        assert_eq!(ctl.close(&mut buffer, &mut dialogs), CommandOutcome::Completed);
        assert_eq!(buffer.text(), "");
        assert!(!ctl.document().is_modified());
        assert_eq!(ctl.title(), "TextEdit");
    }

    #[test]
    fn test_close_with_save_writes_then_clears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kept.txt");
        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        type_text(&mut ctl, &mut buffer, "keep me");
        let mut dialogs = ScriptedDialogs::new().answer(Choice::Save).save_to(&path);

        assert_eq!(ctl.close(&mut buffer, &mut dialogs), CommandOutcome::Completed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
        assert_eq!(ctl.document().path(), None);
        assert_eq!(ctl.title(), "TextEdit");
    }

    #[test]
    fn test_close_aborts_when_nested_save_cancelled() {
        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        type_text(&mut ctl, &mut buffer, "almost lost");
        let mut dialogs = ScriptedDialogs::new().answer(Choice::Save).cancel_save();

        assert_eq!(ctl.close(&mut buffer, &mut dialogs), CommandOutcome::Cancelled);
        assert_eq!(buffer.text(), "almost lost");
        assert_eq!(ctl.title(), "Untitled.txt*");
    }

    #[test]
    fn test_rename_unavailable_without_path() {
        let mut ctl = controller();
        let mut dialogs = ScriptedDialogs::new().input("whatever");
        assert_eq!(ctl.rename(&mut dialogs), CommandOutcome::Unavailable);
        assert!(dialogs.input_initials.is_empty());
    }

    #[test]
    fn test_rename_appends_extension_next_to_old_file() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.txt");
        fs::write(&old, "content").unwrap();

        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        ctl.load(&mut buffer, &old).unwrap();
        let mut dialogs = ScriptedDialogs::new().input("notes");

        assert_eq!(ctl.rename(&mut dialogs), CommandOutcome::Completed);
        assert_eq!(dialogs.input_initials, vec!["old.txt".to_string()]);
        let renamed = dir.path().join("notes.txt");
        assert_eq!(ctl.document().path(), Some(renamed.as_path()));
        assert!(renamed.exists());
        assert!(!old.exists());
        assert_eq!(ctl.title(), "notes.txt");
    }

    #[test]
    fn test_rename_keeps_modified_marker() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.txt");
        fs::write(&old, "").unwrap();

        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        ctl.load(&mut buffer, &old).unwrap();
        type_text(&mut ctl, &mut buffer, "edit");
        let mut dialogs = ScriptedDialogs::new().input("new.txt");

        assert_eq!(ctl.rename(&mut dialogs), CommandOutcome::Completed);
        assert_eq!(ctl.title(), "new.txt*");
    }

    #[test]
    fn test_rename_blank_input_is_cancel() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.txt");
        fs::write(&old, "").unwrap();

        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        ctl.load(&mut buffer, &old).unwrap();
        let mut dialogs = ScriptedDialogs::new().input("   ");

        assert_eq!(ctl.rename(&mut dialogs), CommandOutcome::Cancelled);
        assert!(old.exists());
    }

    #[test]
    fn test_rename_onto_existing_file_warns_and_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.txt");
        let taken = dir.path().join("taken.txt");
        fs::write(&old, "a").unwrap();
        fs::write(&taken, "b").unwrap();

        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        ctl.load(&mut buffer, &old).unwrap();
        let mut dialogs = ScriptedDialogs::new().input("taken");

        assert_eq!(ctl.rename(&mut dialogs), CommandOutcome::Failed);
        assert_eq!(dialogs.warnings.len(), 1);
        assert_eq!(ctl.document().path(), Some(old.as_path()));
        assert_eq!(ctl.title(), "old.txt");
        assert_eq!(fs::read_to_string(&taken).unwrap(), "b");
    }

    #[test]
    fn test_undo_to_saved_text_clears_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("undo.txt");
        let mut ctl = controller();
        let mut buffer = EditorBuffer::empty();
        type_text(&mut ctl, &mut buffer, "saved");
        let mut dialogs = ScriptedDialogs::new().save_to(&path);
        ctl.save(&mut buffer, &mut dialogs);

        type_text(&mut ctl, &mut buffer, "!");
        assert_eq!(ctl.title(), "undo.txt*");

        buffer.undo();
        if let Some(modified) = buffer.take_modification_change() {
            ctl.modification_changed(modified);
        }
        assert_eq!(ctl.title(), "undo.txt");
    }
}
