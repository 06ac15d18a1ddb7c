use crate::app::Model;
use crate::editor::Direction;

/// All possible messages (events) in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // File
    /// Start a new untitled document
    NewFile,
    /// Pick a file and open it
    OpenFile,
    /// Close the document, offering to save changes
    CloseFile,
    /// Save to the current file, asking for one if untitled
    SaveFile,
    /// Save under a new name
    SaveFileAs,
    /// Rename the current file on disk
    RenameFile,

    // Edit
    /// Move the selection to the clipboard
    Cut,
    /// Copy the selection to the clipboard
    Copy,
    /// Insert the clipboard at the cursor
    Paste,
    /// Revert the last edit
    Undo,
    /// Reapply the last undone edit
    Redo,
    /// Select the whole buffer
    SelectAll,
    /// Type a character
    InsertChar(char),
    /// Insert a block of text (bracketed paste)
    InsertText(String),
    /// Backspace
    DeleteBack,
    /// Delete
    DeleteForward,
    /// Enter
    SplitLine,

    // Cursor
    /// Move the cursor, dropping the selection
    MoveCursor(Direction),
    /// Move the cursor, extending the selection
    ExtendSelection(Direction),
    MoveHome,
    MoveEnd,
    SelectToHome,
    SelectToEnd,
    MoveWordLeft,
    MoveWordRight,
    /// Jump to the start of the buffer
    MoveToStart,
    /// Jump to the end of the buffer
    MoveToEnd,
    /// Place the cursor at (line, byte column)
    MoveTo(usize, usize),
    PageUp,
    PageDown,
    /// Scroll the view up by n lines without moving the cursor
    ScrollUp(usize),
    /// Scroll the view down by n lines without moving the cursor
    ScrollDown(usize),

    // Help
    /// Show the about box
    About,
    ToggleHelp,
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Force redraw
    Redraw,
    /// Exit the application, offering to save changes
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// Commands that need dialogs, the filesystem or the terminal are left to
/// the side-effect handler; they pass through here unchanged.
pub fn update(mut model: Model, msg: Message) -> Model {
    let mut follow_cursor = true;

    match msg {
        // Edit
        Message::Paste => {
            if let Some(text) = model.clipboard.clone() {
                model.buffer.paste(&text);
            }
        }
        Message::Undo => {
            model.buffer.undo();
        }
        Message::Redo => {
            model.buffer.redo();
        }
        Message::SelectAll => model.buffer.select_all(),
        Message::InsertChar(ch) => model.buffer.insert_char(ch),
        Message::InsertText(text) => model.buffer.insert_str(&text),
        Message::DeleteBack => {
            model.buffer.delete_back();
        }
        Message::DeleteForward => {
            model.buffer.delete_forward();
        }
        Message::SplitLine => model.buffer.split_line(),

        // Cursor
        Message::MoveCursor(dir) => model.buffer.move_cursor(dir),
        Message::ExtendSelection(dir) => model.buffer.extend_selection(dir),
        Message::MoveHome => model.buffer.move_home(),
        Message::MoveEnd => model.buffer.move_end(),
        Message::SelectToHome => model.buffer.select_to_home(),
        Message::SelectToEnd => model.buffer.select_to_end(),
        Message::MoveWordLeft => model.buffer.move_word_left(),
        Message::MoveWordRight => model.buffer.move_word_right(),
        Message::MoveToStart => model.buffer.move_to_start(),
        Message::MoveToEnd => model.buffer.move_to_end(),
        Message::MoveTo(line, col) => model.buffer.move_to(line, col),
        Message::PageUp => {
            let rows = model.text_rows().max(1);
            for _ in 0..rows {
                model.buffer.move_cursor(Direction::Up);
            }
            model.scroll_offset = model.scroll_offset.saturating_sub(rows);
        }
        Message::PageDown => {
            let rows = model.text_rows().max(1);
            for _ in 0..rows {
                model.buffer.move_cursor(Direction::Down);
            }
            let max = model.buffer.line_count().saturating_sub(1);
            model.scroll_offset = (model.scroll_offset + rows).min(max);
        }
        Message::ScrollUp(n) => {
            model.scroll_offset = model.scroll_offset.saturating_sub(n);
            follow_cursor = false;
        }
        Message::ScrollDown(n) => {
            let max = model.buffer.line_count().saturating_sub(1);
            model.scroll_offset = (model.scroll_offset + n).min(max);
            follow_cursor = false;
        }

        // Help
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
            follow_cursor = false;
        }
        Message::HideHelp => {
            model.help_visible = false;
            follow_cursor = false;
        }

        // Window
        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
        }

        // File commands, clipboard export, About and Quit run in effects.
        // Redraw: no state change needed.
        Message::NewFile
        | Message::OpenFile
        | Message::CloseFile
        | Message::SaveFile
        | Message::SaveFileAs
        | Message::RenameFile
        | Message::Cut
        | Message::Copy
        | Message::About
        | Message::Redraw
        | Message::Quit => follow_cursor = false,
    }

    model.sync_modified();
    if follow_cursor {
        model.ensure_cursor_visible();
    }
    model
}
