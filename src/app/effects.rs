use std::io::{Write, stdout};

use base64::Engine;
use tracing::{debug, warn};

use crate::app::{App, Message, Model, ToastLevel};
use crate::dialog::Dialogs;
use crate::document::CommandOutcome;

const ABOUT_TITLE: &str = "About TextEdit";
const ABOUT_TEXT: &str = "A simple plain-text editor for the terminal.";

impl App {
    /// Run the part of `msg` that needs dialogs, the filesystem or the terminal.
    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        dialogs: &mut dyn Dialogs,
        msg: &Message,
    ) {
        match msg {
            Message::NewFile => {
                model.controller.new_document(&mut model.buffer);
                model.reset_view();
            }
            Message::OpenFile => {
                let outcome = model.controller.open(&mut model.buffer, dialogs);
                if outcome == CommandOutcome::Completed {
                    model.reset_view();
                    let name = display_name(model);
                    model.show_toast(ToastLevel::Info, format!("Opened {name}"));
                }
            }
            Message::CloseFile => {
                if model.controller.close(&mut model.buffer, dialogs) == CommandOutcome::Completed {
                    model.reset_view();
                }
            }
            Message::SaveFile => {
                let outcome = model.controller.save(&mut model.buffer, dialogs);
                report_saved(model, outcome);
            }
            Message::SaveFileAs => {
                let outcome = model.controller.save_as(&mut model.buffer, dialogs);
                report_saved(model, outcome);
            }
            Message::RenameFile => match model.controller.rename(dialogs) {
                CommandOutcome::Completed => {
                    let name = display_name(model);
                    model.show_toast(ToastLevel::Info, format!("Renamed to {name}"));
                }
                CommandOutcome::Unavailable => {
                    model.show_toast(ToastLevel::Warning, "Save the document before renaming it");
                }
                CommandOutcome::Cancelled | CommandOutcome::Failed => {}
            },
            Message::Copy | Message::Cut => {
                let (text, verb) = if matches!(msg, Message::Cut) {
                    (model.buffer.cut_selection(), "Cut")
                } else {
                    (model.buffer.selected_text(), "Copied")
                };
                let Some(text) = text else {
                    model.show_toast(ToastLevel::Info, "Nothing selected");
                    return;
                };
                let chars = text.chars().count();
                if let Err(err) = copy_to_clipboard_osc52(&text) {
                    warn!(error = %err, "Clipboard export failed");
                    model.show_toast(ToastLevel::Warning, format!("Clipboard unavailable: {err}"));
                } else {
                    model.show_toast(ToastLevel::Info, format!("{verb} {chars} chars"));
                }
                model.clipboard = Some(text);
                model.ensure_cursor_visible();
            }
            Message::About => dialogs.information(ABOUT_TITLE, ABOUT_TEXT),
            Message::Quit => {
                if model.controller.confirm_discard(&mut model.buffer, dialogs) {
                    model.should_quit = true;
                } else {
                    debug!("Quit aborted");
                }
            }
            _ => {}
        }
        model.sync_modified();
    }
}

fn report_saved(model: &mut Model, outcome: CommandOutcome) {
    if outcome == CommandOutcome::Completed {
        let name = display_name(model);
        model.show_toast(ToastLevel::Info, format!("Saved {name}"));
    }
}

fn display_name(model: &Model) -> String {
    let untitled = &model.controller.config().untitled_name;
    model.controller.document().display_name(untitled)
}

fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    let osc = osc52_sequence(text);
    let mut out = stdout();
    out.write_all(osc.as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
