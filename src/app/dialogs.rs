//! Modal dialogs drawn on the terminal.
//!
//! Each dialog runs a nested blocking loop on the UI thread: draw the last
//! main frame as a backdrop, draw the dialog, feed it one event, repeat.

use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::buffer::Buffer;
use ratatui::{DefaultTerminal, Frame};
use tracing::{debug, warn};

use crate::config::FileFilter;
use crate::dialog::{
    Choice, DialogStep, Dialogs, FilePicker, MessageBox, MessageLevel, PickerMode, Prompt,
    Question,
};

/// A dialog state machine the modal loop can drive.
trait Modal {
    type Output;

    fn draw(&self, frame: &mut Frame);

    fn on_key(&mut self, key: KeyEvent) -> DialogStep<Self::Output>;

    fn on_paste(&mut self, _text: &str) {}

    /// Answer used when the terminal fails mid-dialog.
    fn aborted() -> Self::Output;
}

impl Modal for Prompt {
    type Output = Option<String>;

    fn draw(&self, frame: &mut Frame) {
        crate::ui::render_prompt(frame, self);
    }

    fn on_key(&mut self, key: KeyEvent) -> DialogStep<Self::Output> {
        self.handle_key(key)
    }

    fn on_paste(&mut self, text: &str) {
        self.insert_str(text);
    }

    fn aborted() -> Self::Output {
        None
    }
}

impl Modal for Question {
    type Output = Choice;

    fn draw(&self, frame: &mut Frame) {
        crate::ui::render_question(frame, self);
    }

    fn on_key(&mut self, key: KeyEvent) -> DialogStep<Self::Output> {
        self.handle_key(key)
    }

    fn aborted() -> Self::Output {
        Choice::Cancel
    }
}

impl Modal for MessageBox {
    type Output = ();

    fn draw(&self, frame: &mut Frame) {
        crate::ui::render_message_box(frame, self);
    }

    fn on_key(&mut self, key: KeyEvent) -> DialogStep<Self::Output> {
        self.handle_key(key)
    }

    fn aborted() -> Self::Output {}
}

impl Modal for FilePicker {
    type Output = Option<PathBuf>;

    fn draw(&self, frame: &mut Frame) {
        crate::ui::render_file_picker(frame, self);
    }

    fn on_key(&mut self, key: KeyEvent) -> DialogStep<Self::Output> {
        self.handle_key(key)
    }

    fn on_paste(&mut self, text: &str) {
        self.insert_str(text);
    }

    fn aborted() -> Self::Output {
        None
    }
}

/// [`Dialogs`] backed by the live terminal.
pub(super) struct TerminalDialogs<'a> {
    terminal: &'a mut DefaultTerminal,
    backdrop: &'a Buffer,
}

impl<'a> TerminalDialogs<'a> {
    pub(super) const fn new(terminal: &'a mut DefaultTerminal, backdrop: &'a Buffer) -> Self {
        Self { terminal, backdrop }
    }

    fn run<M: Modal>(&mut self, modal: &mut M) -> M::Output {
        match self.try_run(modal) {
            Ok(output) => output,
            Err(err) => {
                warn!(error = %err, "Dialog aborted by terminal error");
                M::aborted()
            }
        }
    }

    fn try_run<M: Modal>(&mut self, modal: &mut M) -> io::Result<M::Output> {
        loop {
            let backdrop = self.backdrop;
            self.terminal.draw(|frame| {
                crate::ui::paint_backdrop(frame, backdrop);
                modal.draw(frame);
            })?;
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let DialogStep::Done(output) = modal.on_key(key) {
                        return Ok(output);
                    }
                }
                Event::Paste(text) => modal.on_paste(&text),
                _ => {}
            }
        }
    }
}

impl Dialogs for TerminalDialogs<'_> {
    fn open_file(
        &mut self,
        caption: &str,
        filter: &FileFilter,
        start_dir: Option<&Path>,
    ) -> Option<PathBuf> {
        let start = start_dir.map_or_else(
            || std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            Path::to_path_buf,
        );
        let mut picker = FilePicker::new(PickerMode::Open, caption, filter, &start);
        let chosen = self.run(&mut picker);
        debug!(?chosen, "Open picker closed");
        chosen
    }

    fn save_file(
        &mut self,
        caption: &str,
        filter: &FileFilter,
        suggested: &Path,
    ) -> Option<PathBuf> {
        let mut picker = FilePicker::new(PickerMode::Save, caption, filter, suggested);
        let chosen = self.run(&mut picker);
        debug!(?chosen, "Save picker closed");
        chosen
    }

    fn input_text(&mut self, title: &str, label: &str, initial: &str) -> Option<String> {
        let mut prompt = Prompt::new(title, label, initial);
        self.run(&mut prompt)
    }

    fn question(&mut self, title: &str, message: &str) -> Choice {
        let mut question = Question::new(title, message);
        self.run(&mut question)
    }

    fn warning(&mut self, title: &str, message: &str) {
        let mut message = MessageBox::new(MessageLevel::Warning, title, message);
        self.run(&mut message);
    }

    fn information(&mut self, title: &str, message: &str) {
        let mut message = MessageBox::new(MessageLevel::Information, title, message);
        self.run(&mut message);
    }
}
