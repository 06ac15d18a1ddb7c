use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use ratatui::DefaultTerminal;
use ratatui::buffer::Buffer;
use tracing::{debug, info, warn};

use crate::app::{App, Message, Model, ToastLevel, update};

use super::dialogs::TerminalDialogs;

const IDLE_POLL: Duration = Duration::from_millis(250);

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; textedit requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(self.config.clone(), (size.width, size.height));
        if let Some(path) = &self.initial_file {
            if let Err(err) = model.controller.load(&mut model.buffer, path) {
                warn!(error = %err, "Initial file could not be loaded");
                model.show_toast(
                    ToastLevel::Error,
                    format!("Open failed: {}", err.user_message()),
                );
            }
        }
        info!(title = model.title(), "Editor started");

        let result = execute!(stdout(), EnableBracketedPaste, EnableMouseCapture)
            .context("Failed to enable terminal input modes")
            .and_then(|()| Self::event_loop(&mut terminal, &mut model));

        // Restore terminal
        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;
        let mut shown_title = String::new();
        let mut backdrop = Buffer::default();

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            if needs_render {
                let completed = terminal.draw(|frame| Self::view(model, frame))?;
                backdrop = completed.buffer.clone();
                needs_render = false;
            }

            if model.title() != shown_title {
                execute!(stdout(), SetTitle(model.title()))?;
                shown_title = model.title().to_string();
            }

            if model.should_quit {
                break;
            }

            if event::poll(IDLE_POLL)? {
                if let Some(msg) = Self::handle_event(&event::read()?, model) {
                    Self::dispatch(terminal, &backdrop, model, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while !model.should_quit && event::poll(Duration::ZERO)? {
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        Self::dispatch(terminal, &backdrop, model, msg);
                        needs_render = true;
                    }
                }
            }
        }
        Ok(())
    }

    /// Apply one message: pure update first, then its side effects.
    fn dispatch(terminal: &mut DefaultTerminal, backdrop: &Buffer, model: &mut Model, msg: Message) {
        debug!(?msg, "Message");
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        let mut dialogs = TerminalDialogs::new(terminal, backdrop);
        Self::handle_message_side_effects(model, &mut dialogs, &side_msg);
    }
}
