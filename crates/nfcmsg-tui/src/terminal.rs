//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Also owns the controls for the
//! simulated tag: F2 taps it, F3 moves it in or out of the field.

use std::{
    io::{self, Stdout, stdout},
    sync::Arc,
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use nfcmsg_app::{App, AppAction, AppEvent, Driver, KeyInput};
use nfcmsg_core::LinkHub;
use nfcmsg_harness::SimTag;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tracing::{debug, info};

use crate::{InputState, TagStatus, ui};

/// Redraw interval for the busy spinner.
const TICK: Duration = Duration::from_millis(100);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm) and rendering (ratatui). Owns the input
/// state for draft editing.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    input_state: InputState,
    tag: SimTag,
    links: Arc<LinkHub>,
}

impl TerminalDriver {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or the alternate screen is unavailable.
    pub fn new(tag: SimTag, links: Arc<LinkHub>) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, input_state: InputState::new(), tag, links })
    }

    /// Convert crossterm `KeyCode` to `KeyInput`.
    fn convert_key(code: KeyCode) -> Option<KeyInput> {
        match code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            KeyCode::F(n) => Some(KeyInput::F(n)),
            _ => None,
        }
    }

    /// Handle keys that act on the simulated tag rather than the App.
    fn handle_tag_key(&self, key: KeyInput) -> Option<Vec<AppAction>> {
        match key {
            KeyInput::F(2) => {
                if !self.tag.tap(&self.links) {
                    debug!("tap ignored, no link on the tag or tag away");
                }
                Some(vec![])
            },
            KeyInput::F(3) => {
                let present = self.tag.toggle_present();
                info!(present, "simulated tag moved");
                Some(vec![AppAction::Render])
            },
            _ => None,
        }
    }

    fn tag_status(&self) -> TagStatus {
        TagStatus { present: self.tag.is_present(), capacity: self.tag.capacity() }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self, app: &mut App) -> Result<Vec<AppAction>, Self::Error> {
        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        let Some(key) = Self::convert_key(key_event.code) else {
                            return Ok(vec![]);
                        };
                        match self.handle_tag_key(key) {
                            Some(actions) => Ok(actions),
                            None => Ok(self.input_state.handle_key(key, app)),
                        }
                    },
                    Some(Ok(Event::Resize(cols, rows))) => {
                        Ok(app.handle(AppEvent::Resize(cols, rows)))
                    },
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(vec![]),
                }
            }

            // Tick timeout
            () = tokio::time::sleep(TICK) => {
                Ok(app.handle(AppEvent::Tick))
            }
        }
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        let tag = self.tag_status();
        self.terminal.draw(|frame| {
            ui::render(frame, app, &self.input_state, tag);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        let _ = self.terminal.show_cursor();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
