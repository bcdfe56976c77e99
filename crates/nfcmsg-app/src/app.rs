//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the
//! interactive state of the application completely decoupled from NFC and
//! link plumbing.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Keeps the draft message and its deep-link preview in lockstep.
//! - Tracks the last message read, from a tag or an opened link.
//! - Tracks the write and read busy flags and the dismissible notice.
//! - Stores terminal dimensions to handle resize events.

use nfcmsg_proto::LinkCodec;
use tracing::debug;

use crate::{AppAction, AppConfig, AppEvent, NO_MESSAGE_FOUND, Notice, Screen};

/// Notice shown after a successful write.
const WRITE_SUCCEEDED: &str = "Message written to tag";

/// Notice shown when exclusive mode refuses a second operation.
const SESSION_BUSY: &str = "NFC session busy";

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    codec: LinkCodec,
    exclusive_sessions: bool,
    screen: Screen,
    /// Message being composed.
    draft: String,
    /// `codec.encode(draft)`, recomputed on every draft change.
    deep_link: String,
    /// Last message read. `None` until something was read.
    last_read: Option<String>,
    writing: bool,
    reading: bool,
    notice: Option<Notice>,
    /// Ticks seen while an operation was in flight (drives the spinner).
    busy_ticks: u64,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
}

impl App {
    /// Create a new App with an empty draft.
    pub fn new(config: AppConfig) -> Self {
        let deep_link = config.codec.encode("");
        Self {
            codec: config.codec,
            exclusive_sessions: config.exclusive_sessions,
            screen: Screen::default(),
            draft: String::new(),
            deep_link,
            last_read: None,
            writing: false,
            reading: false,
            notice: None,
            busy_ticks: 0,
            terminal_size: (80, 24),
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => {
                if self.is_busy() {
                    self.busy_ticks = self.busy_ticks.wrapping_add(1);
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::LaunchedFromLink { message } => {
                // A launch link that is not ours leaves the state untouched.
                let Some(message) = message else {
                    debug!("launch link carried no message");
                    return vec![];
                };
                self.last_read = Some(message);
                self.screen = Screen::Read;
                vec![AppAction::Render]
            },
            AppEvent::LinkOpened { message } => {
                self.last_read = Some(message.unwrap_or_else(|| NO_MESSAGE_FOUND.to_owned()));
                self.screen = Screen::Read;
                vec![AppAction::Render]
            },
            AppEvent::TagWritten => {
                self.writing = false;
                self.notice = Some(Notice::Success(WRITE_SUCCEEDED.to_owned()));
                vec![AppAction::Render]
            },
            AppEvent::TagWriteFailed { reason } => {
                self.writing = false;
                self.notice = Some(Notice::Failure(format!("Write failed: {reason}")));
                vec![AppAction::Render]
            },
            AppEvent::TagRead { text } => {
                self.reading = false;
                // An empty tag keeps the previous readout.
                if let Some(text) = text {
                    self.last_read = Some(text);
                }
                vec![AppAction::Render]
            },
            AppEvent::TagReadFailed { reason } => {
                self.reading = false;
                self.notice = Some(Notice::Failure(format!("Read failed: {reason}")));
                vec![AppAction::Render]
            },
        }
    }

    /// Replace the draft and recompute the deep-link preview.
    pub fn set_draft(&mut self, draft: impl Into<String>) -> Vec<AppAction> {
        self.draft = draft.into();
        self.deep_link = self.codec.encode(&self.draft);
        vec![AppAction::Render]
    }

    /// Write the current deep link to a tag.
    pub fn write_tag(&mut self) -> Vec<AppAction> {
        if let Some(refused) = self.refuse_if_exclusive() {
            return refused;
        }
        self.writing = true;
        vec![AppAction::WriteTag { uri: self.deep_link.clone() }, AppAction::Render]
    }

    /// Read the first record of a tag.
    pub fn read_tag(&mut self) -> Vec<AppAction> {
        if let Some(refused) = self.refuse_if_exclusive() {
            return refused;
        }
        self.reading = true;
        vec![AppAction::ReadTag, AppAction::Render]
    }

    /// Trigger the operation belonging to the current screen.
    pub fn trigger(&mut self) -> Vec<AppAction> {
        match self.screen {
            Screen::Write => self.write_tag(),
            Screen::Read => self.read_tag(),
        }
    }

    /// Clear the notice. No-op without one.
    pub fn dismiss_notice(&mut self) -> Vec<AppAction> {
        if self.notice.take().is_some() { vec![AppAction::Render] } else { vec![] }
    }

    /// Show the given screen.
    pub fn set_screen(&mut self, screen: Screen) -> Vec<AppAction> {
        self.screen = screen;
        vec![AppAction::Render]
    }

    /// Show the other screen.
    pub fn switch_screen(&mut self) -> Vec<AppAction> {
        self.set_screen(self.screen.toggled())
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    fn refuse_if_exclusive(&mut self) -> Option<Vec<AppAction>> {
        if self.exclusive_sessions && self.is_busy() {
            self.notice = Some(Notice::Failure(SESSION_BUSY.to_owned()));
            return Some(vec![AppAction::Render]);
        }
        None
    }

    /// Link profile in use.
    pub fn codec(&self) -> &LinkCodec {
        &self.codec
    }

    /// Whether a second operation is refused while one is in flight.
    pub fn exclusive_sessions(&self) -> bool {
        self.exclusive_sessions
    }

    /// Screen currently shown.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Message being composed.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Deep link the draft encodes to.
    pub fn deep_link(&self) -> &str {
        &self.deep_link
    }

    /// Last message read. `None` until something was read.
    pub fn last_read(&self) -> Option<&str> {
        self.last_read.as_deref()
    }

    /// A write is in flight.
    pub fn is_writing(&self) -> bool {
        self.writing
    }

    /// A read is in flight.
    pub fn is_reading(&self) -> bool {
        self.reading
    }

    /// Either operation is in flight.
    pub fn is_busy(&self) -> bool {
        self.writing || self.reading
    }

    /// Current notice. `None` if nothing to show.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Ticks elapsed while busy.
    pub fn busy_ticks(&self) -> u64 {
        self.busy_ticks
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
