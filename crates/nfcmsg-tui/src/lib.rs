//! Terminal UI for nfcmsg
//!
//! A thin shell over [`nfcmsg_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`nfcmsg_app::Runtime`].
//!
//! There is no NFC hardware behind the terminal: the tag is a
//! [`nfcmsg_harness::SimTag`] the user moves in and out of the field with
//! function keys, and tapping it opens its stored link through an in-process
//! [`nfcmsg_core::LinkHub`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod input;
pub mod logging;
pub mod terminal;
pub mod ui;

pub use cli::{Args, Profile};
pub use input::InputState;
pub use nfcmsg_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
pub use ui::TagStatus;
