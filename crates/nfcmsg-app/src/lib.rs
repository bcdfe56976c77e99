//! Application layer for nfcmsg
//!
//! Pure state machines and a generic runtime, so the same orchestration code
//! runs in the terminal frontend and in deterministic simulation.
//!
//! # Components
//!
//! - [`App`]: UI state machine (draft, deep link, last read message, busy
//!   flags, notices, screens)
//! - [`Bridge`]: turns write/read actions into tag operations whose outcome
//!   comes back as an [`AppEvent`]
//! - [`DeepLinkListener`]: cold-start query plus live link subscription
//! - [`Driver`]: trait for platform-specific input and rendering
//! - [`Runtime`]: generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod config;
mod driver;
mod event;
mod input;
mod listener;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use bridge::{Bridge, PendingOperation};
pub use config::AppConfig;
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use listener::DeepLinkListener;
pub use runtime::Runtime;
pub use state::{NO_MESSAGE_FOUND, Notice, Screen};
