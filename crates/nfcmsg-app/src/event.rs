//! Application input events.
//!
//! This module defines [`AppEvent`], the set of notifications that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from three sources:
//! - The frontend (resize, periodic tick).
//! - The deep-link listener (cold start, opened while running).
//! - Completed tag operations, translated by the [`crate::Bridge`].

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// The application was launched via a link.
    LaunchedFromLink {
        /// Decoded message, `None` if the link was not ours.
        message: Option<String>,
    },

    /// A link was opened while the application was running.
    LinkOpened {
        /// Decoded message, `None` if the link was not ours.
        message: Option<String>,
    },

    /// The tag write completed.
    TagWritten,

    /// The tag write failed.
    TagWriteFailed {
        /// Human-readable reason.
        reason: String,
    },

    /// The tag read completed.
    TagRead {
        /// First record as text, `None` if the tag holds no records.
        text: Option<String>,
    },

    /// The tag read failed.
    TagReadFailed {
        /// Human-readable reason.
        reason: String,
    },
}
