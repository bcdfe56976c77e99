//! Error types for tag and link operations.
//!
//! `Display` strings are shown to the user verbatim as the failure reason,
//! so they are written as sentences a user can act on.

use nfcmsg_proto::ProtocolError;
use thiserror::Error;

use crate::Technology;

/// Errors reported by the NFC platform.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NfcError {
    /// The NFC subsystem was never started or failed to start.
    #[error("NFC is not started")]
    NotStarted,

    /// NFC hardware is missing or disabled.
    #[error("NFC unavailable: {0}")]
    Unavailable(String),

    /// No tag is in range.
    #[error("no tag presented")]
    NoTag,

    /// Another session holds the technology.
    #[error("NFC session busy")]
    Busy,

    /// The tag does not speak the requested technology.
    #[error("tag does not support {0}")]
    UnsupportedTechnology(Technology),

    /// The tag is locked read-only.
    #[error("tag is not writable")]
    NotWritable,

    /// The encoded message does not fit the tag.
    #[error("message needs {needed} bytes but the tag holds {capacity}")]
    CapacityExceeded {
        /// Encoded message size
        needed: usize,
        /// Usable tag capacity
        capacity: usize,
    },

    /// The session was cancelled while the operation was pending.
    #[error("NFC session cancelled")]
    SessionCancelled,

    /// An operation was attempted without an open session.
    #[error("no NFC session open")]
    NoSession,

    /// Low-level transfer failure (timeout, tag lost, ...).
    #[error("tag I/O error: {0}")]
    Io(String),
}

/// Errors from a single adapter operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// The platform refused or failed the operation.
    #[error(transparent)]
    Nfc(#[from] NfcError),

    /// The tag content could not be encoded or decoded.
    #[error("unreadable tag content: {0}")]
    Format(#[from] ProtocolError),
}

/// Errors from the deep-link source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// The OS could not report the launch URL.
    #[error("launch URL unavailable: {0}")]
    Unavailable(String),
}
