//! Error types for the NDEF wire codec.
//!
//! The link codec has no error type on purpose: a link that does not belong
//! to us is not a failure, it is simply not ours.

use thiserror::Error;

/// Result alias for NDEF codec operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while encoding or decoding NDEF data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Input ended before the record was complete.
    #[error("truncated NDEF record: needed {needed} bytes, {available} available")]
    Truncated {
        /// Bytes required to continue parsing
        needed: usize,
        /// Bytes actually left in the buffer
        available: usize,
    },

    /// The first record does not carry the message-begin flag.
    #[error("first NDEF record is missing the message-begin flag")]
    MissingMessageBegin,

    /// A record after the first carries the message-begin flag.
    #[error("unexpected message-begin flag on record {index}")]
    UnexpectedMessageBegin {
        /// Zero-based index of the offending record
        index: usize,
    },

    /// The buffer ended without a record carrying the message-end flag.
    #[error("NDEF message ended without a message-end flag")]
    MissingMessageEnd,

    /// Chunked records are not supported.
    #[error("chunked NDEF records are not supported")]
    ChunkedRecord,

    /// Non-padding bytes follow the message-end record.
    #[error("{0} trailing bytes after NDEF message end")]
    TrailingBytes(usize),

    /// A header field does not fit its wire width.
    #[error("{field} is {size} bytes, exceeds maximum of {max}")]
    FieldTooLong {
        /// Name of the field
        field: &'static str,
        /// Actual size
        size: usize,
        /// Maximum encodable size
        max: usize,
    },

    /// Record payload is empty where content is required.
    #[error("empty {0} record payload")]
    EmptyPayload(&'static str),

    /// Text payload is not valid in its declared encoding.
    #[error("invalid text payload: {0}")]
    InvalidText(String),

    /// URI payload is not valid UTF-8.
    #[error("invalid URI payload: {0}")]
    InvalidUri(String),

    /// Record is not a well-known URI record.
    #[error("record is not a URI record")]
    NotUriRecord,
}
