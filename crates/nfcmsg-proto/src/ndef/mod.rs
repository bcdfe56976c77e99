//! NFC Data Exchange Format.
//!
//! An NDEF message is a sequence of records. Each record on the wire is:
//!
//! ```text
//! [flags|TNF: 1][type len: 1][payload len: 1 or 4][id len: 0 or 1][type][id][payload]
//! ```
//!
//! Flags are MB (message begin), ME (message end), CF (chunked), SR (short
//! record, 1-byte payload length) and IL (ID length present). Multi-byte
//! lengths are Big Endian.
//!
//! Only the subset this application needs is supported: unchunked records,
//! well-known URI (`U`) and text (`T`) payload helpers.

mod message;
mod record;
pub mod text;
pub mod uri;

pub use message::NdefMessage;
pub use record::{NdefRecord, Tnf};
