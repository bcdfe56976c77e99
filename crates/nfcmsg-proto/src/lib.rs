//! Wire formats for nfcmsg.
//!
//! Two pure codecs with no I/O:
//!
//! - [`LinkCodec`]: smuggles a user message through a deep link
//!   (`scheme://host/path?m=<percent-encoded message>`) and parses it back.
//! - [`ndef`]: the NFC Data Exchange Format records and messages stored on a
//!   tag, including the URI and text record payload conventions.
//!
//! Link decoding never fails loudly: foreign or malformed links decode to
//! `None`. NDEF decoding returns [`ProtocolError`] because a tag that claims
//! to hold NDEF but does not is a real failure for the caller.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
pub mod link;
pub mod ndef;

pub use errors::{ProtocolError, Result};
pub use link::{HostPolicy, LinkCodec};
pub use ndef::{NdefMessage, NdefRecord, Tnf};
