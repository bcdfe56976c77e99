//! Fuzz target for NdefMessage::decode
//!
//! Arbitrary bytes stand in for whatever a tag hands back.
//!
//! # Invariants
//!
//! - NEVER panic, all invalid inputs return an error
//! - Huge claimed payload lengths are rejected, not allocated
//! - A decoded message re-encodes to bytes that decode to the same message
//! - Interpreting any record as text or URI never panics

#![no_main]

use libfuzzer_sys::fuzz_target;
use nfcmsg_proto::NdefMessage;

fuzz_target!(|data: &[u8]| {
    let Ok(message) = NdefMessage::decode(data) else {
        return;
    };

    for record in message.records() {
        let _ = record.payload_as_text();
        let _ = record.to_uri();
    }

    let encoded = message.encode().expect("decoded message re-encodes");
    assert_eq!(NdefMessage::decode(&encoded).ok(), Some(message));
});
