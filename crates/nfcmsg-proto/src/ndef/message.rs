//! NDEF message: an ordered list of records.

use bytes::{Bytes, BytesMut};

use super::record::NdefRecord;
use crate::{
    Tnf,
    errors::{ProtocolError, Result},
};

/// An NDEF message.
///
/// # Invariants
///
/// - An encoded message always contains at least one record. A message with
///   no records encodes as a single empty record (`D0 00 00`), and that
///   encoding decodes back to a message with no records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NdefMessage {
    records: Vec<NdefRecord>,
}

impl NdefMessage {
    /// Message holding `records` in order.
    pub fn new(records: Vec<NdefRecord>) -> Self {
        Self { records }
    }

    /// Message with exactly one record.
    pub fn single(record: NdefRecord) -> Self {
        Self { records: vec![record] }
    }

    /// All records.
    pub fn records(&self) -> &[NdefRecord] {
        &self.records
    }

    /// First record, if any.
    pub fn first(&self) -> Option<&NdefRecord> {
        self.records.first()
    }

    /// True when the message has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Bytes the encoded message occupies.
    pub fn encoded_len(&self) -> usize {
        if self.records.is_empty() {
            return NdefRecord::empty().encoded_len();
        }
        self.records.iter().map(NdefRecord::encoded_len).sum()
    }

    /// Serialize to wire bytes.
    pub fn encode(&self) -> Result<Bytes> {
        let mut dst = BytesMut::with_capacity(self.encoded_len());

        if self.records.is_empty() {
            NdefRecord::empty().encode(&mut dst, true, true)?;
            return Ok(dst.freeze());
        }

        let last = self.records.len() - 1;
        for (index, record) in self.records.iter().enumerate() {
            record.encode(&mut dst, index == 0, index == last)?;
        }
        Ok(dst.freeze())
    }

    /// Parse wire bytes.
    ///
    /// Empty input decodes to an empty message. Zero bytes after the
    /// message-end record are tolerated as tag padding; anything else is
    /// rejected.
    pub fn decode(src: &[u8]) -> Result<Self> {
        if src.is_empty() {
            return Ok(Self::default());
        }

        let mut records = Vec::new();
        let mut offset = 0;

        loop {
            if offset >= src.len() {
                return Err(ProtocolError::MissingMessageEnd);
            }

            let decoded = NdefRecord::decode(&src[offset..])?;
            let index = records.len();
            if index == 0 && !decoded.message_begin {
                return Err(ProtocolError::MissingMessageBegin);
            }
            if index > 0 && decoded.message_begin {
                return Err(ProtocolError::UnexpectedMessageBegin { index });
            }

            offset += decoded.consumed;
            records.push(decoded.record);

            if decoded.message_end {
                break;
            }
        }

        let trailing = &src[offset..];
        if trailing.iter().any(|&b| b != 0) {
            return Err(ProtocolError::TrailingBytes(trailing.len()));
        }

        if matches!(records.as_slice(), [only] if only.tnf == Tnf::Empty) {
            records.clear();
        }

        Ok(Self { records })
    }
}
