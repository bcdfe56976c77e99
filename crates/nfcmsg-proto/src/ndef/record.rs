//! Single NDEF record.

use bytes::{BufMut, Bytes};

use super::{text, uri};
use crate::errors::{ProtocolError, Result};

const FLAG_MB: u8 = 0x80;
const FLAG_ME: u8 = 0x40;
const FLAG_CF: u8 = 0x20;
const FLAG_SR: u8 = 0x10;
const FLAG_IL: u8 = 0x08;
const TNF_MASK: u8 = 0x07;

/// Type Name Format: the namespace of a record's type field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tnf {
    /// Empty record, no type or payload.
    Empty,
    /// NFC Forum well-known type (`U`, `T`, ...).
    WellKnown,
    /// RFC 2046 media type.
    MediaType,
    /// Absolute URI as type.
    AbsoluteUri,
    /// NFC Forum external type.
    External,
    /// Unknown payload type.
    Unknown,
    /// Continuation chunk.
    Unchanged,
    /// Reserved value.
    Reserved,
}

impl Tnf {
    /// Decode from the low three header bits.
    pub fn from_bits(bits: u8) -> Self {
        match bits & TNF_MASK {
            0 => Self::Empty,
            1 => Self::WellKnown,
            2 => Self::MediaType,
            3 => Self::AbsoluteUri,
            4 => Self::External,
            5 => Self::Unknown,
            6 => Self::Unchanged,
            _ => Self::Reserved,
        }
    }

    /// Wire value (0-7).
    pub fn bits(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::WellKnown => 1,
            Self::MediaType => 2,
            Self::AbsoluteUri => 3,
            Self::External => 4,
            Self::Unknown => 5,
            Self::Unchanged => 6,
            Self::Reserved => 7,
        }
    }
}

/// One NDEF record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefRecord {
    /// Type namespace.
    pub tnf: Tnf,
    /// Type field, interpreted according to `tnf`.
    pub record_type: Bytes,
    /// Optional record identifier.
    pub id: Option<Bytes>,
    /// Raw payload.
    pub payload: Bytes,
}

impl NdefRecord {
    /// Well-known type of URI records.
    pub const URI_TYPE: &'static [u8] = b"U";

    /// Well-known type of text records.
    pub const TEXT_TYPE: &'static [u8] = b"T";

    /// Create a record without an ID.
    pub fn new(tnf: Tnf, record_type: impl Into<Bytes>, payload: impl Into<Bytes>) -> Self {
        Self { tnf, record_type: record_type.into(), id: None, payload: payload.into() }
    }

    /// Set the record ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<Bytes>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Well-known URI record carrying `uri`.
    pub fn uri(uri: &str) -> Self {
        Self::new(Tnf::WellKnown, Self::URI_TYPE, uri::encode_payload(uri))
    }

    /// Well-known UTF-8 text record.
    pub fn text(language: &str, content: &str) -> Result<Self> {
        Ok(Self::new(Tnf::WellKnown, Self::TEXT_TYPE, text::encode_payload(language, content)?))
    }

    /// Empty record (TNF 0).
    pub fn empty() -> Self {
        Self::new(Tnf::Empty, Bytes::new(), Bytes::new())
    }

    /// True for well-known `U` records.
    pub fn is_uri(&self) -> bool {
        self.tnf == Tnf::WellKnown && self.record_type.as_ref() == Self::URI_TYPE
    }

    /// True for well-known `T` records.
    pub fn is_text(&self) -> bool {
        self.tnf == Tnf::WellKnown && self.record_type.as_ref() == Self::TEXT_TYPE
    }

    /// Full URI of a URI record.
    pub fn to_uri(&self) -> Result<String> {
        if !self.is_uri() {
            return Err(ProtocolError::NotUriRecord);
        }
        uri::decode_payload(&self.payload)
    }

    /// Payload interpreted with the text record layout, whatever the record
    /// type actually is.
    pub fn payload_as_text(&self) -> Result<String> {
        text::decode_payload(&self.payload)
    }

    /// Bytes this record occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        let payload_len_width = if self.is_short() { 1 } else { 4 };
        let id_len = self.id.as_ref().map_or(0, |id| 1 + id.len());
        2 + payload_len_width + id_len + self.record_type.len() + self.payload.len()
    }

    fn is_short(&self) -> bool {
        self.payload.len() <= usize::from(u8::MAX)
    }

    pub(super) fn encode(&self, dst: &mut impl BufMut, begin: bool, end: bool) -> Result<()> {
        let type_len = u8::try_from(self.record_type.len()).map_err(|_| {
            ProtocolError::FieldTooLong {
                field: "record type",
                size: self.record_type.len(),
                max: usize::from(u8::MAX),
            }
        })?;
        let id_len = self
            .id
            .as_ref()
            .map(|id| {
                u8::try_from(id.len()).map_err(|_| ProtocolError::FieldTooLong {
                    field: "record id",
                    size: id.len(),
                    max: usize::from(u8::MAX),
                })
            })
            .transpose()?;
        let payload_len =
            u32::try_from(self.payload.len()).map_err(|_| ProtocolError::FieldTooLong {
                field: "payload",
                size: self.payload.len(),
                max: u32::MAX as usize,
            })?;

        let mut flags = self.tnf.bits();
        if begin {
            flags |= FLAG_MB;
        }
        if end {
            flags |= FLAG_ME;
        }
        if self.is_short() {
            flags |= FLAG_SR;
        }
        if id_len.is_some() {
            flags |= FLAG_IL;
        }

        dst.put_u8(flags);
        dst.put_u8(type_len);
        if self.is_short() {
            dst.put_u8(payload_len as u8);
        } else {
            dst.put_u32(payload_len);
        }
        if let Some(id_len) = id_len {
            dst.put_u8(id_len);
        }
        dst.put_slice(&self.record_type);
        if let Some(id) = &self.id {
            dst.put_slice(id);
        }
        dst.put_slice(&self.payload);
        Ok(())
    }

    /// Parse one record from the front of `src`.
    pub(super) fn decode(src: &[u8]) -> Result<DecodedRecord> {
        let mut cursor = Cursor { src, pos: 0 };

        let flags = cursor.take_u8()?;
        if flags & FLAG_CF != 0 {
            return Err(ProtocolError::ChunkedRecord);
        }

        let type_len = cursor.take_u8()? as usize;
        let payload_len = if flags & FLAG_SR != 0 {
            cursor.take_u8()? as usize
        } else {
            u32::from_be_bytes(cursor.take_array()?) as usize
        };
        let id_len = if flags & FLAG_IL != 0 { Some(cursor.take_u8()? as usize) } else { None };

        let record_type = Bytes::copy_from_slice(cursor.take(type_len)?);
        let id = id_len.map(|len| cursor.take(len).map(Bytes::copy_from_slice)).transpose()?;
        let payload = Bytes::copy_from_slice(cursor.take(payload_len)?);

        Ok(DecodedRecord {
            record: Self { tnf: Tnf::from_bits(flags), record_type, id, payload },
            message_begin: flags & FLAG_MB != 0,
            message_end: flags & FLAG_ME != 0,
            consumed: cursor.pos,
        })
    }
}

/// A record plus the framing flags it was decoded with.
pub(super) struct DecodedRecord {
    pub record: NdefRecord,
    pub message_begin: bool,
    pub message_end: bool,
    pub consumed: usize,
}

struct Cursor<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.src.len() - self.pos;
        if len > available {
            return Err(ProtocolError::Truncated { needed: len, available });
        }
        let slice = &self.src[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn take_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_uri_record_layout() {
        let record = NdefRecord::uri("nfcmsg://read?m=Hi");
        let mut buf = Vec::new();
        assert!(record.encode(&mut buf, true, true).is_ok());

        insta::assert_snapshot!(hex::encode(&buf), @"d1011355006e66636d73673a2f2f726561643f6d3d4869");
    }

    #[test]
    fn encoded_len_matches_encoding() {
        let record = NdefRecord::new(Tnf::MediaType, &b"text/plain"[..], vec![7u8; 300])
            .with_id(&b"id"[..]);
        let mut buf = Vec::new();
        assert!(record.encode(&mut buf, true, true).is_ok());
        assert_eq!(buf.len(), record.encoded_len());
        assert_eq!(buf[0] & FLAG_SR, 0);
        assert_eq!(buf[0] & FLAG_IL, FLAG_IL);
    }

    #[test]
    fn chunked_record_is_rejected() {
        let src = [FLAG_MB | FLAG_ME | FLAG_CF | FLAG_SR | 1, 1, 0, b'T'];
        assert!(matches!(NdefRecord::decode(&src), Err(ProtocolError::ChunkedRecord)));
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let src = [FLAG_MB | FLAG_ME | FLAG_SR | 1, 1, 5, b'U', 0];
        assert!(matches!(
            NdefRecord::decode(&src),
            Err(ProtocolError::Truncated { needed: 5, available: 1 })
        ));
    }

    #[test]
    fn text_helpers() {
        let record = NdefRecord::text("en", "hello").ok();
        assert_eq!(record.as_ref().map(NdefRecord::is_text), Some(true));
        assert_eq!(record.and_then(|r| r.payload_as_text().ok()), Some("hello".into()));
        assert_eq!(NdefRecord::empty().to_uri(), Err(ProtocolError::NotUriRecord));
    }
}
