//! Text record payloads.
//!
//! Layout: `[status][language code][text]`. Status bit 7 selects UTF-16
//! (otherwise UTF-8), bits 0-5 hold the language code length.

use bytes::{BufMut, Bytes, BytesMut};

use crate::errors::{ProtocolError, Result};

const UTF16_FLAG: u8 = 0x80;
const LANGUAGE_LEN_MASK: u8 = 0x3F;

/// Longest language code the status byte can describe.
pub const MAX_LANGUAGE_LEN: usize = LANGUAGE_LEN_MASK as usize;

/// Build a UTF-8 text record payload.
pub fn encode_payload(language: &str, text: &str) -> Result<Bytes> {
    if language.len() > MAX_LANGUAGE_LEN {
        return Err(ProtocolError::FieldTooLong {
            field: "language code",
            size: language.len(),
            max: MAX_LANGUAGE_LEN,
        });
    }

    let mut payload = BytesMut::with_capacity(1 + language.len() + text.len());
    payload.put_u8(language.len() as u8);
    payload.put_slice(language.as_bytes());
    payload.put_slice(text.as_bytes());
    Ok(payload.freeze())
}

/// Extract the text from a text record payload, dropping the language code.
///
/// The payload is interpreted purely by layout; the caller decides whether
/// the record it came from was actually a text record.
pub fn decode_payload(payload: &[u8]) -> Result<String> {
    let (&status, rest) = payload.split_first().ok_or(ProtocolError::EmptyPayload("text"))?;
    let language_len = (status & LANGUAGE_LEN_MASK) as usize;

    let text = rest.get(language_len..).ok_or(ProtocolError::Truncated {
        needed: 1 + language_len,
        available: payload.len(),
    })?;

    if status & UTF16_FLAG == 0 {
        return String::from_utf8(text.to_vec())
            .map_err(|e| ProtocolError::InvalidText(e.to_string()));
    }

    decode_utf16(text)
}

/// UTF-16 with optional BOM, Big Endian when absent.
fn decode_utf16(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(ProtocolError::InvalidText(format!(
            "odd UTF-16 length {}",
            bytes.len()
        )));
    }

    let (little_endian, body) = match bytes {
        [0xFF, 0xFE, body @ ..] => (true, body),
        [0xFE, 0xFF, body @ ..] => (false, body),
        body => (false, body),
    };

    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            let pair = [pair[0], pair[1]];
            if little_endian { u16::from_le_bytes(pair) } else { u16::from_be_bytes(pair) }
        })
        .collect();

    String::from_utf16(&units).map_err(|e| ProtocolError::InvalidText(e.to_string()))
}
