//! URI record payloads.
//!
//! The first payload byte abbreviates a well-known URI prefix; the rest is the
//! remainder of the URI in UTF-8. Codes past the end of the table are reserved
//! and decode as "no prefix".

use bytes::{BufMut, Bytes, BytesMut};

use crate::errors::{ProtocolError, Result};

/// Abbreviation table, indexed by prefix code.
pub const PREFIXES: [&str; 36] = [
    "",
    "http://www.",
    "https://www.",
    "http://",
    "https://",
    "tel:",
    "mailto:",
    "ftp://anonymous:anonymous@",
    "ftp://ftp.",
    "ftps://",
    "sftp://",
    "smb://",
    "nfs://",
    "ftp://",
    "dav://",
    "news:",
    "telnet://",
    "imap:",
    "rtsp://",
    "urn:",
    "pop:",
    "sip:",
    "sips:",
    "tftp:",
    "btspp://",
    "btl2cap://",
    "btgoep://",
    "tcpobex://",
    "irdaobex://",
    "file://",
    "urn:epc:id:",
    "urn:epc:tag:",
    "urn:epc:pat:",
    "urn:epc:raw:",
    "urn:epc:",
    "urn:nfc:",
];

/// Prefix code for `uri`: the longest matching abbreviation, or 0.
pub fn prefix_code(uri: &str) -> u8 {
    PREFIXES
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, prefix)| uri.starts_with(*prefix))
        .max_by_key(|(_, prefix)| prefix.len())
        .map_or(0, |(code, _)| code as u8)
}

/// Build a URI record payload.
pub fn encode_payload(uri: &str) -> Bytes {
    let code = prefix_code(uri);
    let remainder = &uri[PREFIXES[code as usize].len()..];

    let mut payload = BytesMut::with_capacity(1 + remainder.len());
    payload.put_u8(code);
    payload.put_slice(remainder.as_bytes());
    payload.freeze()
}

/// Expand a URI record payload back into the full URI.
pub fn decode_payload(payload: &[u8]) -> Result<String> {
    let (&code, remainder) = payload.split_first().ok_or(ProtocolError::EmptyPayload("URI"))?;
    let remainder =
        std::str::from_utf8(remainder).map_err(|e| ProtocolError::InvalidUri(e.to_string()))?;
    let prefix = PREFIXES.get(code as usize).copied().unwrap_or_default();

    Ok(format!("{prefix}{remainder}"))
}
