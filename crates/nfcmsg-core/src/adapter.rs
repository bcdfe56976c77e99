//! Tag I/O adapter.
//!
//! Each operation is `acquire -> exactly one read or write -> release`. The
//! adapter does not serialize callers; overlapping operations are refused by
//! the platform and come back as ordinary errors.

use std::sync::Arc;

use nfcmsg_proto::{NdefMessage, NdefRecord};
use tracing::{debug, info, warn};

use crate::{NfcPlatform, TagError, TagSession, Technology};

/// Performs single read/write operations against the presented tag.
pub struct TagAdapter<P: NfcPlatform> {
    platform: Arc<P>,
}

impl<P: NfcPlatform> Clone for TagAdapter<P> {
    fn clone(&self) -> Self {
        Self { platform: Arc::clone(&self.platform) }
    }
}

impl<P: NfcPlatform> TagAdapter<P> {
    /// Create an adapter over a shared platform handle.
    pub fn new(platform: Arc<P>) -> Self {
        Self { platform }
    }

    /// Underlying platform.
    pub fn platform(&self) -> &Arc<P> {
        &self.platform
    }

    /// Write a single-record message holding a URI record for `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Nfc`] for acquisition or write failures (no tag,
    /// busy, read-only, capacity, I/O). The session is released before this
    /// returns, whatever the outcome.
    pub async fn write_uri(&self, uri: &str) -> Result<(), TagError> {
        let session = TagSession::acquire(&*self.platform, Technology::Ndef).await?;

        let message = NdefMessage::single(NdefRecord::uri(uri)).encode()?;
        debug!(bytes = message.len(), "writing NDEF message");
        let result = self.platform.write_ndef_message(message).await;
        session.release();

        match result {
            Ok(()) => {
                info!(%uri, "wrote URI record to tag");
                Ok(())
            },
            Err(e) => {
                warn!(error = %e, "tag write failed");
                Err(e.into())
            },
        }
    }

    /// Read the tag and decode the first record's payload as text.
    ///
    /// The payload is decoded with the text record layout regardless of the
    /// record's type. Returns `Ok(None)` when the tag holds no records.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Nfc`] for acquisition or read failures and
    /// [`TagError::Format`] when the stored bytes are not valid NDEF or the
    /// payload is not valid text. The session is released before this
    /// returns, whatever the outcome.
    pub async fn read_first_record_text(&self) -> Result<Option<String>, TagError> {
        let session = TagSession::acquire(&*self.platform, Technology::Ndef).await?;
        let stored = self.platform.get_ndef_message().await;
        session.release();

        let Some(bytes) = stored.inspect_err(|e| warn!(error = %e, "tag read failed"))? else {
            debug!("tag holds no NDEF message");
            return Ok(None);
        };

        let message = NdefMessage::decode(&bytes)?;
        let Some(record) = message.first() else {
            debug!("tag NDEF message has no records");
            return Ok(None);
        };

        let text = record.payload_as_text()?;
        info!(records = message.len(), "read first record from tag");
        Ok(Some(text))
    }
}
