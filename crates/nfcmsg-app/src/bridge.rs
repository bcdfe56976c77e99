//! Tag-operation-to-Application translation layer.
//!
//! The [`Bridge`] wraps the [`nfcmsg_core::TagAdapter`] and adapts it to the
//! application lifecycle.
//!
//! # Responsibilities
//!
//! - Converts [`crate::AppAction::WriteTag`] and [`crate::AppAction::ReadTag`]
//!   into tag operations.
//! - Hands each operation back as a [`PendingOperation`] so the runtime keeps
//!   handling input while the tag is busy.
//! - Interprets the operation result and converts it back into an
//!   [`crate::AppEvent`] to update the UI.

use futures::{FutureExt, future::BoxFuture};
use nfcmsg_core::{NfcPlatform, TagAdapter};
use tracing::{debug, warn};

use crate::{AppAction, AppEvent};

/// An in-flight tag operation resolving to the event that reports it.
pub type PendingOperation = BoxFuture<'static, AppEvent>;

/// Bridge between App and tag operations.
pub struct Bridge<P: NfcPlatform> {
    adapter: TagAdapter<P>,
}

impl<P: NfcPlatform> Bridge<P> {
    /// Create a new Bridge over the given adapter.
    pub fn new(adapter: TagAdapter<P>) -> Self {
        Self { adapter }
    }

    /// Adapter used for tag operations.
    pub fn adapter(&self) -> &TagAdapter<P> {
        &self.adapter
    }

    /// Start the tag operation an action asks for.
    ///
    /// Returns `None` for actions that are not tag operations.
    pub fn process_app_action(&self, action: AppAction) -> Option<PendingOperation> {
        match action {
            AppAction::WriteTag { uri } => Some(write(self.adapter.clone(), uri).boxed()),
            AppAction::ReadTag => Some(read(self.adapter.clone()).boxed()),
            AppAction::Render | AppAction::Quit => None,
        }
    }
}

async fn write<P: NfcPlatform>(adapter: TagAdapter<P>, uri: String) -> AppEvent {
    match adapter.write_uri(&uri).await {
        Ok(()) => {
            debug!(%uri, "tag written");
            AppEvent::TagWritten
        },
        Err(e) => {
            warn!(error = %e, "tag write failed");
            AppEvent::TagWriteFailed { reason: e.to_string() }
        },
    }
}

async fn read<P: NfcPlatform>(adapter: TagAdapter<P>) -> AppEvent {
    match adapter.read_first_record_text().await {
        Ok(text) => {
            debug!(found = text.is_some(), "tag read");
            AppEvent::TagRead { text }
        },
        Err(e) => {
            warn!(error = %e, "tag read failed");
            AppEvent::TagReadFailed { reason: e.to_string() }
        },
    }
}
