//! Process-wide NFC subsystem state.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::{NfcPlatform, TagAdapter};

/// Owns the platform handle and its one-time start.
///
/// Construct once at application startup and call
/// [`initialize`](Self::initialize). Repeated calls do nothing and report the
/// first outcome. A failed start is logged, not fatal: later tag operations
/// fail through the normal error path instead.
pub struct NfcSubsystem<P: NfcPlatform> {
    platform: Arc<P>,
    started: OnceCell<bool>,
}

impl<P: NfcPlatform> NfcSubsystem<P> {
    /// Wrap a platform.
    pub fn new(platform: P) -> Self {
        Self::from_shared(Arc::new(platform))
    }

    /// Wrap an already shared platform.
    pub fn from_shared(platform: Arc<P>) -> Self {
        Self { platform, started: OnceCell::new() }
    }

    /// Start the platform once. Returns whether the start succeeded.
    pub async fn initialize(&self) -> bool {
        *self
            .started
            .get_or_init(|| async {
                match self.platform.start().await {
                    Ok(()) => {
                        info!("NFC subsystem started");
                        true
                    },
                    Err(e) => {
                        warn!(error = %e, "NFC subsystem failed to start");
                        false
                    },
                }
            })
            .await
    }

    /// Outcome of the start. `None` until [`initialize`](Self::initialize)
    /// has completed.
    pub fn is_started(&self) -> Option<bool> {
        self.started.get().copied()
    }

    /// Adapter sharing this subsystem's platform.
    pub fn adapter(&self) -> TagAdapter<P> {
        TagAdapter::new(Arc::clone(&self.platform))
    }

    /// Shared platform handle.
    pub fn platform(&self) -> &Arc<P> {
        &self.platform
    }
}
