//! Scoped technology session.

use tracing::{debug, warn};

use crate::{NfcError, NfcPlatform, Technology};

/// Guard over one technology session.
///
/// The guard exists before the technology is requested, so the release runs
/// for every attempt: after a successful operation, after a failed one,
/// after a refused acquisition, and when the owning future is dropped
/// mid-operation.
///
/// # Invariants
///
/// - `cancel_technology_request` is called exactly once per guard, either by
///   [`release`](Self::release) or by `Drop`.
#[must_use = "dropping the session releases it immediately"]
pub struct TagSession<'p, P: NfcPlatform> {
    platform: &'p P,
    technology: Technology,
    released: bool,
}

impl<'p, P: NfcPlatform> TagSession<'p, P> {
    /// Request `technology` and return the guard.
    ///
    /// # Errors
    ///
    /// Returns the platform error if the technology cannot be acquired. The
    /// release has already run by the time the error is returned.
    pub async fn acquire(platform: &'p P, technology: Technology) -> Result<Self, NfcError> {
        let session = Self { platform, technology, released: false };

        debug!(%technology, "requesting NFC technology");
        platform.request_technology(technology).await?;
        debug!(%technology, "NFC technology acquired");

        Ok(session)
    }

    /// Technology this session was requested for.
    pub fn technology(&self) -> Technology {
        self.technology
    }

    /// Release the session now.
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        match self.platform.cancel_technology_request() {
            Ok(()) => debug!(technology = %self.technology, "NFC technology released"),
            Err(e) => warn!(technology = %self.technology, error = %e, "failed to release NFC technology"),
        }
    }
}

impl<P: NfcPlatform> Drop for TagSession<'_, P> {
    fn drop(&mut self) {
        self.release_once();
    }
}
