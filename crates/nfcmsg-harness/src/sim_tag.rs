//! In-memory NFC platform with a single tag.
//!
//! `SimTag` follows the platform contract documented on
//! [`NfcPlatform`]: one technology session per device, fail-fast `Busy` on a
//! second request, device-wide cancel. Clones share state, so a test can keep
//! a handle to inspect and script the tag while the adapter owns another.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use nfcmsg_core::{LinkHub, NfcError, NfcPlatform, Technology};
use nfcmsg_proto::NdefMessage;
use tokio::sync::watch;
use tracing::trace;

/// Usable NDEF bytes of an NTAG213.
pub const NTAG213_CAPACITY: usize = 137;

/// Physical properties of the simulated tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimTagConfig {
    /// Largest encoded NDEF message the tag accepts.
    pub capacity: usize,
    /// Whether the tag is in the field when the simulation starts.
    pub present: bool,
    /// Whether writes are accepted.
    pub writable: bool,
    /// Technologies a session can be opened for.
    pub technologies: Vec<Technology>,
}

impl Default for SimTagConfig {
    fn default() -> Self {
        Self {
            capacity: NTAG213_CAPACITY,
            present: true,
            writable: true,
            technologies: vec![Technology::Ndef, Technology::NfcA],
        }
    }
}

/// Counters for platform calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimTagStats {
    /// `request_technology` calls, refused ones included.
    pub requests: usize,
    /// `cancel_technology_request` calls.
    pub releases: usize,
    /// Successful writes.
    pub writes: usize,
    /// Successful reads.
    pub reads: usize,
}

#[derive(Debug)]
struct TagState {
    config: SimTagConfig,
    started: bool,
    session_open: bool,
    stored: Option<Bytes>,
    stats: SimTagStats,
    fail_start: Option<NfcError>,
    fail_next_write: Option<NfcError>,
    fail_next_read: Option<NfcError>,
}

/// Simulated NFC platform.
#[derive(Debug, Clone)]
pub struct SimTag {
    state: Arc<Mutex<TagState>>,
    /// `true` while reads and writes are held before touching the tag.
    held: Arc<watch::Sender<bool>>,
}

impl Default for SimTag {
    fn default() -> Self {
        Self::new(SimTagConfig::default())
    }
}

impl SimTag {
    /// Create a blank tag.
    pub fn new(config: SimTagConfig) -> Self {
        let state = TagState {
            config,
            started: false,
            session_open: false,
            stored: None,
            stats: SimTagStats::default(),
            fail_start: None,
            fail_next_write: None,
            fail_next_read: None,
        };
        let (held, _) = watch::channel(false);
        Self { state: Arc::new(Mutex::new(state)), held: Arc::new(held) }
    }

    fn lock(&self) -> MutexGuard<'_, TagState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Call counters so far.
    pub fn stats(&self) -> SimTagStats {
        self.lock().stats
    }

    /// Whether a technology session is currently open.
    pub fn session_open(&self) -> bool {
        self.lock().session_open
    }

    /// Whether the subsystem was started.
    pub fn is_started(&self) -> bool {
        self.lock().started
    }

    /// Whether the tag is in the field.
    pub fn is_present(&self) -> bool {
        self.lock().config.present
    }

    /// Put the tag in or take it out of the field.
    pub fn set_present(&self, present: bool) {
        self.lock().config.present = present;
    }

    /// Flip presence. Returns the new presence.
    pub fn toggle_present(&self) -> bool {
        let mut state = self.lock();
        state.config.present = !state.config.present;
        state.config.present
    }

    /// Enable or disable write protection.
    pub fn set_writable(&self, writable: bool) {
        self.lock().config.writable = writable;
    }

    /// Capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.lock().config.capacity
    }

    /// Raw NDEF bytes on the tag.
    pub fn stored(&self) -> Option<Bytes> {
        self.lock().stored.clone()
    }

    /// Overwrite the tag contents without a session.
    pub fn store(&self, bytes: impl Into<Bytes>) {
        self.lock().stored = Some(bytes.into());
    }

    /// Encode `message` onto the tag without a session.
    ///
    /// # Errors
    ///
    /// Returns the encoding error, leaving the tag untouched.
    pub fn store_message(&self, message: &NdefMessage) -> nfcmsg_proto::Result<()> {
        let bytes = message.encode()?;
        self.store(bytes);
        Ok(())
    }

    /// Erase the tag.
    pub fn clear(&self) {
        self.lock().stored = None;
    }

    /// URI held by the first record, if the tag holds a URI record first.
    pub fn stored_uri(&self) -> Option<String> {
        let bytes = self.stored()?;
        let message = NdefMessage::decode(&bytes).ok()?;
        message.first().filter(|record| record.is_uri()).and_then(|r| r.to_uri().ok())
    }

    /// Make the next `start` fail.
    pub fn fail_start(&self, error: NfcError) {
        self.lock().fail_start = Some(error);
    }

    /// Make the next write fail after the session is open.
    pub fn fail_next_write(&self, error: NfcError) {
        self.lock().fail_next_write = Some(error);
    }

    /// Make the next read fail after the session is open.
    pub fn fail_next_read(&self, error: NfcError) {
        self.lock().fail_next_read = Some(error);
    }

    /// Hold reads and writes until [`resume`](Self::resume).
    ///
    /// Sessions are still acquired, so a second operation started meanwhile
    /// observes the first one's session.
    pub fn hold(&self) {
        self.held.send_replace(true);
    }

    /// Let held operations proceed.
    pub fn resume(&self) {
        self.held.send_replace(false);
    }

    /// Simulate the OS reacting to a tag tap: dispatch the stored URI as an
    /// opened link.
    ///
    /// Returns `false` if the tag is absent or holds no URI record.
    pub fn tap(&self, hub: &LinkHub) -> bool {
        if !self.is_present() {
            return false;
        }
        match self.stored_uri() {
            Some(uri) => {
                hub.dispatch(uri);
                true
            },
            None => false,
        }
    }

    async fn wait_until_released(&self) {
        let mut held = self.held.subscribe();
        // The sender lives as long as self, so this only fails on teardown.
        let _ = held.wait_for(|held| !held).await;
    }

    /// Common checks once a read or write reaches the tag.
    fn check_session(state: &TagState) -> Result<(), NfcError> {
        if !state.session_open {
            return Err(NfcError::SessionCancelled);
        }
        if !state.config.present {
            return Err(NfcError::Io("tag left the field".into()));
        }
        Ok(())
    }
}

impl NfcPlatform for SimTag {
    async fn start(&self) -> Result<(), NfcError> {
        let mut state = self.lock();
        if let Some(error) = state.fail_start.take() {
            return Err(error);
        }
        state.started = true;
        Ok(())
    }

    async fn request_technology(&self, technology: Technology) -> Result<(), NfcError> {
        let mut state = self.lock();
        state.stats.requests += 1;

        if !state.started {
            return Err(NfcError::NotStarted);
        }
        if state.session_open {
            return Err(NfcError::Busy);
        }
        if !state.config.present {
            return Err(NfcError::NoTag);
        }
        if !state.config.technologies.contains(&technology) {
            return Err(NfcError::UnsupportedTechnology(technology));
        }

        state.session_open = true;
        trace!(%technology, "sim session opened");
        Ok(())
    }

    async fn write_ndef_message(&self, message: Bytes) -> Result<(), NfcError> {
        self.wait_until_released().await;

        let mut state = self.lock();
        Self::check_session(&state)?;
        if let Some(error) = state.fail_next_write.take() {
            return Err(error);
        }
        if !state.config.writable {
            return Err(NfcError::NotWritable);
        }
        if message.len() > state.config.capacity {
            return Err(NfcError::CapacityExceeded {
                needed: message.len(),
                capacity: state.config.capacity,
            });
        }

        state.stored = Some(message);
        state.stats.writes += 1;
        Ok(())
    }

    async fn get_ndef_message(&self) -> Result<Option<Bytes>, NfcError> {
        self.wait_until_released().await;

        let mut state = self.lock();
        Self::check_session(&state)?;
        if let Some(error) = state.fail_next_read.take() {
            return Err(error);
        }

        state.stats.reads += 1;
        Ok(state.stored.clone())
    }

    fn cancel_technology_request(&self) -> Result<(), NfcError> {
        let mut state = self.lock();
        state.stats.releases += 1;
        state.session_open = false;
        trace!("sim session released");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nfcmsg_proto::NdefRecord;

    async fn started() -> SimTag {
        let tag = SimTag::default();
        tag.start().await.unwrap();
        tag
    }

    #[tokio::test]
    async fn request_before_start_fails() {
        let tag = SimTag::default();
        assert_eq!(tag.request_technology(Technology::Ndef).await, Err(NfcError::NotStarted));
    }

    #[tokio::test]
    async fn second_request_is_busy() {
        let tag = started().await;
        tag.request_technology(Technology::Ndef).await.unwrap();

        assert_eq!(tag.request_technology(Technology::Ndef).await, Err(NfcError::Busy));
        assert_eq!(tag.stats().requests, 2);
    }

    #[tokio::test]
    async fn cancel_is_device_wide() {
        let tag = started().await;
        tag.request_technology(Technology::Ndef).await.unwrap();
        tag.cancel_technology_request().unwrap();

        assert!(!tag.session_open());
        assert_eq!(tag.write_ndef_message(Bytes::from_static(b"x")).await, Err(NfcError::SessionCancelled));
    }

    #[tokio::test]
    async fn absent_tag() {
        let tag = started().await;
        tag.set_present(false);

        assert_eq!(tag.request_technology(Technology::Ndef).await, Err(NfcError::NoTag));
    }

    #[tokio::test]
    async fn unsupported_technology() {
        let tag = started().await;
        assert_eq!(
            tag.request_technology(Technology::IsoDep).await,
            Err(NfcError::UnsupportedTechnology(Technology::IsoDep))
        );
    }

    #[tokio::test]
    async fn capacity_enforced() {
        let tag = SimTag::new(SimTagConfig { capacity: 4, ..SimTagConfig::default() });
        tag.start().await.unwrap();
        tag.request_technology(Technology::Ndef).await.unwrap();

        let result = tag.write_ndef_message(Bytes::from_static(b"12345")).await;
        assert_eq!(result, Err(NfcError::CapacityExceeded { needed: 5, capacity: 4 }));
        assert_eq!(tag.stored(), None);
    }

    #[tokio::test]
    async fn injected_failure_fires_once() {
        let tag = started().await;
        tag.fail_next_read(NfcError::Io("crc".into()));
        tag.request_technology(Technology::Ndef).await.unwrap();

        assert_eq!(tag.get_ndef_message().await, Err(NfcError::Io("crc".into())));
        assert_eq!(tag.get_ndef_message().await, Ok(None));
    }

    #[test]
    fn tap_dispatches_stored_uri() {
        let tag = SimTag::default();
        let hub = LinkHub::new();
        assert!(!tag.tap(&hub));

        tag.store_message(&NdefMessage::single(NdefRecord::uri("nfcmsg://read?m=x"))).unwrap();
        assert_eq!(tag.stored_uri().as_deref(), Some("nfcmsg://read?m=x"));
        assert!(tag.tap(&hub));

        tag.set_present(false);
        assert!(!tag.tap(&hub));
    }

    #[tokio::test]
    async fn held_write_completes_after_resume() {
        let tag = started().await;
        tag.hold();
        tag.request_technology(Technology::Ndef).await.unwrap();

        let writer = tag.clone();
        let task =
            tokio::spawn(async move { writer.write_ndef_message(Bytes::from_static(b"ab")).await });
        tokio::task::yield_now().await;
        assert_eq!(tag.stored(), None);

        tag.resume();
        assert_eq!(task.await.unwrap(), Ok(()));
        assert_eq!(tag.stored(), Some(Bytes::from_static(b"ab")));
    }
}
