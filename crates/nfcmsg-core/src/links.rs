//! Deep-link notifications.
//!
//! [`LinkSource`] is the OS facility: a one-shot "what URL launched us" query
//! and a subscription to "we were opened with a URL while running".
//! [`LinkHub`] is an in-process implementation that fans dispatched URLs out
//! to every live subscription.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::LinkError;

/// Source of deep-link notifications.
pub trait LinkSource: Send + Sync {
    /// URL the application was launched with, if any.
    fn initial_url(&self) -> impl Future<Output = Result<Option<String>, LinkError>> + Send;

    /// Subscribe to URLs opened while running. Dropping the subscription
    /// unsubscribes.
    fn subscribe(&self) -> LinkSubscription;
}

impl<T: LinkSource> LinkSource for Arc<T> {
    fn initial_url(&self) -> impl Future<Output = Result<Option<String>, LinkError>> + Send {
        T::initial_url(self)
    }

    fn subscribe(&self) -> LinkSubscription {
        T::subscribe(self)
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    senders: HashMap<u64, mpsc::UnboundedSender<String>>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process link dispatcher.
#[derive(Default)]
pub struct LinkHub {
    initial_url: Option<String>,
    registry: Arc<Mutex<Registry>>,
}

impl LinkHub {
    /// Hub for an application that was not launched via a link.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hub for an application launched via `url`.
    pub fn with_initial_url(url: impl Into<String>) -> Self {
        Self { initial_url: Some(url.into()), ..Self::default() }
    }

    /// Deliver `url` to every live subscription. Returns how many received
    /// it.
    pub fn dispatch(&self, url: impl Into<String>) -> usize {
        let url = url.into();
        let mut registry = lock(&self.registry);

        registry.senders.retain(|_, sender| sender.send(url.clone()).is_ok());
        debug!(%url, subscribers = registry.senders.len(), "dispatched deep link");
        registry.senders.len()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.registry).senders.len()
    }
}

impl LinkSource for LinkHub {
    async fn initial_url(&self) -> Result<Option<String>, LinkError> {
        Ok(self.initial_url.clone())
    }

    fn subscribe(&self) -> LinkSubscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut registry = lock(&self.registry);

        let id = registry.next_id;
        registry.next_id += 1;
        registry.senders.insert(id, sender);
        trace!(id, "deep link subscription added");

        LinkSubscription { id, receiver, registry: Arc::downgrade(&self.registry) }
    }
}

/// Live subscription to opened-via-link notifications.
///
/// Unsubscribes on drop, so no URL is delivered to a listener that is gone.
#[derive(Debug)]
pub struct LinkSubscription {
    id: u64,
    receiver: mpsc::UnboundedReceiver<String>,
    registry: Weak<Mutex<Registry>>,
}

impl LinkSubscription {
    /// Next opened URL. `None` once the source is gone.
    pub async fn recv(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    /// Unsubscribe explicitly.
    pub fn unsubscribe(self) {}
}

impl Drop for LinkSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).senders.remove(&self.id);
            trace!(id = self.id, "deep link subscription removed");
        }
    }
}
