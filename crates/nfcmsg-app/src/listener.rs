//! Deep-link listener.
//!
//! Turns URLs from a [`LinkSource`] into [`AppEvent`]s. The launch URL, if
//! any, becomes [`AppEvent::LaunchedFromLink`]; URLs opened later become
//! [`AppEvent::LinkOpened`].

use nfcmsg_core::{LinkSource, LinkSubscription};
use nfcmsg_proto::LinkCodec;
use tracing::{debug, warn};

use crate::AppEvent;

/// Live subscription to opened links. Dropping it unsubscribes.
#[derive(Debug)]
pub struct DeepLinkListener {
    codec: LinkCodec,
    subscription: LinkSubscription,
}

impl DeepLinkListener {
    /// Subscribe to live links and query the launch URL.
    ///
    /// The subscription is registered before the query so a link opened in
    /// between is delivered as a live event. Returns the cold-start event
    /// when the application was launched via a link. A failing launch query
    /// is logged and treated as no launch URL.
    pub async fn start<L: LinkSource>(source: &L, codec: LinkCodec) -> (Self, Option<AppEvent>) {
        let subscription = source.subscribe();

        let launch_url = match source.initial_url().await {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "launch url unavailable");
                None
            },
        };

        let cold_start = launch_url.map(|url| {
            let message = codec.decode(&url);
            debug!(%url, decoded = message.is_some(), "launched from link");
            AppEvent::LaunchedFromLink { message }
        });

        (Self { codec, subscription }, cold_start)
    }

    /// Wait for the next opened link.
    ///
    /// Returns `None` once the link source is gone.
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        let url = self.subscription.recv().await?;
        let message = self.codec.decode(&url);
        debug!(%url, decoded = message.is_some(), "link opened");
        Some(AppEvent::LinkOpened { message })
    }

    /// Stop listening.
    pub fn stop(self) {
        self.subscription.unsubscribe();
    }
}
