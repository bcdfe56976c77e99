//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Bridge`]: tag operations
//! - [`DeepLinkListener`]: opened links
//! - [`Driver`]: Platform-specific I/O

use std::future;

use futures::{StreamExt, stream::FuturesUnordered};
use nfcmsg_core::{LinkSource, NfcPlatform, NfcSubsystem};
use tracing::{debug, info};

use crate::{App, AppAction, AppConfig, AppEvent, Bridge, DeepLinkListener, Driver, PendingOperation};

/// Generic runtime that orchestrates App, Bridge, listener and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `P`: NFC platform the tag operations run against
/// - `L`: Source of opened links
pub struct Runtime<D, P, L>
where
    D: Driver,
    P: NfcPlatform,
    L: LinkSource,
{
    driver: D,
    app: App,
    subsystem: NfcSubsystem<P>,
    bridge: Bridge<P>,
    links: L,
}

impl<D, P, L> Runtime<D, P, L>
where
    D: Driver,
    P: NfcPlatform,
    L: LinkSource,
{
    /// Create a new runtime.
    pub fn new(driver: D, subsystem: NfcSubsystem<P>, links: L, config: AppConfig) -> Self {
        let bridge = Bridge::new(subsystem.adapter());
        Self { driver, app: App::new(config), subsystem, bridge, links }
    }

    /// Run the main event loop.
    ///
    /// Starts the NFC subsystem (failure is logged, not fatal), renders,
    /// starts listening for links, then multiplexes:
    /// 1. Completed tag operations
    /// 2. Opened links
    /// 3. Input events from the driver
    ///
    /// On quit, in-flight operations are dropped (releasing their tag
    /// sessions) and the link subscription is removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(self) -> Result<(), D::Error> {
        let Self { mut driver, mut app, subsystem, bridge, links } = self;

        if !subsystem.initialize().await {
            info!("continuing without NFC, tag operations will fail");
        }
        driver.render(&app)?;

        let (listener, cold_start) = DeepLinkListener::start(&links, app.codec().clone()).await;
        let mut listener = Some(listener);
        let mut pending: FuturesUnordered<PendingOperation> = FuturesUnordered::new();

        let mut quit = false;
        if let Some(event) = cold_start {
            let actions = app.handle(event);
            quit = process_actions(&mut driver, &app, &bridge, &mut pending, actions)?;
        }

        while !quit {
            let actions = tokio::select! {
                biased;

                Some(event) = pending.next(), if !pending.is_empty() => app.handle(event),
                event = next_link(&mut listener) => match event {
                    Some(event) => app.handle(event),
                    None => {
                        debug!("link source closed");
                        listener = None;
                        vec![]
                    },
                },
                actions = driver.poll_event(&mut app) => actions?,
            };

            quit = process_actions(&mut driver, &app, &bridge, &mut pending, actions)?;
        }

        if !pending.is_empty() {
            debug!(in_flight = pending.len(), "dropping tag operations on quit");
        }
        drop(pending);
        if let Some(listener) = listener {
            listener.stop();
        }

        driver.stop();
        Ok(())
    }
}

/// Execute App actions.
///
/// Returns `true` if should quit.
fn process_actions<D: Driver, P: NfcPlatform>(
    driver: &mut D,
    app: &App,
    bridge: &Bridge<P>,
    pending: &mut FuturesUnordered<PendingOperation>,
    actions: Vec<AppAction>,
) -> Result<bool, D::Error> {
    for action in actions {
        match action {
            AppAction::Render => driver.render(app)?,
            AppAction::Quit => return Ok(true),

            // Tag operations go through the bridge
            AppAction::WriteTag { .. } | AppAction::ReadTag => {
                if let Some(operation) = bridge.process_app_action(action) {
                    pending.push(operation);
                }
            },
        }
    }
    Ok(false)
}

/// Next opened link, or never once the listener is gone.
async fn next_link(listener: &mut Option<DeepLinkListener>) -> Option<AppEvent> {
    match listener {
        Some(listener) => listener.next_event().await,
        None => future::pending().await,
    }
}
