//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`nfcmsg_app::Runtime`] orchestration code runs in both production and
//! simulation. User input comes from a script of [`SimInput`]s.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use nfcmsg_app::{App, AppAction, AppEvent, Driver, Notice};
use nfcmsg_core::LinkHub;

use crate::{InvariantRegistry, SimTag, Snapshot};

/// Error type for simulation driver.
#[derive(Debug, Clone, thiserror::Error)]
#[error("SimDriverError: {0}")]
pub struct SimDriverError(pub String);

/// One scripted user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimInput {
    /// Replace the draft.
    SetDraft(String),
    /// Press the write button.
    Write,
    /// Press the read button.
    Read,
    /// Dismiss the notice.
    Dismiss,
    /// Switch screens.
    SwitchScreen,
    /// Deliver a periodic tick.
    Tick,
    /// Have the OS open `url` in the application.
    OpenLink(String),
    /// Tap the simulated tag, opening its stored URI.
    TapTag,
    /// Move the simulated tag in or out of the field.
    SetTagPresent(bool),
    /// Let held tag operations proceed.
    ResumeTag,
    /// Wait until no operation is in flight.
    WaitIdle,
    /// Quit.
    Quit,
}

/// Shared state, so a test keeps observing after the runtime consumes the
/// driver.
#[derive(Default)]
struct SharedState {
    script: VecDeque<SimInput>,
    renders: usize,
    last_frame: Option<App>,
    notices: Vec<Notice>,
    stopped: bool,
}

/// Simulation driver for deterministic testing.
///
/// Clones share state.
#[derive(Clone, Default)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    tag: Option<SimTag>,
    links: Option<Arc<LinkHub>>,
    invariants: Option<Arc<InvariantRegistry>>,
}

impl SimDriver {
    /// Create a driver that replays `script`.
    pub fn new(script: impl IntoIterator<Item = SimInput>) -> Self {
        let state = SharedState { script: script.into_iter().collect(), ..SharedState::default() };
        Self { state: Arc::new(Mutex::new(state)), ..Self::default() }
    }

    /// Attach the simulated tag, for tag inputs and session invariants.
    #[must_use]
    pub fn with_tag(mut self, tag: SimTag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Attach the link hub, for link inputs.
    #[must_use]
    pub fn with_links(mut self, links: Arc<LinkHub>) -> Self {
        self.links = Some(links);
        self
    }

    /// Check invariants on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(Arc::new(registry));
        self
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append inputs to the script.
    pub fn push(&self, input: SimInput) {
        self.lock().script.push_back(input);
    }

    /// Inputs not yet replayed.
    pub fn remaining(&self) -> usize {
        self.lock().script.len()
    }

    /// Number of renders so far.
    pub fn renders(&self) -> usize {
        self.lock().renders
    }

    /// App state at the last render.
    pub fn last_frame(&self) -> Option<App> {
        self.lock().last_frame.clone()
    }

    /// Every distinct notice that was rendered, in order.
    pub fn notices(&self) -> Vec<Notice> {
        self.lock().notices.clone()
    }

    /// Whether the runtime stopped the driver.
    pub fn stopped(&self) -> bool {
        self.lock().stopped
    }

    /// Check invariants against App state.
    pub fn check_invariants(&self, app: &App, context: &str) {
        if let Some(ref registry) = self.invariants {
            let snapshot = Snapshot::capture(app, self.tag.as_ref());
            registry.assert_all(&snapshot, context);
        }
    }

    fn tag(&self, input: &SimInput) -> Result<&SimTag, SimDriverError> {
        self.tag.as_ref().ok_or_else(|| SimDriverError(format!("{input:?} needs a tag")))
    }

    fn links(&self, input: &SimInput) -> Result<&LinkHub, SimDriverError> {
        self.links.as_deref().ok_or_else(|| SimDriverError(format!("{input:?} needs a link hub")))
    }

    /// Apply one input. `None` means the input is not ready yet.
    fn apply(&self, input: &SimInput, app: &mut App) -> Result<Option<Vec<AppAction>>, SimDriverError> {
        let actions = match input {
            SimInput::SetDraft(draft) => app.set_draft(draft.clone()),
            SimInput::Write => app.write_tag(),
            SimInput::Read => app.read_tag(),
            SimInput::Dismiss => app.dismiss_notice(),
            SimInput::SwitchScreen => app.switch_screen(),
            SimInput::Tick => app.handle(AppEvent::Tick),
            SimInput::OpenLink(url) => {
                self.links(input)?.dispatch(url.clone());
                vec![]
            },
            SimInput::TapTag => {
                let tag = self.tag(input)?;
                if !tag.tap(self.links(input)?) {
                    return Err(SimDriverError("tapped tag holds no link".into()));
                }
                vec![]
            },
            SimInput::SetTagPresent(present) => {
                self.tag(input)?.set_present(*present);
                vec![]
            },
            SimInput::ResumeTag => {
                self.tag(input)?.resume();
                vec![]
            },
            SimInput::WaitIdle => {
                if app.is_busy() {
                    return Ok(None);
                }
                vec![]
            },
            SimInput::Quit => app.quit(),
        };
        Ok(Some(actions))
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self, app: &mut App) -> Result<Vec<AppAction>, Self::Error> {
        let next = self.lock().script.front().cloned();

        let applied = match next {
            Some(input) => self.apply(&input, app)?,
            None => None,
        };

        match applied {
            Some(actions) => {
                self.lock().script.pop_front();
                Ok(actions)
            },
            None => {
                // Give in-flight operations a chance to run.
                tokio::task::yield_now().await;
                Ok(vec![])
            },
        }
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.check_invariants(app, "render");

        let mut state = self.lock();
        state.renders += 1;
        if let Some(notice) = app.notice()
            && state.notices.last() != Some(notice)
        {
            state.notices.push(notice.clone());
        }
        state.last_frame = Some(app.clone());
        Ok(())
    }

    fn stop(&mut self) {
        self.lock().stopped = true;
    }
}
