//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties that must always hold during execution. Unlike
//! example-based tests that check specific scenarios, invariants verify
//! behavioral properties across all possible execution paths.
//!
//! The observable state of the App (and, when attached, the simulated tag) is
//! captured in a [`Snapshot`], then every registered [`Invariant`] runs
//! against it. Violations panic with context when asserted.

use std::fmt;

use nfcmsg_app::App;

use crate::{SimTag, SimTagStats};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Invariant violation with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// Description of what went wrong.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// Observable state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Draft message.
    pub draft: String,
    /// Deep link shown for the draft.
    pub deep_link: String,
    /// The deep link decoded with the App's own codec.
    pub decoded_link: Option<String>,
    /// Write in flight.
    pub writing: bool,
    /// Read in flight.
    pub reading: bool,
    /// Exclusive session mode.
    pub exclusive: bool,
    /// Tag counters, if a tag is attached.
    pub tag: Option<SimTagStats>,
}

impl Snapshot {
    /// Capture App state, plus tag counters when a tag is given.
    pub fn capture(app: &App, tag: Option<&SimTag>) -> Self {
        Self {
            draft: app.draft().to_owned(),
            deep_link: app.deep_link().to_owned(),
            decoded_link: app.codec().decode(app.deep_link()),
            writing: app.is_writing(),
            reading: app.is_reading(),
            exclusive: app.exclusive_sessions(),
            tag: tag.map(SimTag::stats),
        }
    }
}

/// An invariant that can be checked against a [`Snapshot`].
pub trait Invariant: Send + Sync {
    /// Invariant name for error reporting.
    fn name(&self) -> &'static str;

    /// Check the invariant against the current state.
    fn check(&self, state: &Snapshot) -> InvariantResult;
}

/// The preview always decodes back to the draft.
pub struct DeepLinkRoundTrip;

impl Invariant for DeepLinkRoundTrip {
    fn name(&self) -> &'static str {
        "deep_link_round_trip"
    }

    fn check(&self, state: &Snapshot) -> InvariantResult {
        if state.decoded_link.as_deref() == Some(state.draft.as_str()) {
            return Ok(());
        }
        Err(Violation {
            invariant: self.name(),
            message: format!(
                "{:?} decodes to {:?}, draft is {:?}",
                state.deep_link, state.decoded_link, state.draft
            ),
        })
    }
}

/// In exclusive mode a write and a read are never in flight together.
pub struct ExclusiveSessions;

impl Invariant for ExclusiveSessions {
    fn name(&self) -> &'static str {
        "exclusive_sessions"
    }

    fn check(&self, state: &Snapshot) -> InvariantResult {
        if state.exclusive && state.writing && state.reading {
            return Err(Violation {
                invariant: self.name(),
                message: "write and read in flight together".into(),
            });
        }
        Ok(())
    }
}

/// Every session request is released exactly once.
///
/// Releases never outnumber requests, and once nothing is in flight they
/// match exactly.
pub struct SessionsBalanced;

impl Invariant for SessionsBalanced {
    fn name(&self) -> &'static str {
        "sessions_balanced"
    }

    fn check(&self, state: &Snapshot) -> InvariantResult {
        let Some(stats) = state.tag else {
            return Ok(());
        };
        let idle = !state.writing && !state.reading;

        if stats.releases > stats.requests || (idle && stats.releases != stats.requests) {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "{} requests, {} releases (idle: {idle})",
                    stats.requests, stats.releases
                ),
            });
        }
        Ok(())
    }
}

/// Registry of invariants to check.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Registry with every invariant in this module.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(DeepLinkRoundTrip);
        registry.add(ExclusiveSessions);
        registry.add(SessionsBalanced);
        registry
    }

    /// Register an invariant.
    pub fn add(&mut self, invariant: impl Invariant + 'static) {
        self.invariants.push(Box::new(invariant));
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// True if no invariants are registered.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }

    /// Run every invariant, collecting all violations.
    ///
    /// # Errors
    ///
    /// Returns every violation found.
    pub fn check_all(&self, state: &Snapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<Violation> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Run every invariant and panic on the first violation.
    ///
    /// # Panics
    ///
    /// Panics if any invariant is violated.
    #[allow(clippy::panic, reason = "Test harness assertion")]
    pub fn assert_all(&self, state: &Snapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let listed: Vec<String> = violations.iter().map(ToString::to_string).collect();
            panic!("invariant violated ({context}): {}", listed.join("; "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot::capture(&App::default(), None)
    }

    #[test]
    fn fresh_app_holds() {
        let registry = InvariantRegistry::standard();
        assert_eq!(registry.len(), 3);
        assert!(registry.check_all(&snapshot()).is_ok());
    }

    #[test]
    fn stale_link_detected() {
        let mut state = snapshot();
        state.draft = "changed".into();

        let violations = InvariantRegistry::standard().check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].invariant, "deep_link_round_trip");
    }

    #[test]
    fn overlap_only_flagged_when_exclusive() {
        let mut state = snapshot();
        state.writing = true;
        state.reading = true;
        assert!(ExclusiveSessions.check(&state).is_ok());

        state.exclusive = true;
        assert!(ExclusiveSessions.check(&state).is_err());
    }

    #[test]
    fn unreleased_session_when_idle() {
        let mut state = snapshot();
        state.tag = Some(SimTagStats { requests: 2, releases: 1, ..SimTagStats::default() });
        assert!(SessionsBalanced.check(&state).is_err());

        state.writing = true;
        assert!(SessionsBalanced.check(&state).is_ok());
    }

    #[test]
    fn double_release_detected() {
        let mut state = snapshot();
        state.writing = true;
        state.tag = Some(SimTagStats { requests: 1, releases: 2, ..SimTagStats::default() });

        assert!(SessionsBalanced.check(&state).is_err());
    }
}
