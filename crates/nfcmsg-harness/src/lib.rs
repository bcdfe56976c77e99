//! Deterministic simulation harness for nfcmsg testing.
//!
//! In-memory implementations of the NFC platform and the frontend driver for
//! deterministic, reproducible testing of tag sessions and deep links.
//!
//! # Simulated tag
//!
//! [`SimTag`] implements [`nfcmsg_core::NfcPlatform`] over a single in-memory
//! tag. Presence, write protection, capacity and failures are scriptable, and
//! operations can be held open to observe overlapping sessions.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the common
//! App/tag invariants.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod invariants;
pub mod sim_driver;
pub mod sim_tag;

pub use invariants::{
    DeepLinkRoundTrip, ExclusiveSessions, Invariant, InvariantRegistry, InvariantResult,
    SessionsBalanced, Snapshot, Violation,
};
pub use sim_driver::{SimDriver, SimDriverError, SimInput};
pub use sim_tag::{SimTag, SimTagConfig, SimTagStats};
