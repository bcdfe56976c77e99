//! Platform seams for nfcmsg.
//!
//! The NFC driver and the OS deep-link dispatcher are external capabilities.
//! This crate defines the traits they are reached through and the small
//! amount of sequencing logic that sits on top of them.
//!
//! # Components
//!
//! - [`NfcPlatform`]: the external NFC binding (start, request technology,
//!   read/write NDEF, cancel).
//! - [`TagSession`]: guard that releases the technology exactly once, even
//!   when the operation fails or its future is dropped.
//! - [`TagAdapter`]: one write or one read per session.
//! - [`NfcSubsystem`]: idempotent, non-fatal process-wide initialization.
//! - [`LinkSource`] / [`LinkHub`]: "launched via URL" and "opened via URL"
//!   notifications, with [`LinkSubscription`] unsubscribing on drop.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod adapter;
mod error;
mod links;
mod platform;
mod session;
mod subsystem;

pub use adapter::TagAdapter;
pub use error::{LinkError, NfcError, TagError};
pub use links::{LinkHub, LinkSource, LinkSubscription};
pub use platform::{NfcPlatform, Technology};
pub use session::TagSession;
pub use subsystem::NfcSubsystem;
