//! The external NFC binding.

use std::{fmt, future::Future};

use bytes::Bytes;

use crate::NfcError;

/// Tag-communication technologies a session can be requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Technology {
    /// NDEF data exchange, the only one this application uses.
    Ndef,
    /// ISO 14443-3A.
    NfcA,
    /// ISO 14443-4.
    IsoDep,
    /// MIFARE Ultralight.
    MifareUltralight,
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ndef => "Ndef",
            Self::NfcA => "NfcA",
            Self::IsoDep => "IsoDep",
            Self::MifareUltralight => "MifareUltralight",
        };
        f.write_str(name)
    }
}

/// Abstracts the platform NFC driver.
///
/// # Contract
///
/// - At most one technology session is open per device. A second
///   [`request_technology`](Self::request_technology) while one is open
///   fails fast with [`NfcError::Busy`]; it never waits.
/// - [`cancel_technology_request`](Self::cancel_technology_request) is
///   device-wide and synchronous so it can run from a drop guard. Cancelling
///   with nothing open is not an error.
/// - Reads and writes require an open session.
/// - There is no timeout layer above the platform; whatever the platform
///   enforces is what callers get.
///
/// # Implementations
///
/// - **Simulation**: `nfcmsg_harness::SimTag`, an in-memory tag.
/// - **Mobile**: would wrap the OS NFC manager.
pub trait NfcPlatform: Send + Sync + 'static {
    /// Start the NFC subsystem.
    fn start(&self) -> impl Future<Output = Result<(), NfcError>> + Send;

    /// Request exclusive use of `technology` on the presented tag.
    fn request_technology(
        &self,
        technology: Technology,
    ) -> impl Future<Output = Result<(), NfcError>> + Send;

    /// Write an encoded NDEF message to the tag.
    fn write_ndef_message(&self, message: Bytes) -> impl Future<Output = Result<(), NfcError>> + Send;

    /// Encoded NDEF message stored on the tag, or `None` if it holds none.
    fn get_ndef_message(&self) -> impl Future<Output = Result<Option<Bytes>, NfcError>> + Send;

    /// Release the technology session.
    fn cancel_technology_request(&self) -> Result<(), NfcError>;
}
