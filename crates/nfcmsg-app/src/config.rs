//! Application configuration.

use nfcmsg_proto::LinkCodec;

/// Settings fixed for the lifetime of an [`crate::App`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Link profile used to build the preview and decode incoming links.
    pub codec: LinkCodec,

    /// Refuse a write or read while either is in flight.
    ///
    /// When `false`, the two busy flags are independent and a second
    /// operation is left for the platform to refuse.
    pub exclusive_sessions: bool,
}
