//! File logging.
//!
//! The terminal belongs to the UI while the app runs, so log output goes to
//! `<dir>/nfcmsg.log` instead of stderr.

use std::path::Path;

use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file name inside the log directory.
pub const LOG_FILE: &str = "nfcmsg.log";

/// Open the log file in `dir`, creating both if needed. Never rotated.
///
/// # Errors
///
/// Returns an error if the directory or the file cannot be created.
pub fn log_file(dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder().rotation(Rotation::NEVER).filename_prefix(LOG_FILE).build(dir)
}

/// Install the global subscriber writing to [`LOG_FILE`] in `dir`.
///
/// `RUST_LOG` overrides `level`. Must be called at most once per process.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened. Nothing is installed
/// in that case.
pub fn init(dir: &Path, level: &str) -> Result<(), InitError> {
    let writer = log_file(dir)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}
