//! nfcmsg TUI entry point.
//!
//! # Usage
//!
//! ```bash
//! # Custom scheme links (nfcmsg://read?m=...)
//! nfcmsg
//!
//! # Web links, started as if opened from a tag
//! nfcmsg --profile web --launch-url "https://nfcmsg.app/read?m=Hello"
//! ```

use std::sync::Arc;

use clap::Parser;
use nfcmsg_core::{LinkHub, NfcSubsystem};
use nfcmsg_harness::SimTag;
use nfcmsg_tui::{Args, Runtime, TerminalDriver, logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Before the terminal is taken over, so a bad log dir is a plain error.
    logging::init(&args.log_dir, &args.log_level)?;

    tracing::info!(profile = ?args.profile, exclusive = args.exclusive, "nfcmsg starting");

    let tag = SimTag::new(args.tag_config());
    let links = Arc::new(match &args.launch_url {
        Some(url) => LinkHub::with_initial_url(url.as_str()),
        None => LinkHub::new(),
    });

    let driver = TerminalDriver::new(tag.clone(), Arc::clone(&links))?;
    let runtime = Runtime::new(driver, NfcSubsystem::new(tag), links, args.app_config());

    runtime.run().await?;

    tracing::info!("nfcmsg stopped");
    Ok(())
}
