//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use nfcmsg_app::AppConfig;
use nfcmsg_harness::{SimTagConfig, sim_tag::NTAG213_CAPACITY};
use nfcmsg_proto::LinkCodec;

/// Deep-link profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// `nfcmsg://read?m=<message>`
    Custom,
    /// `https://<web-host>/read?m=<message>`
    Web,
}

/// nfcmsg terminal UI
#[derive(Parser, Debug)]
#[command(name = "nfcmsg")]
#[command(about = "Write messages to NFC tags as deep links and read them back")]
#[command(version)]
pub struct Args {
    /// Deep-link profile
    #[arg(long, value_enum, default_value = "custom")]
    pub profile: Profile,

    /// Host for the web profile
    #[arg(long, default_value = "nfcmsg.app")]
    pub web_host: String,

    /// Start as if launched by opening this URL
    #[arg(long)]
    pub launch_url: Option<String>,

    /// Simulated tag capacity in bytes
    #[arg(long, default_value_t = NTAG213_CAPACITY)]
    pub tag_capacity: usize,

    /// Refuse a tag operation while another is in flight
    #[arg(long)]
    pub exclusive: bool,

    /// Log level (trace, debug, info, warn, error); `RUST_LOG` overrides
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Directory for `nfcmsg.log`
    #[arg(long, default_value = ".")]
    pub log_dir: PathBuf,
}

impl Args {
    /// Link codec for the chosen profile.
    pub fn codec(&self) -> LinkCodec {
        match self.profile {
            Profile::Custom => LinkCodec::custom(),
            Profile::Web => LinkCodec::web(self.web_host.as_str()),
        }
    }

    /// Application settings.
    pub fn app_config(&self) -> AppConfig {
        AppConfig { codec: self.codec(), exclusive_sessions: self.exclusive }
    }

    /// Simulated tag settings.
    pub fn tag_config(&self) -> SimTagConfig {
        SimTagConfig { capacity: self.tag_capacity, ..SimTagConfig::default() }
    }
}
