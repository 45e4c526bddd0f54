//! Command line interface.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session
//! zbus-tui --websocket ws://localhost:8080/zbus --log-file zbus.log
//!
//! # Send two events and exit once both are written
//! zbus-tui -w ws://localhost:8080/zbus -s pos.connected -s 'scanner.read:{"code":"123"}'
//! ```

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use zbus_app::SessionConfig;

/// Text-based zBus client
#[derive(Parser, Debug)]
#[command(name = "zbus-tui")]
#[command(about = "Text-based client for the zBus event bus")]
#[command(version)]
pub struct Args {
    /// URL of the zBus websocket (ws:// or wss://)
    #[arg(short, long, value_parser = parse_url)]
    pub websocket: String,

    /// Send an event and exit instead of starting the UI. May be repeated.
    ///
    /// Accepts a JSON object (`{"event":"a.b","data":...}`), an event name, or
    /// `name:data`.
    #[arg(short, long)]
    pub send: Vec<String>,

    /// Start with the pinpad simulator enabled
    #[arg(long)]
    pub simulator: bool,

    /// Delay before reconnecting after a disconnect, in milliseconds
    #[arg(long, default_value = "500")]
    pub retry_delay_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Write logs to this file. The interactive UI logs nowhere without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Whether to send `--send` events and exit.
    pub fn is_batch(&self) -> bool {
        !self.send.is_empty()
    }

    /// Session settings selected by the flags.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            retry_delay: Duration::from_millis(self.retry_delay_ms),
            simulator: self.simulator,
            ..SessionConfig::default()
        }
    }
}

fn parse_url(value: &str) -> Result<String, String> {
    let rest = value
        .strip_prefix("ws://")
        .or_else(|| value.strip_prefix("wss://"))
        .ok_or_else(|| format!("expected a ws:// or wss:// url, got {value:?}"))?;

    if rest.is_empty() || rest.starts_with('/') {
        return Err(format!("missing host in {value:?}"));
    }
    Ok(value.to_owned())
}
