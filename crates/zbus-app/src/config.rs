//! Session configuration.

use std::time::Duration;

use zbus_client::{ConnectionConfig, DEFAULT_RETRY_DELAY};

use crate::simulator::{DEFAULT_FAST_REPLY_DELAY, DEFAULT_SLOW_REPLY_DELAY};

/// Longest time the input poll waits before ticking.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Timing and startup options of an interactive session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Bound on each input poll.
    pub poll_interval: Duration,
    /// Delay before reconnecting after a disconnect.
    pub retry_delay: Duration,
    /// Simulator delay for card insert and card read replies.
    pub slow_reply_delay: Duration,
    /// Simulator delay for every other reply.
    pub fast_reply_delay: Duration,
    /// Start with the simulator enabled.
    pub simulator: bool,
}

impl SessionConfig {
    /// Connection manager settings derived from this config.
    pub fn connection(&self) -> ConnectionConfig {
        ConnectionConfig { retry_delay: self.retry_delay }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            retry_delay: DEFAULT_RETRY_DELAY,
            slow_reply_delay: DEFAULT_SLOW_REPLY_DELAY,
            fast_reply_delay: DEFAULT_FAST_REPLY_DELAY,
            simulator: false,
        }
    }
}
