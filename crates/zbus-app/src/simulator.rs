//! Pinpad simulator.
//!
//! Watches received events and schedules canned replies, standing in for a
//! pinpad that always accepts. The request and authorization ids of the most
//! recent event that carried them are remembered (sticky) and stamped on every
//! mock built from the menu or sent as a reply.

use std::time::Duration;

use tracing::debug;
use zbus_proto::{Event, MockId};

/// Delay before replies that the POS needs time to prepare for.
pub const DEFAULT_SLOW_REPLY_DELAY: Duration = Duration::from_millis(5000);

/// Delay before every other reply.
pub const DEFAULT_FAST_REPLY_DELAY: Duration = Duration::from_millis(100);

/// Replies for a received event name, in scheduling order.
pub fn responses(name: &str) -> &'static [MockId] {
    match name {
        "pos.connected" => &[MockId::PinpadDisplayItemSuccess],
        "pinpad.preparePaymentRequest" => &[MockId::PinpadCardInserted, MockId::PinpadCardInfo],
        "pinpad.authorizePaymentRequest" => {
            &[MockId::PinpadPaymentAccepted, MockId::PinpadCardRemoved]
        },
        "pinpad.finishPaymentRequest" => &[MockId::PinpadFinishPaymentRequest],
        _ => &[],
    }
}

/// Simulator state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulator {
    enabled: bool,
    last_request_id: String,
    last_auth_attempt_id: String,
    slow_delay: Duration,
    fast_delay: Duration,
}

impl Simulator {
    /// Create a simulator with the given reply delays.
    pub fn new(enabled: bool, slow_delay: Duration, fast_delay: Duration) -> Self {
        Self {
            enabled,
            last_request_id: String::new(),
            last_auth_attempt_id: String::new(),
            slow_delay,
            fast_delay,
        }
    }

    /// Whether replies are being scheduled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip [`is_enabled`](Self::is_enabled).
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Most recent non-empty request id received.
    pub fn last_request_id(&self) -> &str {
        &self.last_request_id
    }

    /// Most recent non-empty authorization attempt id received.
    pub fn last_auth_attempt_id(&self) -> &str {
        &self.last_auth_attempt_id
    }

    /// Record a received event and return the replies to schedule.
    ///
    /// Ids are captured whether or not the simulator is enabled.
    pub fn observe(&mut self, event: &Event) -> Vec<(MockId, Duration)> {
        if !event.request_id.is_empty() {
            self.last_request_id.clone_from(&event.request_id);
        }
        if !event.auth_attempt_id.is_empty() {
            self.last_auth_attempt_id.clone_from(&event.auth_attempt_id);
        }

        if !self.enabled {
            return Vec::new();
        }

        let replies: Vec<_> =
            responses(&event.display_name()).iter().map(|&mock| (mock, self.delay(mock))).collect();
        if !replies.is_empty() {
            debug!(event = %event.display_name(), replies = replies.len(), "scheduling replies");
        }
        replies
    }

    /// Build `mock` with the ids known right now.
    pub fn build(&self, mock: MockId) -> Event {
        Event::from_mock(mock, &self.last_request_id, &self.last_auth_attempt_id)
    }

    fn delay(&self, mock: MockId) -> Duration {
        match mock {
            MockId::PinpadCardInserted | MockId::PinpadCardInfo => self.slow_delay,
            _ => self.fast_delay,
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(false, DEFAULT_SLOW_REPLY_DELAY, DEFAULT_FAST_REPLY_DELAY)
    }
}
