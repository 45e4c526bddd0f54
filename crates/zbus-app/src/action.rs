//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.
//! Rendering is not an action: the runtime decides it once per cycle from
//! [`crate::App::end_cycle`].

use std::time::Duration;

use zbus_proto::{Event, MockId};

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Quit the application.
    Quit,

    /// Send an event to the bus (or queue it while disconnected).
    Send(Event),

    /// Deliver [`AppEvent::SimulatorReply`](crate::AppEvent::SimulatorReply)
    /// after a delay.
    Schedule {
        /// Reply to send when the delay elapses.
        mock: MockId,
        /// How long to wait.
        delay: Duration,
    },
}
