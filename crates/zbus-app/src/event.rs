//! Application input events.
//!
//! This module defines [`AppEvent`], the complete set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from three distinct sources:
//! - User interactions (keyboard, interrupt, resize) and polling ticks.
//! - Connection notifications translated from the connection manager.
//! - Deferred simulator replies whose delay has elapsed.

use zbus_proto::{Event, MockId};

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Input poll timed out without a key.
    Tick,

    /// Operator asked to exit (Ctrl+C).
    Interrupt,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Connected to the bus.
    Connected,

    /// Disconnected from the bus, or a connect attempt failed.
    Disconnected {
        /// Transport error description.
        error: String,
    },

    /// Event broadcast by the bus.
    Received(Event),

    /// A scheduled simulator reply is due.
    SimulatorReply(MockId),
}
