//! Observable session state types.
//!
//! This module defines the data structures that represent the session's
//! current view of the world, such as [`HistoryEntry`] and
//! [`SessionContext`].
//!
//! These structures serve as the "View Model" for the application: they
//! contain what a frontend needs to render the screen without reaching into
//! the connection manager.

use zbus_proto::Event;

use crate::MenuId;

/// Input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigate the mock menu and switch modes.
    #[default]
    Command,
    /// Edit and submit an event.
    Send,
    /// Move a selection through the history.
    Peruse,
}

impl Mode {
    /// Key bindings shown while in this mode.
    pub fn help(self) -> &'static str {
        match self {
            Self::Command => {
                "Ctrl+C) exit program, s) begin send mode, p) begin peruse mode, m) toggle \
                 pinpad simulator"
            },
            Self::Send => {
                "Ctrl+C) exit program, Esc) begin command mode, Tab) switch field, Enter) send \
                 event"
            },
            Self::Peruse => "Ctrl+C) exit program, Esc) begin command mode",
        }
    }
}

/// Where a history entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Broadcast by the bus.
    Received,
    /// Sent by this session.
    Sent,
}

impl Origin {
    /// Marker drawn before the event.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Received => "-> ",
            Self::Sent => "<- ",
        }
    }
}

/// One event in the session history.
///
/// The display line is rendered once on creation; entries never change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    origin: Origin,
    event: Event,
    line: String,
}

impl HistoryEntry {
    /// Record `event` with its origin.
    pub fn new(origin: Origin, event: Event) -> Self {
        let line = format!("{}{}", origin.prefix(), event.to_json());
        Self { origin, event, line }
    }

    /// Where the event came from.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// The event itself.
    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Origin prefix followed by the one-line wire form.
    pub fn line(&self) -> &str {
        &self.line
    }
}

/// Snapshot of the interactive session, taken once per input cycle.
///
/// The runtime keeps the snapshot from the start of a cycle and hands it to
/// [`App::end_cycle`](crate::App::end_cycle), which compares it against the
/// new one to decide what to re-window and redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    /// Mode the next key is interpreted in.
    pub mode: Mode,
    /// Connection status as of the end of the cycle.
    pub connected: bool,
    /// Menu shown in Command mode.
    pub menu: MenuId,
    /// Selected history index. Only `Some` in Peruse mode.
    pub selection: Option<usize>,
    /// History index drawn at the top edge of the history viewport.
    pub top: usize,
    /// History length as of the end of the cycle.
    pub history_size: usize,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            mode: Mode::Command,
            connected: false,
            menu: MenuId::ROOT,
            selection: None,
            top: 0,
            history_size: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[test]
    fn history_line_carries_origin_prefix() {
        let event = Event::new("pos.connected", Value::Null, "");

        let received = HistoryEntry::new(Origin::Received, event.clone());
        assert_eq!(received.line(), r#"-> {"data":null,"event":"pos.connected"}"#);

        let sent = HistoryEntry::new(Origin::Sent, event);
        assert!(sent.line().starts_with("<- "));
    }
}
