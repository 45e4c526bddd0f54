//! Queueing, reconnecting connection manager.
//!
//! Sans-IO wrapper around a [`Transport`]: it owns the outbound queue and the
//! connection state, but never blocks and never sleeps. Reconnects are
//! expressed as [`ConnectionEvent::ReconnectAfter`] so the caller's loop owns
//! the timer and marshals the retry back onto itself.
//!
//! # State Machine
//!
//! ```text
//! ┌──────────────┐  open(url)  ┌────────────┐  Connected  ┌───────────┐
//! │ Disconnected │────────────>│ Connecting │────────────>│ Connected │
//! └──────────────┘             └────────────┘             └───────────┘
//!        ↑                           │                          │
//!        │        Disconnected       │     Disconnected /       │
//!        └───────────────────────────┴──── failed send ─────────┘
//! ```
//!
//! # Invariants
//!
//! - Events leave in the order they were handed to [`ConnectionManager::send`],
//!   whether sent immediately or flushed from the queue after a connect.
//! - Every connect produces exactly one [`ConnectionEvent::QueueDrained`], after
//!   the last queued event was transmitted (immediately, if the queue is empty).
//! - Every transition into Disconnected produces exactly one
//!   [`ConnectionEvent::ReconnectAfter`] for the last requested url.

use std::{collections::VecDeque, time::Duration};

use tracing::{debug, info, warn};
use zbus_proto::Event;

use crate::TransportError;

/// Delay between losing a connection and the next attempt.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Notification raised by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The socket is open.
    Connected,
    /// The socket closed, or the connect attempt failed.
    Disconnected {
        /// Why the connection ended. May be empty.
        error: String,
    },
    /// A text frame arrived.
    Frame(String),
}

/// Text-frame transport to the bus.
///
/// Implementations are non-blocking: `open` starts a connection attempt and
/// returns, and progress is reported later through [`Transport::poll_event`].
pub trait Transport {
    /// Start connecting to `url`, abandoning any previous connection.
    fn open(&mut self, url: &str);

    /// Send one text frame. Returns the number of bytes handed to the socket.
    fn send_frame(&mut self, text: &str) -> Result<usize, TransportError>;

    /// Whether the socket is currently open.
    fn is_connected(&self) -> bool;

    /// Description of the last transport failure, empty if none.
    fn last_error(&self) -> String;

    /// Next pending notification, if any.
    fn poll_event(&mut self) -> Option<TransportEvent>;
}

/// Connection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection, and none in flight.
    Disconnected,
    /// `open` was called; waiting for the transport.
    Connecting,
    /// Frames can be sent.
    Connected,
}

/// Notification produced by [`ConnectionManager::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Connection established.
    Connected,
    /// Connection lost or connect attempt failed.
    Disconnected {
        /// Why the connection ended.
        error: String,
    },
    /// An event arrived from the bus.
    Received(Event),
    /// Every event queued before the last connect has been transmitted.
    QueueDrained,
    /// The caller should call [`ConnectionManager::open`] with `url` after
    /// `delay`.
    ReconnectAfter {
        /// Url to reopen.
        url: String,
        /// How long to wait first.
        delay: Duration,
    },
}

/// Connection manager configuration.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Delay before reconnecting after a disconnect.
    pub retry_delay: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self { retry_delay: DEFAULT_RETRY_DELAY }
    }
}

/// Outbound queue and reconnect policy over a [`Transport`].
#[derive(Debug)]
pub struct ConnectionManager<T> {
    transport: T,
    config: ConnectionConfig,
    state: ConnectionState,
    /// Last url passed to `open`.
    url: Option<String>,
    /// Events waiting for a connection, oldest first.
    queue: VecDeque<Event>,
    /// Notifications raised outside of `poll` (failed sends).
    pending: Vec<ConnectionEvent>,
    last_error: String,
}

impl<T: Transport> ConnectionManager<T> {
    /// Create a disconnected manager.
    pub fn new(transport: T, config: ConnectionConfig) -> Self {
        Self {
            transport,
            config,
            state: ConnectionState::Disconnected,
            url: None,
            queue: VecDeque::new(),
            pending: Vec::new(),
            last_error: String::new(),
        }
    }

    /// Start connecting to `url`.
    ///
    /// No-op while a connection to the same url is in flight or established.
    pub fn open(&mut self, url: &str) {
        let busy = matches!(self.state, ConnectionState::Connecting | ConnectionState::Connected);
        if busy && self.url.as_deref() == Some(url) {
            return;
        }

        info!(url, "opening connection");
        self.url = Some(url.to_owned());
        self.state = ConnectionState::Connecting;
        self.transport.open(url);
    }

    /// Send `event`, or queue it until the next connect.
    ///
    /// Events never overtake the queue: while anything is queued, new events
    /// join it. Returns the frame length when transmitted and 0 when queued.
    pub fn send(&mut self, event: Event) -> usize {
        let ready = self.state == ConnectionState::Connected && self.transport.is_connected();
        if !ready || !self.queue.is_empty() {
            debug!(event = %event.display_name(), queued = self.queue.len() + 1, "queueing event");
            self.queue.push_back(event);
            return 0;
        }

        match self.transport.send_frame(&event.to_json()) {
            Ok(bytes) => {
                debug!(event = %event.display_name(), bytes, "sent event");
                bytes
            },
            Err(error) => {
                warn!(%error, "send failed, queueing event");
                self.queue.push_back(event);
                let mut events = Vec::new();
                self.on_disconnected(error.to_string(), &mut events);
                self.pending.extend(events);
                0
            },
        }
    }

    /// Drain transport notifications and apply them.
    pub fn poll(&mut self) -> Vec<ConnectionEvent> {
        let mut events = std::mem::take(&mut self.pending);

        while let Some(event) = self.transport.poll_event() {
            match event {
                TransportEvent::Connected => self.on_connected(&mut events),
                TransportEvent::Disconnected { error } => self.on_disconnected(error, &mut events),
                TransportEvent::Frame(text) => {
                    events.push(ConnectionEvent::Received(Event::parse(&text)));
                },
            }
        }

        events
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Whether frames are currently being transmitted.
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Last transport failure, empty if none has happened.
    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// Number of events waiting for a connection.
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Last url passed to [`open`](Self::open).
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Reconnect delay in use.
    pub fn retry_delay(&self) -> Duration {
        self.config.retry_delay
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Underlying transport, mutably.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn on_connected(&mut self, events: &mut Vec<ConnectionEvent>) {
        info!(url = self.url.as_deref().unwrap_or_default(), "connected");
        self.state = ConnectionState::Connected;
        events.push(ConnectionEvent::Connected);

        let queued = self.queue.len();
        while let Some(event) = self.queue.pop_front() {
            if let Err(error) = self.transport.send_frame(&event.to_json()) {
                warn!(%error, remaining = self.queue.len() + 1, "flush failed");
                self.queue.push_front(event);
                self.on_disconnected(error.to_string(), events);
                return;
            }
        }

        debug!(flushed = queued, "queue drained");
        events.push(ConnectionEvent::QueueDrained);
    }

    fn on_disconnected(&mut self, error: String, events: &mut Vec<ConnectionEvent>) {
        if self.state == ConnectionState::Disconnected {
            return;
        }

        let error = if error.is_empty() { self.transport.last_error() } else { error };
        warn!(%error, "disconnected");
        self.state = ConnectionState::Disconnected;
        self.last_error.clone_from(&error);
        events.push(ConnectionEvent::Disconnected { error });

        if let Some(url) = &self.url {
            events.push(ConnectionEvent::ReconnectAfter {
                url: url.clone(),
                delay: self.config.retry_delay,
            });
        }
    }
}
