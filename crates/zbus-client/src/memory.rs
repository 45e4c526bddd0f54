//! In-memory transport for tests.
//!
//! [`MemoryTransport`] plugs into a [`ConnectionManager`](crate::ConnectionManager)
//! like a real socket, while the paired [`MemoryRemote`] plays the bus: it
//! accepts or drops connections, delivers frames and inspects what was sent.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Transport, TransportError, TransportEvent};

#[derive(Debug, Default)]
struct Shared {
    opened: Vec<String>,
    sent: Vec<String>,
    events: VecDeque<TransportEvent>,
    connected: bool,
    fail_sends: bool,
    last_error: String,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Transport half of an in-memory connection.
#[derive(Debug)]
pub struct MemoryTransport {
    shared: Arc<Mutex<Shared>>,
}

/// Bus half of an in-memory connection.
#[derive(Debug, Clone)]
pub struct MemoryRemote {
    shared: Arc<Mutex<Shared>>,
}

impl MemoryTransport {
    /// Create a connected pair.
    pub fn pair() -> (Self, MemoryRemote) {
        let shared = Arc::new(Mutex::new(Shared::default()));
        (Self { shared: Arc::clone(&shared) }, MemoryRemote { shared })
    }
}

impl Transport for MemoryTransport {
    fn open(&mut self, url: &str) {
        lock(&self.shared).opened.push(url.to_owned());
    }

    fn send_frame(&mut self, text: &str) -> Result<usize, TransportError> {
        let mut shared = lock(&self.shared);
        if !shared.connected {
            return Err(TransportError::NotConnected);
        }
        if shared.fail_sends {
            return Err(TransportError::Stream("send rejected".into()));
        }
        shared.sent.push(text.to_owned());
        Ok(text.len())
    }

    fn is_connected(&self) -> bool {
        lock(&self.shared).connected
    }

    fn last_error(&self) -> String {
        lock(&self.shared).last_error.clone()
    }

    fn poll_event(&mut self) -> Option<TransportEvent> {
        lock(&self.shared).events.pop_front()
    }
}

impl MemoryRemote {
    /// Accept the pending connection attempt.
    pub fn accept(&self) {
        let mut shared = lock(&self.shared);
        shared.connected = true;
        shared.events.push_back(TransportEvent::Connected);
    }

    /// Close the connection, or refuse a pending attempt, with `error`.
    pub fn drop_connection(&self, error: &str) {
        let mut shared = lock(&self.shared);
        shared.connected = false;
        error.clone_into(&mut shared.last_error);
        shared.events.push_back(TransportEvent::Disconnected { error: error.to_owned() });
    }

    /// Deliver a text frame to the client.
    pub fn deliver(&self, text: &str) {
        lock(&self.shared).events.push_back(TransportEvent::Frame(text.to_owned()));
    }

    /// Make every following send fail while still reporting connected.
    pub fn fail_sends(&self, fail: bool) {
        lock(&self.shared).fail_sends = fail;
    }

    /// Urls passed to `open`, oldest first.
    pub fn opened(&self) -> Vec<String> {
        lock(&self.shared).opened.clone()
    }

    /// Frames sent by the client, oldest first.
    pub fn sent(&self) -> Vec<String> {
        lock(&self.shared).sent.clone()
    }
}
