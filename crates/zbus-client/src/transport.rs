//! WebSocket transport for the client.
//!
//! Provides [`WebSocketTransport`], which runs each connection attempt as a
//! background task and bridges it to the synchronous [`Transport`] interface
//! through channels. This is a thin layer that only moves text frames -
//! queueing and reconnect logic remain in the Sans-IO
//! [`ConnectionManager`](crate::ConnectionManager).
//!
//! Requires a Tokio runtime: [`Transport::open`] spawns onto the current one.

use futures::{SinkExt, StreamExt};
use tokio::{sync::mpsc, task::AbortHandle};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, trace};

use crate::{Transport, TransportError, TransportEvent};

/// Events tagged with the connection attempt that produced them.
type Tagged = (u64, TransportEvent);

/// WebSocket connection to the bus.
#[derive(Debug)]
pub struct WebSocketTransport {
    /// Incremented per `open`; events from older attempts are dropped.
    generation: u64,
    events_tx: mpsc::UnboundedSender<Tagged>,
    events_rx: mpsc::UnboundedReceiver<Tagged>,
    outbound: Option<mpsc::UnboundedSender<String>>,
    connected: bool,
    last_error: String,
    task: Option<AbortHandle>,
}

impl WebSocketTransport {
    /// Create a transport with no connection.
    pub fn new() -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            generation: 0,
            events_tx,
            events_rx,
            outbound: None,
            connected: false,
            last_error: String::new(),
            task: None,
        }
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.outbound = None;
        self.connected = false;
    }
}

impl Default for WebSocketTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Transport for WebSocketTransport {
    fn open(&mut self, url: &str) {
        self.stop();
        self.generation += 1;

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_connection(
            url.to_owned(),
            self.generation,
            outbound_rx,
            self.events_tx.clone(),
        ));

        self.outbound = Some(outbound_tx);
        self.task = Some(handle.abort_handle());
    }

    fn send_frame(&mut self, text: &str) -> Result<usize, TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        let outbound = self.outbound.as_ref().ok_or(TransportError::NotConnected)?;
        outbound.send(text.to_owned()).map_err(|_| TransportError::ChannelClosed)?;
        Ok(text.len())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn last_error(&self) -> String {
        self.last_error.clone()
    }

    fn poll_event(&mut self) -> Option<TransportEvent> {
        while let Ok((generation, event)) = self.events_rx.try_recv() {
            if generation != self.generation {
                trace!(generation, "dropping event from stale connection");
                continue;
            }

            match &event {
                TransportEvent::Connected => self.connected = true,
                TransportEvent::Disconnected { error } => {
                    self.connected = false;
                    self.last_error.clone_from(error);
                },
                TransportEvent::Frame(_) => {},
            }
            return Some(event);
        }
        None
    }
}

/// Run one connection attempt, bridging between channels and the socket.
///
/// Always ends by reporting `Disconnected`, unless aborted.
async fn run_connection(
    url: String,
    generation: u64,
    mut outbound: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<Tagged>,
) {
    let report = |event| {
        // Receiver gone means the transport was dropped
        let _ = events.send((generation, event));
    };

    let socket = match connect_async(url.as_str()).await {
        Ok((socket, _response)) => socket,
        Err(e) => {
            report(TransportEvent::Disconnected { error: e.to_string() });
            return;
        },
    };

    debug!(url, "websocket open");
    report(TransportEvent::Connected);

    let (mut sink, mut stream) = socket.split();
    let error = loop {
        tokio::select! {
            frame = outbound.recv() => {
                let Some(text) = frame else { break String::new() };
                if let Err(e) = sink.send(Message::Text(text.into())).await {
                    break e.to_string();
                }
            }
            message = stream.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    report(TransportEvent::Frame(text.as_str().to_owned()));
                },
                Some(Ok(Message::Close(_))) | None => break "connection closed by server".to_owned(),
                Some(Ok(_)) => {},
                Some(Err(e)) => break e.to_string(),
            },
        }
    };

    debug!(url, %error, "websocket closed");
    let _ = sink.close().await;
    report(TransportEvent::Disconnected { error });
}
