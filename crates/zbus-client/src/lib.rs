//! Client
//!
//! Connection manager for the zBus event bus. Queues outbound events while
//! disconnected, flushes them in order on connect, and asks its caller to
//! retry after a fixed delay whenever the connection drops.
//!
//! # Architecture
//!
//! The manager is Sans-IO: the socket lives behind the [`Transport`] trait,
//! and the manager never blocks or sleeps. The caller drives it by calling
//! [`ConnectionManager::poll`] from its loop and acting on the returned
//! [`ConnectionEvent`]s, including the [`ConnectionEvent::ReconnectAfter`]
//! timer request.
//!
//! # Components
//!
//! - [`ConnectionManager`]: Queue, state and reconnect policy
//! - [`Transport`]: Capability the manager consumes
//! - [`ConnectionEvent`]: Notifications produced by the manager
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides
//! [`transport::WebSocketTransport`], a Tokio websocket transport. The
//! `test-utils` feature provides [`memory::MemoryTransport`], an in-memory
//! transport scripted by tests.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod connection;
mod error;

#[cfg(feature = "test-utils")]
pub mod memory;
#[cfg(feature = "transport")]
pub mod transport;

pub use connection::{
    ConnectionConfig, ConnectionEvent, ConnectionManager, ConnectionState, DEFAULT_RETRY_DELAY,
    Transport, TransportEvent,
};
pub use error::TransportError;
pub use zbus_proto::Event;
