//! Transport error types.

use thiserror::Error;

/// Errors raised by a [`Transport`](crate::Transport).
///
/// None of these are fatal to a session: the connection manager turns them
/// into a disconnect and a scheduled reconnect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// A frame was sent while no connection was open.
    #[error("not connected")]
    NotConnected,

    /// The background connection task is gone.
    #[error("connection task closed")]
    ChannelClosed,

    /// Reading or writing the socket failed.
    #[error("stream error: {0}")]
    Stream(String),
}
