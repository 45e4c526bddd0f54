//! Batch mode: send events and exit.
//!
//! Every event is queued on the [`ConnectionManager`] before the connection is
//! opened, so the queue flush on connect writes them all in order. The run
//! ends when that flush completes; failed attempts are retried after the
//! configured delay, indefinitely.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};
use zbus_client::{ConnectionEvent, ConnectionManager, Event, Transport};

/// How often the connection is polled while waiting.
pub const BATCH_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Batch mode errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    /// A `--send` value could not be turned into an event.
    #[error("invalid event {value:?}: {reason}")]
    InvalidEvent {
        /// The rejected value.
        value: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Parse a `--send` value.
///
/// A value starting with `{` must be a JSON object in wire format. Anything
/// else is an event name, optionally followed by `:` and the data.
///
/// # Errors
///
/// Returns [`BatchError::InvalidEvent`] for malformed JSON or an empty name.
pub fn parse_event(value: &str) -> Result<Event, BatchError> {
    let invalid = |reason: &str| BatchError::InvalidEvent {
        value: value.to_owned(),
        reason: reason.to_owned(),
    };

    let trimmed = value.trim();
    let event = if trimmed.starts_with('{') {
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(_)) => Event::parse(trimmed),
            _ => return Err(invalid("not a JSON object")),
        }
    } else {
        let (name, data) = trimmed.split_once(':').unwrap_or((trimmed, ""));
        Event::from_name_and_data(name.trim(), data.trim(), "")
    };

    if event.display_name().is_empty() {
        return Err(invalid("missing event name"));
    }
    Ok(event)
}

/// Parse every `--send` value, failing on the first bad one.
///
/// # Errors
///
/// Returns the error of the first value [`parse_event`] rejects.
pub fn parse_events(values: &[String]) -> Result<Vec<Event>, BatchError> {
    values.iter().map(|value| parse_event(value)).collect()
}

/// Queue `events`, connect to `url` and wait until they have all been written.
pub async fn send_all<T: Transport>(
    connection: &mut ConnectionManager<T>,
    url: &str,
    events: Vec<Event>,
) {
    let count = events.len();
    for event in events {
        connection.send(event);
    }
    info!(url, count, "sending events");
    connection.open(url);

    let mut reconnect_at = None;
    loop {
        for event in connection.poll() {
            match event {
                ConnectionEvent::QueueDrained => {
                    info!(count, "all events sent");
                    return;
                },
                ConnectionEvent::ReconnectAfter { delay, .. } => {
                    reconnect_at = Some(Instant::now() + delay);
                },
                ConnectionEvent::Disconnected { error } => warn!(%error, "disconnected"),
                ConnectionEvent::Connected => debug!("connected"),
                ConnectionEvent::Received(event) => {
                    debug!(event = %event.display_name(), "ignoring received event");
                },
            }
        }

        if reconnect_at.is_some_and(|at| Instant::now() >= at) {
            reconnect_at = None;
            connection.open(url);
        }

        sleep(BATCH_POLL_INTERVAL).await;
    }
}
