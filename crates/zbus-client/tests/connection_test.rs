//! Connection manager behavior over the in-memory transport.

use proptest::prelude::*;
use serde_json::json;
use zbus_client::{
    ConnectionConfig, ConnectionEvent, ConnectionManager, ConnectionState, Event,
    memory::{MemoryRemote, MemoryTransport},
};

const URL: &str = "ws://localhost:8080/zbus";

fn setup() -> (ConnectionManager<MemoryTransport>, MemoryRemote) {
    let (transport, remote) = MemoryTransport::pair();
    (ConnectionManager::new(transport, ConnectionConfig::default()), remote)
}

/// Poll once, reopening immediately on reconnect requests.
fn pump(manager: &mut ConnectionManager<MemoryTransport>) -> Vec<ConnectionEvent> {
    let events = manager.poll();
    for event in &events {
        if let ConnectionEvent::ReconnectAfter { url, .. } = event {
            manager.open(url);
        }
    }
    events
}

fn numbered(i: usize) -> Event {
    Event::new("test.numbered", json!({ "n": i }), format!("req-{i}"))
}

#[test]
fn batch_queued_before_open_is_delivered_in_order() {
    let (mut manager, remote) = setup();
    let events: Vec<Event> = (0..5).map(numbered).collect();
    for event in &events {
        assert_eq!(manager.send(event.clone()), 0);
    }

    manager.open(URL);
    remote.accept();
    let notifications = pump(&mut manager);

    let drained = notifications.iter().filter(|e| **e == ConnectionEvent::QueueDrained).count();
    assert_eq!(drained, 1);
    assert_eq!(remote.sent(), events.iter().map(Event::to_json).collect::<Vec<_>>());
    assert_eq!(remote.opened(), vec![URL.to_owned()]);
}

#[test]
fn inbound_frames_are_parsed() {
    let (mut manager, remote) = setup();
    manager.open(URL);
    remote.accept();
    remote.deliver(r#"{"event":"pos.connected","data":null,"requestId":"r1"}"#);
    remote.deliver("definitely not json");

    let received: Vec<Event> = pump(&mut manager)
        .into_iter()
        .filter_map(|e| match e {
            ConnectionEvent::Received(event) => Some(event),
            _ => None,
        })
        .collect();

    assert_eq!(received.len(), 2);
    assert_eq!(received[0].display_name(), "pos.connected");
    assert_eq!(received[0].request_id, "r1");
    assert_eq!(received[1], Event::default());
}

#[test]
fn refused_connection_retries_same_url() {
    let (mut manager, remote) = setup();
    manager.open(URL);
    remote.drop_connection("connection refused");

    let events = manager.poll();
    assert!(events.contains(&ConnectionEvent::ReconnectAfter {
        url: URL.to_owned(),
        delay: ConnectionConfig::default().retry_delay,
    }));
    assert_eq!(manager.state(), ConnectionState::Disconnected);
    assert_eq!(manager.last_error(), "connection refused");

    manager.open(URL);
    assert_eq!(manager.state(), ConnectionState::Connecting);
    assert_eq!(remote.opened(), vec![URL.to_owned(), URL.to_owned()]);
}

#[test]
fn rejected_sends_wait_for_next_connect() {
    let (mut manager, remote) = setup();
    manager.open(URL);
    remote.accept();
    pump(&mut manager);

    remote.fail_sends(true);
    assert_eq!(manager.send(numbered(1)), 0);
    pump(&mut manager);
    assert_eq!(manager.queued_len(), 1);

    remote.fail_sends(false);
    remote.accept();
    pump(&mut manager);

    assert_eq!(remote.sent(), vec![numbered(1).to_json()]);
    assert_eq!(manager.queued_len(), 0);
}

#[test]
fn send_after_unpolled_reconnect_stays_behind_queue() {
    let (mut manager, remote) = setup();
    manager.open(URL);
    remote.accept();
    pump(&mut manager);

    // Drop and re-accept before the manager polls either event.
    remote.drop_connection("reset");
    assert_eq!(manager.send(numbered(1)), 0);
    remote.accept();
    assert_eq!(manager.send(numbered(2)), 0);
    assert!(remote.sent().is_empty());

    pump(&mut manager);
    assert_eq!(remote.sent(), vec![numbered(1).to_json(), numbered(2).to_json()]);
}

#[derive(Debug, Clone)]
enum Operation {
    Send,
    Accept,
    Drop,
    FailSends(bool),
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => Just(Operation::Send),
        2 => Just(Operation::Accept),
        2 => Just(Operation::Drop),
        1 => any::<bool>().prop_map(Operation::FailSends),
    ]
}

proptest! {
    /// Whatever the connection does, every event reaches the bus exactly once,
    /// in the order it was sent.
    #[test]
    fn prop_events_delivered_once_in_order(
        ops in prop::collection::vec(operation_strategy(), 0..60)
    ) {
        let (mut manager, remote) = setup();
        manager.open(URL);

        let mut expected = Vec::new();
        for op in ops {
            match op {
                Operation::Send => {
                    let event = numbered(expected.len());
                    expected.push(event.to_json());
                    manager.send(event);
                },
                Operation::Accept => remote.accept(),
                Operation::Drop => remote.drop_connection("dropped"),
                Operation::FailSends(fail) => remote.fail_sends(fail),
            }
            pump(&mut manager);

            // PROPERTY: Bus only ever sees a prefix of the send order
            let sent = remote.sent();
            prop_assert_eq!(&sent[..], &expected[..sent.len()]);
        }

        remote.fail_sends(false);
        remote.accept();
        let events = pump(&mut manager);

        // PROPERTY: Final connect flushes everything and drains once
        prop_assert_eq!(remote.sent(), expected);
        prop_assert_eq!(manager.queued_len(), 0);
        prop_assert_eq!(
            events.iter().filter(|e| **e == ConnectionEvent::QueueDrained).count(),
            1
        );
    }
}
