//! Runtime integration tests.
//!
//! A scripted driver feeds input and advances a virtual clock by one poll
//! interval per cycle, while the in-memory transport plays the bus. Each test
//! ends with an oracle check on what the bus saw and what the App shows.

use std::{collections::VecDeque, convert::Infallible, time::Duration};

use serde_json::json;
use zbus_app::{
    App, AppEvent, DEFAULT_POLL_INTERVAL, Driver, KeyInput, Mode, Origin, Runtime, SessionConfig,
};
use zbus_client::{
    ConnectionState, Event,
    memory::{MemoryRemote, MemoryTransport},
};

const URL: &str = "ws://localhost:8080/zbus";

/// Driver with scripted input and a virtual clock.
#[derive(Debug, Default)]
struct ScriptedDriver {
    script: VecDeque<Vec<AppEvent>>,
    now: Duration,
    renders: usize,
    stopped: bool,
}

impl ScriptedDriver {
    fn keys(&mut self, text: &str) {
        for c in text.chars() {
            self.script.push_back(vec![AppEvent::Key(KeyInput::Char(c))]);
        }
    }
}

impl Driver for ScriptedDriver {
    type Error = Infallible;
    type Instant = Duration;

    async fn poll_event(&mut self) -> Result<Vec<AppEvent>, Self::Error> {
        self.now += DEFAULT_POLL_INTERVAL;
        Ok(self.script.pop_front().unwrap_or_default())
    }

    fn now(&self) -> Duration {
        self.now
    }

    fn render(&mut self, _app: &App) -> Result<(), Self::Error> {
        self.renders += 1;
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

type TestRuntime = Runtime<ScriptedDriver, MemoryTransport>;

fn setup(driver: ScriptedDriver, config: &SessionConfig) -> (TestRuntime, MemoryRemote) {
    let (transport, remote) = MemoryTransport::pair();
    let mut runtime = Runtime::new(driver, transport, URL, config);
    runtime.start().unwrap();
    (runtime, remote)
}

async fn steps(runtime: &mut TestRuntime, count: usize) {
    for _ in 0..count {
        let quit = runtime.step().await.unwrap();
        assert!(!quit, "runtime quit unexpectedly");
    }
}

fn sent_names(remote: &MemoryRemote) -> Vec<String> {
    remote.sent().iter().map(|text| Event::parse(text).display_name()).collect()
}

#[tokio::test]
async fn start_opens_connection_and_renders() {
    let (runtime, remote) = setup(ScriptedDriver::default(), &SessionConfig::default());

    assert_eq!(remote.opened(), vec![URL.to_owned()]);
    assert_eq!(runtime.connection().state(), ConnectionState::Connecting);
    assert_eq!(runtime.driver().renders, 1);
}

#[tokio::test]
async fn event_sent_while_disconnected_is_flushed_on_connect() {
    let mut driver = ScriptedDriver::default();
    driver.keys("sprinter.print");
    driver.script.push_back(vec![AppEvent::Key(KeyInput::Enter)]);
    let (mut runtime, remote) = setup(driver, &SessionConfig::default());

    steps(&mut runtime, 15).await;
    assert!(remote.sent().is_empty());
    assert_eq!(runtime.connection().queued_len(), 1);
    assert_eq!(runtime.app().history().len(), 1);

    remote.accept();
    steps(&mut runtime, 1).await;

    assert!(runtime.app().is_connected());
    assert_eq!(sent_names(&remote), vec!["printer.print"]);
    assert_eq!(runtime.connection().queued_len(), 0);
}

#[tokio::test]
async fn received_events_land_in_history() {
    let (mut runtime, remote) = setup(ScriptedDriver::default(), &SessionConfig::default());
    remote.accept();
    remote.deliver(r#"{"event":"pos.connected","data":null}"#);
    remote.deliver("not json");
    steps(&mut runtime, 1).await;

    let history = runtime.app().history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].origin(), Origin::Received);
    assert_eq!(history[0].event().display_name(), "pos.connected");
    assert_eq!(history[1].event(), &Event::default());
    assert_eq!(runtime.app().top(), 1);
}

#[tokio::test]
async fn disconnect_reconnects_after_retry_delay() {
    let config = SessionConfig { retry_delay: Duration::from_millis(500), ..SessionConfig::default() };
    let (mut runtime, remote) = setup(ScriptedDriver::default(), &config);
    remote.accept();
    steps(&mut runtime, 1).await;

    remote.drop_connection("connection reset");
    steps(&mut runtime, 1).await;
    assert!(!runtime.app().is_connected());
    assert_eq!(runtime.app().last_error(), "connection reset");
    assert_eq!(runtime.pending_timers(), 1);

    // Scheduled at the disconnect cycle; fires five polls later.
    steps(&mut runtime, 4).await;
    assert_eq!(remote.opened().len(), 1);
    steps(&mut runtime, 1).await;
    assert_eq!(remote.opened(), vec![URL.to_owned(), URL.to_owned()]);

    remote.accept();
    steps(&mut runtime, 1).await;
    assert!(runtime.app().is_connected());
}

#[tokio::test]
async fn simulator_answers_prepare_payment_after_slow_delay() {
    let config = SessionConfig { simulator: true, ..SessionConfig::default() };
    let (mut runtime, remote) = setup(ScriptedDriver::default(), &config);
    remote.accept();
    let request = Event::new(
        "pinpad.preparePaymentRequest",
        json!({"authAttemptId": "auth-7", "amount": "1.00"}),
        "req-7",
    );
    remote.deliver(&request.to_json());
    steps(&mut runtime, 1).await;
    assert_eq!(runtime.pending_timers(), 2);

    steps(&mut runtime, 49).await;
    assert!(remote.sent().is_empty());

    steps(&mut runtime, 1).await;
    assert_eq!(sent_names(&remote), vec!["pinpad.cardInserted", "pinpad.cardInfo"]);

    let card_info = Event::parse(&remote.sent()[1]);
    assert_eq!(card_info.request_id, "req-7");
    assert_eq!(card_info.auth_attempt_id, "auth-7");

    let origins: Vec<_> = runtime.app().history().iter().map(|entry| entry.origin()).collect();
    assert_eq!(origins, vec![Origin::Received, Origin::Sent, Origin::Sent]);
}

#[tokio::test]
async fn menu_mock_is_sent_from_form() {
    let mut driver = ScriptedDriver::default();
    driver.keys("31");
    driver.script.push_back(vec![AppEvent::Key(KeyInput::Enter)]);
    let (mut runtime, remote) = setup(driver, &SessionConfig::default());
    remote.accept();

    steps(&mut runtime, 3).await;

    assert_eq!(runtime.app().mode(), Mode::Send);
    assert_eq!(sent_names(&remote), vec!["scanner.read"]);
}

#[tokio::test]
async fn interrupt_ends_session_and_stops_driver() {
    let mut driver = ScriptedDriver::default();
    driver.script.push_back(vec![AppEvent::Interrupt]);
    let (transport, _remote) = MemoryTransport::pair();
    let runtime = Runtime::new(driver, transport, URL, &SessionConfig::default());

    runtime.run().await.unwrap();
}

#[tokio::test]
async fn idle_cycles_do_not_render() {
    let (mut runtime, _remote) = setup(ScriptedDriver::default(), &SessionConfig::default());
    steps(&mut runtime, 10).await;
    assert_eq!(runtime.driver().renders, 1);
}
