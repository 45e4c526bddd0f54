//! Generic runtime for session orchestration.
//!
//! The Runtime drives the session loop, coordinating between:
//! - [`App`]: interactive state machine
//! - [`ConnectionManager`]: bus connection with its outbound queue
//! - [`Driver`]: platform-specific terminal I/O
//!
//! Each cycle polls input with a bounded wait, drains connection events,
//! fires due timers (reconnects and simulator replies), executes the
//! resulting actions and redraws whatever changed.

use tracing::{debug, info, warn};
use zbus_client::{ConnectionEvent, ConnectionManager, Transport};
use zbus_proto::MockId;

use crate::{App, AppAction, AppEvent, Driver, SessionConfig, timers::Timers};

/// Deferred work owned by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Timer {
    Reconnect(String),
    Reply(MockId),
}

/// Generic runtime that orchestrates App, connection and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `T`: Transport carrying bus frames
pub struct Runtime<D, T>
where
    D: Driver,
    T: Transport,
{
    driver: D,
    app: App,
    connection: ConnectionManager<T>,
    url: String,
    timers: Timers<D::Instant, Timer>,
}

impl<D, T> Runtime<D, T>
where
    D: Driver,
    T: Transport,
{
    /// Create a runtime that will connect to `url` over `transport`.
    pub fn new(driver: D, transport: T, url: impl Into<String>, config: &SessionConfig) -> Self {
        Self {
            driver,
            app: App::new(config),
            connection: ConnectionManager::new(transport, config.connection()),
            url: url.into(),
            timers: Timers::new(),
        }
    }

    /// Run the session loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.start()?;

        loop {
            match self.step().await {
                Ok(false) => {},
                Ok(true) => break,
                Err(e) => {
                    self.driver.stop();
                    return Err(e);
                },
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Open the connection and draw the first frame.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn start(&mut self) -> Result<(), D::Error> {
        info!(url = %self.url, "connecting to zBus");
        self.connection.open(&self.url);

        let previous = self.app.context();
        self.app.end_cycle(previous);
        self.driver.render(&self.app)
    }

    /// Process one cycle of the session loop.
    ///
    /// Returns `true` if the session should end.
    ///
    /// # Errors
    ///
    /// Returns an error if polling input or rendering fails.
    pub async fn step(&mut self) -> Result<bool, D::Error> {
        let previous = self.app.context();
        let mut actions = Vec::new();

        let input = self.driver.poll_event().await?;
        if input.is_empty() {
            actions.extend(self.app.handle(AppEvent::Tick));
        }
        for event in input {
            actions.extend(self.app.handle(event));
        }

        let now = self.driver.now();
        for event in self.connection.poll() {
            match event {
                ConnectionEvent::Connected => {
                    info!(url = %self.url, "connected");
                    actions.extend(self.app.handle(AppEvent::Connected));
                },
                ConnectionEvent::Disconnected { error } => {
                    warn!(%error, "disconnected");
                    actions.extend(self.app.handle(AppEvent::Disconnected { error }));
                },
                ConnectionEvent::Received(event) => {
                    debug!(event = %event.display_name(), "received");
                    actions.extend(self.app.handle(AppEvent::Received(event)));
                },
                ConnectionEvent::QueueDrained => debug!("outbound queue drained"),
                ConnectionEvent::ReconnectAfter { url, delay } => {
                    debug!(%url, ?delay, "reconnect scheduled");
                    self.timers.schedule(now + delay, Timer::Reconnect(url));
                },
            }
        }

        for timer in self.timers.pop_due(now) {
            match timer {
                Timer::Reconnect(url) => self.connection.open(&url),
                Timer::Reply(mock) => actions.extend(self.app.handle(AppEvent::SimulatorReply(mock))),
            }
        }

        if self.execute(actions, now) {
            return Ok(true);
        }

        if self.app.end_cycle(previous).any() {
            self.driver.render(&self.app)?;
        }
        Ok(false)
    }

    /// Execute app actions. Returns `true` on quit.
    fn execute(&mut self, actions: Vec<AppAction>, now: D::Instant) -> bool {
        for action in actions {
            match action {
                AppAction::Quit => return true,
                AppAction::Send(event) => {
                    if self.connection.send(event) == 0 {
                        debug!(queued = self.connection.queued_len(), "event queued");
                    }
                },
                AppAction::Schedule { mock, delay } => {
                    self.timers.schedule(now + delay, Timer::Reply(mock));
                },
            }
        }
        false
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a reference to the connection manager
    pub fn connection(&self) -> &ConnectionManager<T> {
        &self.connection
    }

    /// Get a reference to the driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Number of pending reconnects and simulator replies.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
