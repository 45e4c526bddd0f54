//! Interactive session layer for the zBus client
//!
//! Pure state machines and a generic runtime for the interactive session,
//! enabling deterministic testing with the same code that runs in
//! production.
//!
//! # Components
//!
//! - [`App`]: session state machine (modes, keys, history, simulator)
//! - [`scrollback`]: history windowing over rendered entry heights
//! - [`layout`]: screen regions for a mode and terminal size
//! - [`Simulator`]: canned pinpad replies to received requests
//! - [`Driver`]: trait for platform-specific I/O abstraction
//! - [`Runtime`]: generic session loop using Driver and a
//!   [`zbus_client::Transport`]

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod config;
mod driver;
mod event;
pub mod form;
mod input;
pub mod layout;
mod menu;
mod runtime;
pub mod scrollback;
mod simulator;
mod state;
mod timers;

pub use action::AppAction;
pub use app::{App, Redraw};
pub use config::{DEFAULT_POLL_INTERVAL, SessionConfig};
pub use driver::Driver;
pub use event::AppEvent;
pub use form::SendForm;
pub use input::KeyInput;
pub use menu::{MenuEntry, MenuId, MenuTarget};
pub use runtime::Runtime;
pub use simulator::{DEFAULT_FAST_REPLY_DELAY, DEFAULT_SLOW_REPLY_DELAY, Simulator, responses};
pub use state::{HistoryEntry, Mode, Origin, SessionContext};
