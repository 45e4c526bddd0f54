//! Terminal UI for the zBus client
//!
//! A thin shell over [`zbus_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`zbus_app::Runtime`].
//!
//! This crate handles terminal rendering, the command line, and the
//! non-interactive batch mode that sends events and exits.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod batch;
pub mod cli;
pub mod terminal;
pub mod ui;

pub use batch::BatchError;
pub use cli::Args;
pub use terminal::{TerminalDriver, TerminalError};
pub use zbus_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
