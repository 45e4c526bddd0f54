//! zBus wire protocol
//!
//! Event model and JSON framing for the zBus publish/subscribe bus, plus the
//! catalog of canned hardware events used to mock pinpad, printer and scanner
//! traffic.
//!
//! # Components
//!
//! - [`Event`]: A bus event with its fail-soft parser and canonical encoder
//! - [`MockId`]: Catalog of template events for simulated hardware

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod event;
mod mock;

pub use event::{AUTH_ATTEMPT_ID_KEY, Event, split_name};
pub use mock::MockId;
