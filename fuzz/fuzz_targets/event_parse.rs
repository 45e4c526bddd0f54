//! Fuzz target for Event::parse
//!
//! Feeds arbitrary text to the fail-soft frame decoder to find:
//! - Parser panics on malformed or deeply nested JSON
//! - Frames whose re-encoding does not decode to the same event
//!
//! The fuzzer should NEVER panic. Invalid text decodes to an empty event.

#![no_main]

use libfuzzer_sys::fuzz_target;
use zbus_proto::Event;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let event = Event::parse(text);

    // Invariant: encoding is stable after one decode
    let encoded = event.to_json();
    assert_eq!(Event::parse(&encoded).to_json(), encoded);
});
