//! Property-based tests for the event wire codec.
//!
//! These tests verify that serialization is correct for ALL event names and
//! payloads the operator can type, not just specific examples.

use insta::assert_snapshot;
use proptest::prelude::*;
use serde_json::Value;
use zbus_proto::{Event, MockId};

/// Strategy for dotted event names without empty segments.
fn arbitrary_name() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z][a-zA-Z0-9_-]{0,8}", 1..5).prop_map(|parts| parts.join("."))
}

/// Strategy for raw data text, mixing valid JSON and free text.
fn arbitrary_raw_data() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ -~]{0,24}",
        any::<i32>().prop_map(|n| n.to_string()),
        ("[a-z]{1,6}", "[ -~]{0,12}")
            .prop_map(|(k, v)| Value::Object([(k, Value::String(v))].into_iter().collect())
                .to_string()),
    ]
}

#[test]
fn prop_serialize_parse_roundtrip() {
    proptest!(|(name in arbitrary_name(), raw in arbitrary_raw_data(), request_id in "[a-z0-9-]{0,12}")| {
        let event = Event::from_name_and_data(&name, &raw, &request_id);
        let decoded = Event::parse(&event.to_json());

        // PROPERTY: every field survives the wire
        prop_assert_eq!(&decoded.domain, &event.domain);
        prop_assert_eq!(&decoded.kind, &event.kind);
        prop_assert_eq!(&decoded.data, &event.data);
        prop_assert_eq!(&decoded.request_id, &event.request_id);
    });
}

#[test]
fn prop_reserialization_is_byte_identical() {
    proptest!(|(name in arbitrary_name(), raw in arbitrary_raw_data(), request_id in "[a-z0-9-]{0,12}")| {
        let wire = Event::from_name_and_data(&name, &raw, &request_id).to_json();

        // PROPERTY: sorted keys make the encoding canonical
        prop_assert_eq!(Event::parse(&wire).to_json(), wire);
    });
}

#[test]
fn prop_parse_never_panics() {
    proptest!(|(text in "\\PC{0,64}")| {
        let event = Event::parse(&text);
        // PROPERTY: whatever arrived can be re-encoded
        prop_assert!(serde_json::from_str::<Value>(&event.to_json()).is_ok());
    });
}

#[test]
fn mock_wire_format() {
    let event = Event::from_mock(MockId::PinpadCardRemoved, "req-42", "auth-9");
    assert_snapshot!(event.to_json(), @r#"{"data":null,"event":"pinpad.cardRemoved","requestId":"req-42"}"#);

    let pci = Event::from_mock(MockId::ScannerReadPci, "", "");
    assert_snapshot!(pci.to_json(), @r#"{"data":"900100<STORE_NUMBER><KPCOUNTER_ID>","event":"scanner.read"}"#);
}
