//! zBus event and its JSON wire codec.
//!
//! Every message on the bus is a single JSON object:
//!
//! ```text
//! {
//!     "data": <any json value>,
//!     "event": "<domain>.<type>",
//!     "requestId": "<string, omitted when empty>"
//! }
//! ```
//!
//! The domain may itself contain dots (`pinpad.manager.instance`), so the name
//! is split on its *last* dot. Parsing never fails: missing or mistyped fields
//! decode to empty values so the operator always sees that something arrived.

use std::fmt;

use serde_json::{Map, Value};

use crate::MockId;

const EVENT_KEY: &str = "event";
const DATA_KEY: &str = "data";
const REQUEST_ID_KEY: &str = "requestId";

/// Key inside object data that carries the pinpad authorization attempt.
pub const AUTH_ATTEMPT_ID_KEY: &str = "authAttemptId";

/// A single zBus event.
///
/// `request_id` and `auth_attempt_id` are only meaningful for pinpad traffic:
/// they tie an event to an earlier request and to a specific payment
/// authorization, respectively.
///
/// # Invariants
///
/// - `auth_attempt_id` mirrors `data.authAttemptId` when `data` is an object
///   holding a string at that key, and is empty otherwise. It is never written
///   to the wire as a separate key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    /// Everything before the last dot of the event name.
    pub domain: String,
    /// Everything after the last dot of the event name (wire `type`).
    pub kind: String,
    /// Arbitrary payload. `Null` when absent.
    pub data: Value,
    /// Pinpad request this event answers. Empty when unset.
    pub request_id: String,
    /// Pinpad payment authorization this event belongs to. Empty when unset.
    pub auth_attempt_id: String,
}

impl Event {
    /// Create an event from a full `domain.type` name and a payload.
    pub fn new(name: &str, data: Value, request_id: impl Into<String>) -> Self {
        let (domain, kind) = split_name(name);
        let auth_attempt_id = auth_attempt_id_of(&data);
        Self {
            domain: domain.to_owned(),
            kind: kind.to_owned(),
            data,
            request_id: request_id.into(),
            auth_attempt_id,
        }
    }

    /// Decode a wire frame.
    ///
    /// Fails soft: text that is not a JSON object yields an empty event, and
    /// each field that is missing or has the wrong type is left empty.
    pub fn parse(text: &str) -> Self {
        let Ok(Value::Object(mut object)) = serde_json::from_str::<Value>(text) else {
            return Self::default();
        };

        let name = take_string(&mut object, EVENT_KEY);
        let data = object.remove(DATA_KEY).unwrap_or(Value::Null);
        let request_id = take_string(&mut object, REQUEST_ID_KEY);

        Self::new(&name, data, request_id)
    }

    /// Create an event from operator-entered text.
    ///
    /// `raw_data` is parsed as JSON when possible and otherwise kept as a
    /// plain string, so re-serializing always produces valid JSON. Empty data
    /// becomes `null`.
    pub fn from_name_and_data(name: &str, raw_data: &str, request_id: &str) -> Self {
        Self::new(name, parse_data(raw_data), request_id)
    }

    /// Create a mock hardware event.
    ///
    /// The ids are injected at use time: `request_id` always, and
    /// `auth_attempt_id` as a new `data` key only when the template data is an
    /// object. Non-object data is left untouched.
    pub fn from_mock(mock: MockId, request_id: &str, auth_attempt_id: &str) -> Self {
        let mut event = mock.template();
        event.request_id = request_id.to_owned();

        if let Value::Object(data) = &mut event.data {
            data.insert(AUTH_ATTEMPT_ID_KEY.to_owned(), Value::String(auth_attempt_id.to_owned()));
            event.auth_attempt_id = auth_attempt_id.to_owned();
        }

        event
    }

    /// Full event name: domain and type joined by a dot.
    ///
    /// The dot is omitted when either side is empty, so the result is empty
    /// only when both are.
    pub fn display_name(&self) -> String {
        join_name(&self.domain, &self.kind)
    }

    /// Encode as a wire frame with stable (sorted) key order.
    pub fn to_json(&self) -> String {
        let mut object = Map::new();
        object.insert(DATA_KEY.to_owned(), self.data.clone());
        object.insert(EVENT_KEY.to_owned(), Value::String(self.display_name()));
        if !self.request_id.is_empty() {
            object.insert(REQUEST_ID_KEY.to_owned(), Value::String(self.request_id.clone()));
        }
        Value::Object(object).to_string()
    }

    /// Editable text form of `data`.
    ///
    /// Objects and arrays become compact JSON, strings are returned raw, other
    /// scalars as JSON text, and `null` as the empty string.
    pub fn data_string(&self) -> String {
        match &self.data {
            Value::Null => String::new(),
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

/// Split `name` on its last dot into `(domain, type)`.
///
/// A name without a dot is all domain.
pub fn split_name(name: &str) -> (&str, &str) {
    name.rsplit_once('.').unwrap_or((name, ""))
}

fn join_name(domain: &str, kind: &str) -> String {
    if domain.is_empty() || kind.is_empty() {
        format!("{domain}{kind}")
    } else {
        format!("{domain}.{kind}")
    }
}

fn parse_data(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

fn take_string(object: &mut Map<String, Value>, key: &str) -> String {
    match object.remove(key) {
        Some(Value::String(text)) => text,
        _ => String::new(),
    }
}

fn auth_attempt_id_of(data: &Value) -> String {
    data.get(AUTH_ATTEMPT_ID_KEY).and_then(Value::as_str).unwrap_or_default().to_owned()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_valid_frame() {
        let event = Event::parse(
            r#"{"data":"test-data","event":"test-domain.test-type","requestId":"test-request-id"}"#,
        );

        assert_eq!(event.domain, "test-domain");
        assert_eq!(event.kind, "test-type");
        assert_eq!(event.data, json!("test-data"));
        assert_eq!(event.request_id, "test-request-id");
    }

    #[test]
    fn parse_splits_on_last_dot() {
        let event = Event::parse(r#"{"event":"pinpad.manager.instance.updateFirmware"}"#);

        assert_eq!(event.domain, "pinpad.manager.instance");
        assert_eq!(event.kind, "updateFirmware");
        assert_eq!(event.data, Value::Null);
    }

    #[test]
    fn parse_garbage_yields_empty_event() {
        for text in ["", "not json", "[1,2,3]", "42", "{}"] {
            assert_eq!(Event::parse(text), Event::default(), "input: {text:?}");
        }
    }

    #[test]
    fn parse_mistyped_fields_are_left_empty() {
        let event = Event::parse(r#"{"event":7,"data":{"a":1},"requestId":false}"#);

        assert_eq!(event.display_name(), "");
        assert_eq!(event.data, json!({"a": 1}));
        assert_eq!(event.request_id, "");
    }

    #[test]
    fn parse_captures_auth_attempt_id_from_data() {
        let event = Event::parse(
            r#"{"event":"pinpad.preparePaymentRequest","data":{"authAttemptId":"auth-7"}}"#,
        );

        assert_eq!(event.auth_attempt_id, "auth-7");
    }

    #[test]
    fn from_name_and_data_parses_json_opportunistically() {
        let object = Event::from_name_and_data("a.b", r#"{"k":[1,2]}"#, "");
        assert_eq!(object.data, json!({"k": [1, 2]}));

        let number = Event::from_name_and_data("a.b", "12", "");
        assert_eq!(number.data, json!(12));

        let text = Event::from_name_and_data("a.b", "{receiptPreference: 'PAPER'}", "");
        assert_eq!(text.data, json!("{receiptPreference: 'PAPER'}"));

        let empty = Event::from_name_and_data("a.b", "", "");
        assert_eq!(empty.data, Value::Null);
    }

    #[test]
    fn display_name_omits_separator_when_a_side_is_empty() {
        let mut event = Event::default();
        assert_eq!(event.display_name(), "");

        event.domain = "the-lonely-loner".into();
        assert_eq!(event.display_name(), "the-lonely-loner");

        event.kind = "tune".into();
        assert_eq!(event.display_name(), "the-lonely-loner.tune");

        event.domain.clear();
        assert_eq!(event.display_name(), "tune");
    }

    #[test]
    fn to_json_omits_empty_request_id() {
        let event = Event::new("scanner.read", Value::Null, "");
        assert_eq!(event.to_json(), r#"{"data":null,"event":"scanner.read"}"#);
    }

    #[test]
    fn to_json_sorts_keys() {
        let event = Event::new("test-domain.test-type", json!("test-data"), "test-request-id");
        assert_eq!(
            event.to_json(),
            r#"{"data":"test-data","event":"test-domain.test-type","requestId":"test-request-id"}"#
        );
    }

    #[test]
    fn data_string_renders_each_shape() {
        let mut event = Event::default();
        assert_eq!(event.data_string(), "");

        event.data = json!("test-data");
        assert_eq!(event.data_string(), "test-data");

        event.data = json!({"nest": {"test": "c'est la vie"}, "key": "value"});
        assert_eq!(event.data_string(), r#"{"key":"value","nest":{"test":"c'est la vie"}}"#);

        event.data = json!([{"a": 1}, 1, "this is an abomination"]);
        assert_eq!(event.data_string(), r#"[{"a":1},1,"this is an abomination"]"#);

        event.data = json!(true);
        assert_eq!(event.data_string(), "true");
    }

    #[test]
    fn from_mock_injects_auth_attempt_id_into_object_data() {
        let event = Event::from_mock(MockId::PinpadCardInfo, "req-1", "auth-1");

        assert_eq!(event.display_name(), "pinpad.cardInfo");
        assert_eq!(event.request_id, "req-1");
        assert_eq!(event.auth_attempt_id, "auth-1");
        assert_eq!(event.data.get(AUTH_ATTEMPT_ID_KEY), Some(&json!("auth-1")));
    }

    #[test]
    fn from_mock_leaves_non_object_data_untouched() {
        let event = Event::from_mock(MockId::ScannerReadPci, "req-1", "auth-1");

        assert_eq!(event.data, json!("900100<STORE_NUMBER><KPCOUNTER_ID>"));
        assert_eq!(event.request_id, "req-1");
        assert_eq!(event.auth_attempt_id, "");

        let bare = Event::from_mock(MockId::PinpadCardInserted, "", "auth-1");
        assert_eq!(bare.data, Value::Null);
    }
}
