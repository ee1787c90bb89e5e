//! Event envelope delivered to listeners.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The structured wrapper every listener receives.
///
/// This is the one structural contract the bus guarantees. The payload
/// (`data`) shape is defined by each event's producer; the bus treats it
/// as opaque.
///
/// Serializes with the event name under the `type` field:
///
/// ```
/// use axon_bus::Envelope;
/// use serde_json::json;
///
/// let env = Envelope::new("document:changed", json!({"id": 7}), "editor");
/// let wire = serde_json::to_value(&env).unwrap();
/// assert_eq!(wire["type"], "document:changed");
/// assert_eq!(wire["source"], "editor");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Event name (colon-delimited by convention, e.g. `file:save_request`).
    #[serde(rename = "type")]
    pub event: String,
    /// Producer-defined payload.
    pub data: Value,
    /// Milliseconds since the Unix epoch, stamped at dispatch.
    pub timestamp: i64,
    /// Origin label of the publisher.
    pub source: String,
}

impl Envelope {
    /// Creates an envelope stamped with the current time.
    #[must_use]
    pub fn new(event: impl Into<String>, data: Value, source: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data,
            timestamp: Utc::now().timestamp_millis(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_fields() {
        let env = Envelope::new("editor:content_changed", json!({"len": 42}), "editor");
        assert_eq!(env.event, "editor:content_changed");
        assert_eq!(env.data, json!({"len": 42}));
        assert_eq!(env.source, "editor");
        assert!(env.timestamp > 0);
    }

    #[test]
    fn envelope_serializes_event_as_type() {
        let env = Envelope::new("file:saved", Value::Null, "bus");
        let wire = serde_json::to_string(&env).unwrap();
        assert!(wire.contains("\"type\":\"file:saved\""));
        assert!(!wire.contains("\"event\""));
    }

    #[test]
    fn envelope_roundtrip() {
        let env = Envelope::new("ai:process_request", json!(["a", "b"]), "toolbar");
        let wire = serde_json::to_string(&env).unwrap();
        let back: Envelope = serde_json::from_str(&wire).unwrap();
        assert_eq!(env, back);
    }
}
