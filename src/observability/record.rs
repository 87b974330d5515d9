//! Flat JSON records for finished spans.
//!
//! One span becomes one line:
//!
//! ```json
//! {"time":"2026-01-01T12:00:00.000Z","span":"handle_event","duration_ms":0.42,
//!  "trace_id":"…","span_id":"…","parent_id":null,
//!  "fields":{"event":"Char"},"events":[],"status":"unset"}
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use opentelemetry::trace::{Event, SpanId, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use serde_json::{json, Map, Value as JsonValue};
use std::time::SystemTime;

/// Serializes a finished span into a single JSON object.
pub fn span_record(span: &SpanData, service: &str) -> JsonValue {
    let duration_ms = span
        .end_time
        .duration_since(span.start_time)
        .map_or(0.0, |d| d.as_secs_f64() * 1000.0);

    let parent_id = (span.parent_span_id != SpanId::INVALID).then(|| format!("{:016x}", span.parent_span_id));

    json!({
        "time": timestamp(span.start_time),
        "service": service,
        "span": span.name,
        "duration_ms": duration_ms,
        "trace_id": format!("{:032x}", span.span_context.trace_id()),
        "span_id": format!("{:016x}", span.span_context.span_id()),
        "parent_id": parent_id,
        "fields": fields(&span.attributes),
        "events": events(&span.events),
        "status": status(&span.status),
    })
}

/// RFC 3339 UTC timestamp with millisecond precision.
pub fn timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn fields(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

fn events(events: &[Event]) -> Vec<JsonValue> {
    events
        .iter()
        .map(|event| {
            json!({
                "time": timestamp(event.timestamp),
                "name": event.name,
                "fields": fields(&event.attributes),
            })
        })
        .collect()
}

fn status(status: &Status) -> JsonValue {
    match status {
        Status::Unset => json!("unset"),
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn timestamps_are_utc_millis() {
        let time = UNIX_EPOCH + Duration::from_millis(1_500);
        assert_eq!(timestamp(time), "1970-01-01T00:00:01.500Z");
    }

    #[test]
    fn attributes_keep_their_json_types() {
        let attrs = vec![
            KeyValue::new("query", "batman"),
            KeyValue::new("status", 200_i64),
            KeyValue::new("stale", false),
        ];
        assert_eq!(fields(&attrs), json!({ "query": "batman", "status": 200, "stale": false }));
    }

    #[test]
    fn error_status_carries_description() {
        let status = Status::error("timeout");
        assert_eq!(super::status(&status), json!({ "error": "timeout" }));
        assert_eq!(super::status(&Status::Ok), json!("ok"));
    }
}
