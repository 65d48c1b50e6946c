use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::tone::{Classification, classify};

/// Author recorded when the payload does not name one.
pub const UNKNOWN_AUTHOR: &str = "unknown";

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("field `{field}` cannot be coerced to a number: {value}")]
    Coercion { field: &'static str, value: String },
}

/// Payload fields exactly as they arrive, before defaults are applied.
#[derive(Debug, Deserialize)]
struct RawMessage {
    message: Option<String>,
    author: Option<String>,
    timestamp: Option<String>,
    category: Option<String>,
    sentiment: Option<Value>,
    message_length: Option<Value>,
}

/// A chat message with every default resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    pub message: String,
    pub author: String,
    pub timestamp: String,
    pub category: Option<String>,
    /// `None` means the score is unknown, not zero.
    pub sentiment: Option<f64>,
    pub message_length: i64,
}

impl IncomingMessage {
    /// Decode a raw record payload. `now` stands in for a missing timestamp.
    pub fn decode(payload: &[u8], now: DateTime<Utc>) -> Result<Self, MessageError> {
        let text = std::str::from_utf8(payload)?;
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value, now)
    }

    pub fn from_value(value: Value, now: DateTime<Utc>) -> Result<Self, MessageError> {
        if !value.is_object() {
            return Err(MessageError::NotAnObject);
        }
        let raw: RawMessage = serde_json::from_value(value)?;

        let message = raw.message.unwrap_or_default();
        let timestamp = match raw.timestamp {
            Some(ts) if !ts.is_empty() => ts,
            _ => format_timestamp(now),
        };
        let sentiment = raw.sentiment.map(coerce_sentiment).transpose()?.flatten();
        let message_length = match raw.message_length {
            Some(v) if !is_falsy(&v) => coerce_length(v)?,
            _ => message.chars().count() as i64,
        };

        Ok(Self {
            author: raw.author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            timestamp,
            category: raw.category,
            sentiment,
            message_length,
            message,
        })
    }

    pub fn classify(&self) -> Classification {
        classify(&self.message, self.sentiment)
    }
}

/// UTC timestamp at second precision, e.g. `2024-05-01T12:30:00`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn coercion(field: &'static str, value: &Value) -> MessageError {
    MessageError::Coercion {
        field,
        value: value.to_string(),
    }
}

fn coerce_sentiment(value: Value) -> Result<Option<f64>, MessageError> {
    match &value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
        Value::Number(n) => n.as_f64().map(Some).ok_or_else(|| coercion("sentiment", &value)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| coercion("sentiment", &value)),
        Value::Array(_) | Value::Object(_) => Err(coercion("sentiment", &value)),
    }
}

// Values treated as "not supplied" for message_length.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn coerce_length(value: Value) -> Result<i64, MessageError> {
    match &value {
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Ok(f.trunc() as i64),
                _ => Err(coercion("message_length", &value)),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| coercion("message_length", &value)),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(coercion("message_length", &value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tone::Tone;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    fn decode(payload: &str) -> Result<IncomingMessage, MessageError> {
        IncomingMessage::decode(payload.as_bytes(), now())
    }

    #[test]
    fn empty_object_gets_all_defaults() {
        let msg = decode("{}").unwrap();
        assert_eq!(msg.message, "");
        assert_eq!(msg.author, UNKNOWN_AUTHOR);
        assert_eq!(msg.timestamp, "2024-05-01T12:30:00");
        assert_eq!(msg.category, None);
        assert_eq!(msg.sentiment, None);
        assert_eq!(msg.message_length, 0);
        assert_eq!(msg.classify().tone, Tone::Plain);
    }

    #[test]
    fn explicit_fields_are_kept() {
        let msg = decode(
            r#"{"message":"Is it raining?","author":"al","timestamp":"2023-01-02T03:04:05",
                "category":"weather","sentiment":0.4,"message_length":99}"#,
        )
        .unwrap();
        assert_eq!(msg.author, "al");
        assert_eq!(msg.timestamp, "2023-01-02T03:04:05");
        assert_eq!(msg.category.as_deref(), Some("weather"));
        assert_eq!(msg.sentiment, Some(0.4));
        assert_eq!(msg.message_length, 99);
    }

    #[test]
    fn nulls_and_empty_timestamp_fall_back() {
        let msg = decode(r#"{"message":null,"author":null,"timestamp":"","sentiment":null}"#)
            .unwrap();
        assert_eq!(msg.message, "");
        assert_eq!(msg.author, UNKNOWN_AUTHOR);
        assert_eq!(msg.timestamp, "2024-05-01T12:30:00");
        assert_eq!(msg.sentiment, None);
    }

    #[test]
    fn length_defaults_to_character_count() {
        let msg = decode(r#"{"message":"héllo ✓"}"#).unwrap();
        assert_eq!(msg.message_length, 7);

        for zeroish in ["0", "0.0", "\"\"", "false", "null", "[]", "{}"] {
            let msg = decode(&format!(r#"{{"message":"abc","message_length":{zeroish}}}"#))
                .unwrap();
            assert_eq!(msg.message_length, 3, "{zeroish}");
        }
    }

    #[test]
    fn length_coercions() {
        let cases = [("\"12\"", 12), ("7.9", 7), ("true", 1), ("\"0\"", 0)];
        for (raw, expected) in cases {
            let msg = decode(&format!(r#"{{"message":"abc","message_length":{raw}}}"#)).unwrap();
            assert_eq!(msg.message_length, expected, "{raw}");
        }
    }

    #[test]
    fn sentiment_coercions() {
        assert_eq!(decode(r#"{"sentiment":" 0.85 "}"#).unwrap().sentiment, Some(0.85));
        assert_eq!(decode(r#"{"sentiment":true}"#).unwrap().sentiment, Some(1.0));
        assert_eq!(decode(r#"{"sentiment":0}"#).unwrap().sentiment, Some(0.0));
    }

    #[test]
    fn uncoercible_numbers_are_rejected() {
        let err = decode(r#"{"message":"hi?","sentiment":"very happy"}"#).unwrap_err();
        assert!(matches!(err, MessageError::Coercion { field: "sentiment", .. }));

        let err = decode(r#"{"message_length":"3.5"}"#).unwrap_err();
        assert!(matches!(err, MessageError::Coercion { field: "message_length", .. }));

        let err = decode(r#"{"message_length":[3]}"#).unwrap_err();
        assert!(matches!(err, MessageError::Coercion { field: "message_length", .. }));

        let err = decode(r#"{"sentiment":[1]}"#).unwrap_err();
        assert!(matches!(err, MessageError::Coercion { .. }));
    }

    #[test]
    fn malformed_payloads_are_decode_errors() {
        assert!(matches!(
            IncomingMessage::decode(&[0xff, 0xfe, 0x7b], now()),
            Err(MessageError::Utf8(_))
        ));
        assert!(matches!(decode("not json"), Err(MessageError::Json(_))));
        assert!(matches!(decode(r#"["message"]"#), Err(MessageError::NotAnObject)));
        assert!(matches!(decode("42"), Err(MessageError::NotAnObject)));
        assert!(matches!(decode(r#"{"message":5}"#), Err(MessageError::Json(_))));
    }
}
