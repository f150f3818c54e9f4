//! Fear/greed sentiment feed. The upstream wraps readings in a `data`
//! array and delivers numerics as strings; both the wrapped and the bare
//! object shape are accepted.

use serde::Deserialize;
use serde_json::Value;

use crate::feed::FeedError;
use crate::{SentimentReading, UtcDateTime};

pub const ENDPOINT: &str = "https://api.alternative.me/fng/";

/// Deterministic sentiment payload for offline runs and tests.
pub const OFFLINE_SENTIMENT: &str = r#"{
  "name": "Fear and Greed Index",
  "data": [
    {"value": "41", "value_classification": "Fear", "timestamp": "1724803200"}
  ]
}"#;

#[derive(Debug, Deserialize)]
struct WrappedPayload {
    data: Vec<RawReading>,
}

#[derive(Debug, Deserialize)]
struct RawReading {
    value: Value,
    value_classification: String,
    timestamp: Value,
}

/// Parses a sentiment body into the most recent reading.
pub fn parse_sentiment(body: &str) -> Result<SentimentReading, FeedError> {
    let raw: RawReading = match serde_json::from_str::<WrappedPayload>(body) {
        Ok(wrapped) => wrapped
            .data
            .into_iter()
            .next()
            .ok_or_else(|| FeedError::decode("sentiment payload has an empty data array"))?,
        Err(_) => serde_json::from_str(body).map_err(|error| {
            FeedError::decode(format!("sentiment body does not match shape: {error}"))
        })?,
    };

    let value = coerce_i64(&raw.value)
        .ok_or_else(|| FeedError::decode("sentiment value is not an integer"))?;
    let seconds = coerce_i64(&raw.timestamp)
        .ok_or_else(|| FeedError::decode("sentiment timestamp is not unix seconds"))?;
    let as_of = UtcDateTime::from_unix_seconds(seconds)
        .map_err(|error| FeedError::decode(error.to_string()))?;

    SentimentReading::new(value, raw.value_classification, as_of)
        .map_err(|error| FeedError::decode(error.to_string()))
}

/// The feed delivers integers both bare and as decimal strings.
fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wrapped_string_fields() {
        let body = r#"{"name":"Fear and Greed Index",
            "data":[{"value":"54","value_classification":"Neutral","timestamp":"1724803200"}]}"#;
        let reading = parse_sentiment(body).expect("body matches shape");
        assert_eq!(reading.value, 54);
        assert_eq!(reading.classification, "Neutral");
        assert_eq!(reading.as_of.format_rfc3339(), "2024-08-28T00:00:00Z");
    }

    #[test]
    fn parses_bare_object_with_numeric_fields() {
        let body = r#"{"value":18,"value_classification":"Extreme Fear","timestamp":1724803200}"#;
        let reading = parse_sentiment(body).expect("body matches shape");
        assert_eq!(reading.value, 18);
        assert_eq!(reading.classification, "Extreme Fear");
    }

    #[test]
    fn offline_payload_parses_cleanly() {
        let reading = parse_sentiment(OFFLINE_SENTIMENT).expect("bundled payload parses");
        assert_eq!(reading.value, 41);
        assert_eq!(reading.classification, "Fear");
    }

    #[test]
    fn rejects_out_of_range_index() {
        let body = r#"{"value":"250","value_classification":"Broken","timestamp":1724803200}"#;
        let error = parse_sentiment(body).expect_err("must fail");
        assert_eq!(error.code(), "feed.decode");
    }

    #[test]
    fn rejects_empty_data_array() {
        let error = parse_sentiment(r#"{"data":[]}"#).expect_err("must fail");
        assert_eq!(error.code(), "feed.decode");
    }
}
