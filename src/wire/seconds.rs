//! Durations carried as a floating-point number of seconds.
//!
//! A missing, unparsable, negative or non-finite value decodes to
//! [`Duration::ZERO`].

use super::scalar_text;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;
use std::time::Duration;

pub fn decode(value: &Value) -> Duration {
    scalar_text(value)
        .and_then(|text| text.parse::<f64>().ok())
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .unwrap_or_default()
}

pub fn encode(value: Duration) -> Value {
    Value::from(value.as_secs_f64())
}

pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(value.as_secs_f64())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().map(decode).unwrap_or_default())
}
