//! Dates carried as integer milliseconds since the Unix epoch (UTC).
//!
//! The API uses `0` and negative values as "no date". Those decode to `None`
//! exactly like a missing field, so a record genuinely dated at or before the
//! epoch cannot be represented. Encoding truncates toward zero at the
//! millisecond boundary.
//!
//! Model fields using this codec should also carry
//! `skip_serializing_if = "Option::is_none"` so that an absent date is omitted
//! rather than written as `null`.

use super::scalar_text;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

const NANOS_PER_MILLI: i128 = 1_000_000;
const NANOS_PER_SEC: i128 = 1_000_000_000;

pub fn decode(value: &Value) -> Option<DateTime<Utc>> {
    let text = scalar_text(value)?;
    if text == "0" || text.starts_with('-') {
        return None;
    }
    let millis = text.parse::<f64>().ok()?;
    from_millis(millis)
}

/// Encode a date. `None` produces no value: omitting the field is up to the
/// caller.
pub fn encode(value: Option<DateTime<Utc>>) -> Option<Value> {
    value.map(|date| Value::from(to_millis(&date)))
}

/// Milliseconds between the epoch and `date`, truncated toward zero.
pub fn to_millis(date: &DateTime<Utc>) -> i64 {
    let nanos = i128::from(date.timestamp()) * NANOS_PER_SEC
        + i128::from(date.timestamp_subsec_nanos());
    // i128 division truncates toward zero; the quotient always fits in i64
    // because chrono's range is far narrower than i64 milliseconds.
    (nanos / NANOS_PER_MILLI) as i64
}

fn from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() || millis <= 0.0 {
        return None;
    }
    let micros = (millis * 1000.0).round();
    if micros >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_micros(micros as i64)
}

pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(date) => serializer.serialize_i64(to_millis(date)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(decode))
}
