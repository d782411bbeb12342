//! Counters that the API sometimes sends as `null`, as a float, or as a
//! numeric string.
//!
//! A count field decodes to `0` when it is null, missing or unparsable. An
//! integral float (`12.0`) reads as its value and a fractional one rounds to
//! the nearest integer. The [`option`] submodule keeps "no value" as `None`
//! for fields where zero would be misleading.

use super::scalar_text;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Integer value of a scalar, or `None` when it has none.
pub fn decode_option(value: &Value) -> Option<i64> {
    let text = scalar_text(value)?;
    if let Ok(n) = text.parse::<i64>() {
        return Some(n);
    }
    let f = text.parse::<f64>().ok().filter(|f| f.is_finite())?.round();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    (f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

pub fn decode(value: &Value) -> i64 {
    decode_option(value).unwrap_or_default()
}

pub fn encode(value: i64) -> Value {
    Value::from(value)
}

pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(*value)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().map(decode).unwrap_or_default())
}

/// Optional counters: null, missing and unparsable values are `None`.
pub mod option {
    use super::decode_option;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(n) => serializer.serialize_i64(*n),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(decode_option))
    }
}
