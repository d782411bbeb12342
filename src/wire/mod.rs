//! Converters for the irregular value encodings used by the Feedly API.
//!
//! The API is inconsistent about how it encodes scalars: booleans arrive as
//! `0`/`1`, durations as floating-point seconds, dates as epoch milliseconds
//! where `0` and negative values mean "no date", counters may be `null` or
//! floats, URLs may be schema-relative or bare hosts, and some collections are
//! sometimes an array and sometimes an object keyed by id.
//!
//! Each submodule handles exactly one of these encodings and exposes:
//!
//! - `decode(&Value) -> T`: total, never fails; malformed input yields the
//!   documented default
//! - `encode(T) -> Value`: the wire form (where write-back is supported)
//! - `serialize` / `deserialize`, so a model field selects its codec with
//!   `#[serde(with = "crate::wire::<codec>")]`
//!
//! # Example
//!
//! ```
//! use feedly::wire::{bool_int, epoch_millis};
//! use serde_json::json;
//!
//! assert!(bool_int::decode(&json!(1)));
//! assert!(!bool_int::decode(&json!(null)));
//! assert!(epoch_millis::decode(&json!(0)).is_none());
//! ```

pub mod bool_int;
pub mod epoch_millis;
pub mod lenient_url;
pub mod nullable_int;
pub mod object_or_array;
pub mod seconds;

pub use lenient_url::WireUrl;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::borrow::Cow;

/// Largest magnitude at which every integer is exactly representable in an f64.
const MAX_EXACT_F64_INT: f64 = 9_007_199_254_740_992.0; // 2^53

/// Render a scalar wire value as text.
///
/// Strings are returned as-is, integral numbers without a fractional part
/// (so `1.0` reads as `"1"`), other numbers in their shortest form, and
/// booleans as `true`/`false`. Null, arrays and objects have no text.
pub fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                return Some(Cow::Owned(n.to_string()));
            }
            let f = n.as_f64()?;
            if f.fract() == 0.0 && f.abs() < MAX_EXACT_F64_INT {
                Some(Cow::Owned(format!("{}", f as i64)))
            } else {
                Some(Cow::Owned(n.to_string()))
            }
        }
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Deserialize a plain value, reading an explicit `null` as `T::default()`.
///
/// `#[serde(default)]` only covers a missing key; fields the API sometimes
/// sends as `null` use this as well.
pub fn default_on_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
