//! Collections that arrive either as a JSON array of `T` or as a JSON object
//! whose property values are each a `T`.
//!
//! Both shapes normalize to the same ordered `Vec<T>`. For objects the values
//! are taken in encounter order (serde_json is built with `preserve_order`)
//! and the property names are discarded. `null`, a bare string, or any other
//! scalar decodes to an empty collection: "absent" and "zero items" are not
//! distinguished.
//!
//! Only decoding is supported. Models that derive `Serialize` write the
//! normalized `Vec` back out as a plain array.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Normalize `raw` into a sequence, decoding each element with `decode_element`.
///
/// Elements for which `decode_element` returns `None` are skipped.
pub fn normalize<T, F>(raw: &Value, mut decode_element: F) -> Vec<T>
where
    F: FnMut(&Value) -> Option<T>,
{
    match raw {
        Value::Array(items) => items.iter().filter_map(&mut decode_element).collect(),
        Value::Object(map) => map.values().filter_map(&mut decode_element).collect(),
        _ => Vec::new(),
    }
}

/// Element decoder that runs `T`'s own `Deserialize` impl, logging and
/// skipping values that do not fit.
pub fn decode_element<T>(value: &Value) -> Option<T>
where
    T: DeserializeOwned,
{
    match T::deserialize(value) {
        Ok(item) => Some(item),
        Err(e) => {
            tracing::debug!(
                error = %e,
                element_type = std::any::type_name::<T>(),
                "Skipping collection element that does not match its declared shape"
            );
            None
        }
    }
}

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .map(|value| normalize(value, decode_element::<T>))
        .unwrap_or_default())
}
