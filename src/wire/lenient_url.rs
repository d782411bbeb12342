//! URLs as the API actually sends them.
//!
//! Accepted forms, tried in this order (first success wins):
//!
//! 1. an absolute hierarchical URL (`https://example.com/feed`); opaque
//!    `scheme:rest` forms such as `www.example.com:8080/feed` do not count
//! 2. a schema-relative URL (`//example.com/feed`), read as `http:` + value
//! 3. a bare `www.` host (`www.example.com`), read as `http://` + value
//!
//! Anything else, including non-string values, decodes to `None`.

use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;
use std::fmt;
use std::ops::Deref;
use url::Url;

/// A URL decoded from the wire, remembering the exact text that was accepted.
///
/// Encoding writes back [`WireUrl::as_str`] rather than the normalized
/// [`Url`] serialization, so `http://Example.com` stays `http://Example.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WireUrl {
    url: Url,
    original: String,
}

impl WireUrl {
    /// Parse with the lenient prefix rules described in the module docs.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        if let Some(url) = Self::parse_absolute(raw) {
            return Some(url);
        }
        if raw.starts_with("//") {
            return Self::parse_absolute(&format!("http:{raw}"));
        }
        if raw.starts_with("www.") {
            return Self::parse_absolute(&format!("http://{raw}"));
        }
        None
    }

    /// Strict absolute parse: whitespace and control characters are not
    /// well-formed even though `Url::parse` would percent-encode them, and
    /// the URL must have a hierarchical path.
    fn parse_absolute(text: &str) -> Option<Self> {
        if text.is_empty() || text.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return None;
        }
        let url = Url::parse(text).ok()?;
        // `host:port/path` parses with the host as the scheme
        if url.cannot_be_a_base() {
            return None;
        }
        Some(Self {
            url,
            original: text.to_owned(),
        })
    }

    /// The accepted text, after any implicit scheme prefix was applied.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn into_url(self) -> Url {
        self.url
    }
}

impl Deref for WireUrl {
    type Target = Url;

    fn deref(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for WireUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

pub fn decode(value: &Value) -> Option<WireUrl> {
    match value {
        Value::String(raw) => WireUrl::parse_lenient(raw),
        _ => None,
    }
}

pub fn encode(value: Option<&WireUrl>) -> Value {
    match value {
        Some(url) => Value::String(url.original.clone()),
        None => Value::Null,
    }
}

pub fn serialize<S>(value: &Option<WireUrl>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(url) => serializer.serialize_str(&url.original),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<WireUrl>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(decode))
}
