use crate::wire::{self, WireUrl};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single article as returned by the streams, entries, mixes and search
/// endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub content: Option<EntryContent>,
    #[serde(default)]
    pub summary: Option<EntryContent>,
    #[serde(default, deserialize_with = "wire::default_on_null")]
    pub unread: bool,
    #[serde(default, with = "wire::nullable_int::option")]
    pub engagement: Option<i64>,
    #[serde(default)]
    pub fingerprint: Option<String>,
    #[serde(default)]
    pub origin_id: Option<String>,
    #[serde(default)]
    pub origin: Option<Origin>,
    #[serde(default)]
    pub visual: Option<Visual>,

    #[serde(default, with = "wire::lenient_url")]
    pub canonical_url: Option<WireUrl>,
    #[serde(default, with = "wire::lenient_url")]
    pub amp_url: Option<WireUrl>,

    #[serde(
        default,
        with = "wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub crawled: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub recrawled: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub published: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub action_timestamp: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub alternate: Vec<Link>,
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub canonical: Vec<Link>,
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub enclosure: Vec<Link>,
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub tags: Vec<Label>,
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub categories: Vec<Label>,
}

impl Entry {
    /// Best link to the article on the web: canonical URL, then the first
    /// alternate link.
    pub fn link(&self) -> Option<&WireUrl> {
        self.canonical_url
            .as_ref()
            .or_else(|| self.alternate.iter().find_map(|l| l.href.as_ref()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryContent {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub direction: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, with = "wire::lenient_url")]
    pub href: Option<WireUrl>,
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
}

/// The feed an entry was published in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Origin {
    #[serde(default)]
    pub stream_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, with = "wire::lenient_url")]
    pub html_url: Option<WireUrl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visual {
    #[serde(default, with = "wire::lenient_url")]
    pub url: Option<WireUrl>,
    #[serde(default, with = "wire::nullable_int::option")]
    pub width: Option<i64>,
    #[serde(default, with = "wire::nullable_int::option")]
    pub height: Option<i64>,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// A tag or category reference embedded in an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
}
