use crate::wire::{self, WireUrl};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Feed metadata from `GET /v3/feeds/{id}` and `POST /v3/feeds/.mget`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    pub id: String,
    #[serde(default)]
    pub feed_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, with = "wire::nullable_int")]
    pub subscribers: i64,
    #[serde(default)]
    pub velocity: Option<f64>,
    #[serde(default, with = "wire::nullable_int::option")]
    pub estimated_engagement: Option<i64>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, with = "wire::bool_int")]
    pub partial: bool,
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub topics: Vec<String>,
    #[serde(default, with = "wire::lenient_url")]
    pub website: Option<WireUrl>,
    #[serde(default, with = "wire::lenient_url")]
    pub icon_url: Option<WireUrl>,
    #[serde(default, with = "wire::lenient_url")]
    pub visual_url: Option<WireUrl>,
    #[serde(default, with = "wire::lenient_url")]
    pub cover_url: Option<WireUrl>,
    #[serde(
        default,
        with = "wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
}

/// One hit from `GET /v3/search/feeds`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFeed {
    pub feed_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, with = "wire::nullable_int")]
    pub subscribers: i64,
    #[serde(default)]
    pub velocity: Option<f64>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, with = "wire::nullable_int::option")]
    pub estimated_engagement: Option<i64>,
    #[serde(default, with = "wire::bool_int")]
    pub curated: bool,
    #[serde(default, with = "wire::bool_int")]
    pub featured: bool,
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub delicious_tags: Vec<String>,
    #[serde(default, with = "wire::lenient_url")]
    pub website: Option<WireUrl>,
    #[serde(default, with = "wire::lenient_url")]
    pub icon_url: Option<WireUrl>,
    #[serde(default, with = "wire::lenient_url")]
    pub visual_url: Option<WireUrl>,
    #[serde(default, with = "wire::lenient_url")]
    pub cover_url: Option<WireUrl>,
    #[serde(
        default,
        with = "wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchFeedsResponse {
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub results: Vec<SearchFeed>,
}

/// A feed the user is subscribed to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sort_id: Option<String>,
    #[serde(default)]
    pub velocity: Option<f64>,
    #[serde(default, with = "wire::nullable_int")]
    pub subscribers: i64,
    #[serde(default, with = "wire::bool_int")]
    pub partial: bool,
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub categories: Vec<Category>,
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub topics: Vec<String>,
    #[serde(default, with = "wire::lenient_url")]
    pub website: Option<WireUrl>,
    #[serde(default, with = "wire::lenient_url")]
    pub icon_url: Option<WireUrl>,
    #[serde(default, with = "wire::lenient_url")]
    pub visual_url: Option<WireUrl>,
    #[serde(default, with = "wire::lenient_url")]
    pub cover_url: Option<WireUrl>,
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
    pub added: Option<DateTime<Utc>>,
}

/// A user category (folder). Also used when assigning subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Category {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// How strongly the user follows a topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interest {
    #[default]
    Low,
    Medium,
    High,
}

impl Interest {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interest::Low => "low",
            Interest::Medium => "medium",
            Interest::High => "high",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    #[serde(default)]
    pub interest: Interest,
    #[serde(
        default,
        with = "wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
}
