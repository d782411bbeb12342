use super::entry::{Entry, Link};
use crate::wire;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Stream identifiers
// ============================================================================

/// What kind of stream an identifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Feed,
    Category,
    Tag,
}

/// Build a fully qualified stream id.
///
/// Feedly stream ids look like `feed/https://example.com/rss`,
/// `user/{userId}/category/{label}` or `user/{userId}/tag/{label}`. Ids that
/// already carry one of those prefixes pass through untouched; bare values are
/// qualified with the given user id.
///
/// ```
/// use feedly::models::{stream_id, ContentType};
///
/// assert_eq!(
///     stream_id(ContentType::Category, "tech", "u1"),
///     "user/u1/category/tech"
/// );
/// assert_eq!(
///     stream_id(ContentType::Feed, "https://example.com/rss", "u1"),
///     "feed/https://example.com/rss"
/// );
/// ```
pub fn stream_id(kind: ContentType, id: &str, user_id: &str) -> String {
    if id.starts_with("feed/") || id.starts_with("user/") || id.starts_with("enterprise/") {
        return id.to_owned();
    }
    match kind {
        ContentType::Feed => format!("feed/{id}"),
        ContentType::Category => format!("user/{user_id}/category/{id}"),
        ContentType::Tag => format!("user/{user_id}/tag/{id}"),
    }
}

/// Ordering of a stream page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedSorting {
    #[default]
    Newest,
    Oldest,
}

impl FeedSorting {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedSorting::Newest => "newest",
            FeedSorting::Oldest => "oldest",
        }
    }
}

// ============================================================================
// Request options
// ============================================================================

/// Paging and filtering for `streams/contents` and `streams/ids`.
///
/// Pass the `continuation` from the previous page to fetch the next one.
#[derive(Debug, Clone, Default)]
pub struct StreamOptions {
    pub count: Option<u32>,
    pub sorting: FeedSorting,
    pub unread_only: Option<bool>,
    pub newer_than: Option<DateTime<Utc>>,
    pub continuation: Option<String>,
}

impl StreamOptions {
    /// Options for the page following `continuation`, keeping the other filters.
    pub fn next_page(&self, continuation: impl Into<String>) -> Self {
        Self {
            continuation: Some(continuation.into()),
            ..self.clone()
        }
    }
}

/// Options for `mixes/contents` (most engaging entries of a stream).
#[derive(Debug, Clone)]
pub struct MixesOptions {
    pub count: Option<u32>,
    pub unread_only: bool,
    pub hours: Option<u32>,
    pub newer_than: Option<DateTime<Utc>>,
    pub backfill: bool,
}

impl Default for MixesOptions {
    fn default() -> Self {
        Self {
            count: None,
            unread_only: false,
            hours: None,
            newer_than: None,
            backfill: true,
        }
    }
}

/// Options for `search/contents`.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub newer_than: Option<DateTime<Utc>>,
    pub continuation: Option<String>,
    pub fields: Option<String>,
    pub embedded: Option<String>,
    pub engagement: Option<String>,
    pub count: Option<u32>,
    pub locale: Option<String>,
}

/// Options for `markers/counts`.
#[derive(Debug, Clone, Default)]
pub struct UnreadCountOptions {
    pub auto_refresh: bool,
    pub newer_than: Option<DateTime<Utc>>,
    pub stream_id: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// One page of `streams/contents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamEntriesResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    /// Present when more entries are available.
    #[serde(default)]
    pub continuation: Option<String>,
    #[serde(
        default,
        with = "wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub alternate: Vec<Link>,
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub items: Vec<Entry>,
}

/// One page of `streams/ids`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamIdsResponse {
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub ids: Vec<String>,
    #[serde(default)]
    pub continuation: Option<String>,
}

/// One page of `search/contents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub continuation: Option<String>,
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub items: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MixesResponse {
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub items: Vec<Entry>,
}
