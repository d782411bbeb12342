use crate::wire;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unread counter for one stream (feed, category or tag).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCount {
    pub id: String,
    #[serde(default, with = "wire::nullable_int")]
    pub count: i64,
    #[serde(
        default,
        with = "wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UnreadCountsResponse {
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub unreadcounts: Vec<UnreadCount>,
}

/// Read and unread markers changed since a point in time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadOperations {
    /// Entries marked as read.
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub entries: Vec<String>,
    /// Entries explicitly kept unread.
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub unread: Vec<String>,
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub feeds: Vec<StreamReadOperation>,
    #[serde(default, deserialize_with = "wire::object_or_array::deserialize")]
    pub categories: Vec<StreamReadOperation>,
}

/// A whole stream marked as read up to `as_of`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamReadOperation {
    pub id: String,
    #[serde(
        default,
        with = "wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub as_of: Option<DateTime<Utc>>,
}

/// What a marker request does to its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum MarkerAction {
    MarkAsRead,
    KeepUnread,
    MarkAsSaved,
    MarkAsUnsaved,
}

/// Body of `POST /v3/markers`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MarkerRequest {
    pub action: MarkerAction,
    #[serde(rename = "type")]
    pub target: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<String>>,
    #[serde(
        with = "wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub as_of: Option<DateTime<Utc>>,
}

impl MarkerRequest {
    pub fn entries(action: MarkerAction, ids: &[&str]) -> Self {
        Self {
            action,
            target: "entries",
            entry_ids: Some(to_owned_ids(ids)),
            feed_ids: None,
            category_ids: None,
            as_of: None,
        }
    }

    pub fn feeds(ids: Vec<String>, as_of: DateTime<Utc>) -> Self {
        Self {
            action: MarkerAction::MarkAsRead,
            target: "feeds",
            entry_ids: None,
            feed_ids: Some(ids),
            category_ids: None,
            as_of: Some(as_of),
        }
    }

    pub fn categories(ids: Vec<String>, as_of: DateTime<Utc>) -> Self {
        Self {
            action: MarkerAction::MarkAsRead,
            target: "categories",
            entry_ids: None,
            feed_ids: None,
            category_ids: Some(ids),
            as_of: Some(as_of),
        }
    }
}

fn to_owned_ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| (*id).to_owned()).collect()
}
