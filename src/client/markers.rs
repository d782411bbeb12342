use super::{ApiRequest, FeedlyClient, FeedlyError};
use crate::models::{
    ContentType, MarkerAction, MarkerRequest, ReadOperations, UnreadCount, UnreadCountOptions,
    UnreadCountsResponse,
};
use chrono::{DateTime, Utc};

impl FeedlyClient {
    // ========================================================================
    // Counters
    // ========================================================================

    /// Unread counts for every feed, category and tag, or for one stream.
    pub async fn unread_counts(
        &self,
        options: &UnreadCountOptions,
    ) -> Result<Vec<UnreadCount>, FeedlyError> {
        let stream_id = options
            .stream_id
            .as_deref()
            .map(|id| self.resolve_stream_id(ContentType::Category, id))
            .transpose()?;
        let request = ApiRequest::get("markers/counts")
            .query_opt("autorefresh", options.auto_refresh.then_some(true))
            .query_date("newerThan", options.newer_than)
            .query_opt("streamId", stream_id);
        let response: UnreadCountsResponse = self.execute(request).await?;
        Ok(response.unreadcounts)
    }

    /// Read and unread operations recorded since `newer_than`, for syncing a
    /// local cache.
    pub async fn read_operations(
        &self,
        newer_than: DateTime<Utc>,
    ) -> Result<ReadOperations, FeedlyError> {
        let request = ApiRequest::get("markers/reads").query_date("newerThan", Some(newer_than));
        self.execute(request).await
    }

    // ========================================================================
    // Entry markers
    // ========================================================================

    pub async fn mark_entries_as_read(&self, ids: &[&str]) -> Result<bool, FeedlyError> {
        self.post_marker(MarkerRequest::entries(MarkerAction::MarkAsRead, ids))
            .await
    }

    pub async fn mark_entry_as_read(&self, id: &str) -> Result<bool, FeedlyError> {
        self.mark_entries_as_read(&[id]).await
    }

    /// Undo a read marker.
    pub async fn keep_entries_as_unread(&self, ids: &[&str]) -> Result<bool, FeedlyError> {
        self.post_marker(MarkerRequest::entries(MarkerAction::KeepUnread, ids))
            .await
    }

    pub async fn keep_entry_as_unread(&self, id: &str) -> Result<bool, FeedlyError> {
        self.keep_entries_as_unread(&[id]).await
    }

    /// Add entries to "saved for later".
    pub async fn mark_entries_as_saved(&self, ids: &[&str]) -> Result<bool, FeedlyError> {
        self.post_marker(MarkerRequest::entries(MarkerAction::MarkAsSaved, ids))
            .await
    }

    pub async fn mark_entry_as_saved(&self, id: &str) -> Result<bool, FeedlyError> {
        self.mark_entries_as_saved(&[id]).await
    }

    pub async fn mark_entries_as_unsaved(&self, ids: &[&str]) -> Result<bool, FeedlyError> {
        self.post_marker(MarkerRequest::entries(MarkerAction::MarkAsUnsaved, ids))
            .await
    }

    pub async fn mark_entry_as_unsaved(&self, id: &str) -> Result<bool, FeedlyError> {
        self.mark_entries_as_unsaved(&[id]).await
    }

    // ========================================================================
    // Stream markers
    // ========================================================================

    /// Mark everything in the given feeds as read, up to now. Bare feed URLs
    /// get the `feed/` prefix.
    pub async fn mark_feeds_as_read(&self, ids: &[&str]) -> Result<bool, FeedlyError> {
        let ids = self.resolve_stream_ids(ContentType::Feed, ids)?;
        self.post_marker(MarkerRequest::feeds(ids, Utc::now())).await
    }

    pub async fn mark_feed_as_read(&self, id: &str) -> Result<bool, FeedlyError> {
        self.mark_feeds_as_read(&[id]).await
    }

    /// Mark everything in the given categories as read, up to now. Bare labels
    /// are qualified with the session's user id.
    pub async fn mark_categories_as_read(&self, ids: &[&str]) -> Result<bool, FeedlyError> {
        let ids = self.resolve_stream_ids(ContentType::Category, ids)?;
        self.post_marker(MarkerRequest::categories(ids, Utc::now()))
            .await
    }

    pub async fn mark_category_as_read(&self, id: &str) -> Result<bool, FeedlyError> {
        self.mark_categories_as_read(&[id]).await
    }

    async fn post_marker(&self, marker: MarkerRequest) -> Result<bool, FeedlyError> {
        let request = ApiRequest::post("markers").json(&marker)?;
        self.execute_status(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{client_for, USER_ID};
    use crate::models::UnreadCountOptions;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_unread_counts_with_stream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/markers/counts"))
            .and(query_param("autorefresh", "true"))
            .and(query_param("streamId", format!("user/{USER_ID}/category/global.all")))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"unreadcounts": [{"id": "user/u/category/global.all", "count": 7, "updated": 1420070400000}]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let options = UnreadCountOptions {
            auto_refresh: true,
            stream_id: Some("global.all".to_string()),
            ..Default::default()
        };
        let counts = client_for(&server).unread_counts(&options).await.unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].count, 7);
    }

    #[tokio::test]
    async fn test_unread_counts_omits_unset_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/markers/counts"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"unreadcounts": []}"#))
            .mount(&server)
            .await;

        let counts = client_for(&server)
            .unread_counts(&UnreadCountOptions::default())
            .await
            .unwrap();
        assert!(counts.is_empty());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_read_operations_newer_than_millis() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/markers/reads"))
            .and(query_param("newerThan", "1420070400000"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"entries": ["e1"]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let since = Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap();
        let ops = client_for(&server).read_operations(since).await.unwrap();
        assert_eq!(ops.entries, vec!["e1".to_string()]);
    }

    #[tokio::test]
    async fn test_keep_entry_as_unread_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/markers"))
            .and(body_json(serde_json::json!({
                "action": "keepUnread",
                "type": "entries",
                "entryIds": ["e1"]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client_for(&server).keep_entry_as_unread("e1").await.unwrap());
    }

    #[tokio::test]
    async fn test_mark_entries_as_saved_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/markers"))
            .and(body_json(serde_json::json!({
                "action": "markAsSaved",
                "type": "entries",
                "entryIds": ["e1", "e2"]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client_for(&server)
            .mark_entries_as_saved(&["e1", "e2"])
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_mark_category_as_read_qualifies_and_stamps() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/markers"))
            .and(body_partial_json(serde_json::json!({
                "action": "markAsRead",
                "type": "categories",
                "categoryIds": [format!("user/{USER_ID}/category/tech")]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client_for(&server)
            .mark_category_as_read("tech")
            .await
            .unwrap());

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body["asOf"].as_i64().unwrap() > 1_420_070_400_000);
    }

    #[tokio::test]
    async fn test_mark_feed_as_read() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/markers"))
            .and(body_partial_json(serde_json::json!({
                "type": "feeds",
                "feedIds": ["feed/x"]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client_for(&server).mark_feed_as_read("feed/x").await.unwrap());
    }

    #[tokio::test]
    async fn test_mark_feeds_as_read_qualifies_bare_urls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/markers"))
            .and(body_partial_json(serde_json::json!({
                "type": "feeds",
                "feedIds": ["feed/https://blog.example.com/rss", "feed/x"]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client_for(&server)
            .mark_feeds_as_read(&["https://blog.example.com/rss", "feed/x"])
            .await
            .unwrap());
    }
}
