use super::{ApiRequest, FeedlyClient, FeedlyError};
use crate::models::{ContentType, StreamEntriesResponse, StreamIdsResponse, StreamOptions};

impl FeedlyClient {
    /// One page of entries from a feed, category or tag.
    ///
    /// Feed the returned `continuation` back through
    /// [`StreamOptions::next_page`] to fetch the following page.
    pub async fn stream_entries(
        &self,
        kind: ContentType,
        id: &str,
        options: &StreamOptions,
    ) -> Result<StreamEntriesResponse, FeedlyError> {
        let request = self.stream_request("streams/contents", kind, id, options)?;
        self.execute(request).await
    }

    /// One page of entry ids from a feed, category or tag.
    pub async fn stream_entry_ids(
        &self,
        kind: ContentType,
        id: &str,
        options: &StreamOptions,
    ) -> Result<StreamIdsResponse, FeedlyError> {
        let request = self.stream_request("streams/ids", kind, id, options)?;
        self.execute(request).await
    }

    fn stream_request(
        &self,
        resource: &str,
        kind: ContentType,
        id: &str,
        options: &StreamOptions,
    ) -> Result<ApiRequest, FeedlyError> {
        let stream_id = self.resolve_stream_id(kind, id)?;
        Ok(ApiRequest::get(resource)
            .query("streamId", stream_id)
            .query_opt("count", options.count)
            .query("ranked", options.sorting.as_str())
            .query_opt("unreadOnly", options.unread_only)
            .query_date("newerThan", options.newer_than)
            .query_opt("continuation", options.continuation.as_deref()))
    }
}
