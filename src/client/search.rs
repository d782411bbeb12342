use super::{ApiRequest, FeedlyClient, FeedlyError};
use crate::models::{ContentType, SearchFeed, SearchFeedsResponse, SearchOptions, SearchResponse};

impl FeedlyClient {
    /// Search the feed directory by title, URL or topic.
    pub async fn find_feeds(
        &self,
        query: &str,
        count: Option<u32>,
        locale: Option<&str>,
    ) -> Result<Vec<SearchFeed>, FeedlyError> {
        let request = ApiRequest::get("search/feeds")
            .query("query", query)
            .query_opt("count", count)
            .query_opt("locale", locale);
        let response: SearchFeedsResponse = self.execute(request).await?;
        Ok(response.results)
    }

    /// Full-text search inside a feed, category or tag. Pro accounts only.
    pub async fn find_entries(
        &self,
        kind: ContentType,
        id: &str,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse, FeedlyError> {
        let stream_id = self.resolve_stream_id(kind, id)?;
        let request = ApiRequest::get("search/contents")
            .query("streamId", stream_id)
            .query("query", query)
            .query_date("newerThan", options.newer_than)
            .query_opt("continuation", options.continuation.as_deref())
            .query_opt("fields", options.fields.as_deref())
            .query_opt("embedded", options.embedded.as_deref())
            .query_opt("engagement", options.engagement.as_deref())
            .query_opt("count", options.count)
            .query_opt("locale", options.locale.as_deref());
        self.execute(request).await
    }
}
