use super::{ApiRequest, FeedlyClient, FeedlyError};
use crate::models::{ContentType, Feed};

impl FeedlyClient {
    /// Metadata for one feed. A bare feed URL is prefixed with `feed/`.
    pub async fn feed(&self, id: &str) -> Result<Feed, FeedlyError> {
        let id = self.resolve_stream_id(ContentType::Feed, id)?;
        self.execute(ApiRequest::get("feeds").segment(id)).await
    }

    /// Metadata for several feeds in one request.
    pub async fn feeds<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<Feed>, FeedlyError> {
        let ids = self.resolve_stream_ids(ContentType::Feed, ids)?;
        let request = ApiRequest::post("feeds/.mget").json(&ids)?;
        self.execute(request).await
    }
}
