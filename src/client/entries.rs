use super::{ApiRequest, FeedlyClient, FeedlyError};
use crate::models::Entry;

impl FeedlyClient {
    /// Fetch a single entry.
    ///
    /// The endpoint answers with an array; `None` means it was empty.
    pub async fn entry(&self, id: &str) -> Result<Option<Entry>, FeedlyError> {
        let entries: Vec<Entry> = self
            .execute(ApiRequest::get("entries").segment(id))
            .await?;
        Ok(entries.into_iter().next())
    }

    /// Fetch several entries in one request. Unknown ids are simply missing
    /// from the result.
    pub async fn entries<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<Entry>, FeedlyError> {
        let ids: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
        let request = ApiRequest::post("entries/.mget").json(&ids)?;
        self.execute(request).await
    }
}
