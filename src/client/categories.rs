use super::request::LabelBody;
use super::{ApiRequest, FeedlyClient, FeedlyError};
use crate::models::{Category, ContentType};

impl FeedlyClient {
    // ========================================================================
    // Category Operations
    // ========================================================================

    /// The user's categories, in the order Feedly keeps them.
    pub async fn categories(&self) -> Result<Vec<Category>, FeedlyError> {
        self.execute(ApiRequest::get("categories")).await
    }

    /// Change a category's label. `id` may be a bare label or a full
    /// `user/{userId}/category/{label}` id.
    pub async fn rename_category(&self, id: &str, label: &str) -> Result<bool, FeedlyError> {
        let id = self.resolve_stream_id(ContentType::Category, id)?;
        let request = ApiRequest::post("categories")
            .segment(id)
            .json(&LabelBody { label })?;
        self.execute_status(request).await
    }

    /// Delete a category. Its feeds stay subscribed but become uncategorized.
    pub async fn delete_category(&self, id: &str) -> Result<bool, FeedlyError> {
        let id = self.resolve_stream_id(ContentType::Category, id)?;
        self.execute_status(ApiRequest::delete("categories").segment(id))
            .await
    }
}
