use super::{ApiRequest, FeedlyClient, FeedlyError};
use crate::opml::parse_opml;

impl FeedlyClient {
    /// Export all subscriptions as an OPML document.
    pub async fn export_opml(&self) -> Result<String, FeedlyError> {
        self.execute_text(ApiRequest::get("opml")).await
    }

    /// Import subscriptions from an OPML document.
    ///
    /// The document is parsed locally first; anything that is not well-formed
    /// OPML fails with [`FeedlyError::InvalidOpml`] without a request.
    pub async fn import_opml(&self, opml: &str) -> Result<bool, FeedlyError> {
        let feeds = parse_opml(opml)?;
        tracing::info!(feeds = feeds.len(), "Importing OPML");
        self.execute_status(ApiRequest::post("opml").xml(opml))
            .await
    }
}
