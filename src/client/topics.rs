use super::{ApiRequest, FeedlyClient, FeedlyError};
use crate::models::{Interest, Topic};
use serde::Serialize;

#[derive(Serialize)]
struct TopicBody<'a> {
    id: &'a str,
    interest: Interest,
}

impl FeedlyClient {
    /// Topics the user follows.
    pub async fn topics(&self) -> Result<Vec<Topic>, FeedlyError> {
        self.execute(ApiRequest::get("topics")).await
    }

    /// Follow a topic (for example `topic/tech`) or change its interest level.
    pub async fn add_or_update_topic(
        &self,
        topic_id: &str,
        interest: Interest,
    ) -> Result<bool, FeedlyError> {
        let request = ApiRequest::post("topics").json(&TopicBody {
            id: topic_id,
            interest,
        })?;
        self.execute_status(request).await
    }

    pub async fn remove_topic(&self, topic_id: &str) -> Result<bool, FeedlyError> {
        self.execute_status(ApiRequest::delete("topics").segment(topic_id))
            .await
    }
}
