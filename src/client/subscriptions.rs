use super::{ApiRequest, FeedlyClient, FeedlyError};
use crate::models::{Category, ContentType, Subscription};
use serde::Serialize;

#[derive(Serialize)]
struct SubscriptionBody<'a> {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    categories: &'a [Category],
}

impl FeedlyClient {
    pub async fn subscriptions(&self) -> Result<Vec<Subscription>, FeedlyError> {
        self.execute(ApiRequest::get("subscriptions")).await
    }

    /// Subscribe to a feed, or update the title and categories of an existing
    /// subscription. An empty `categories` slice leaves it uncategorized.
    pub async fn add_or_update_subscription(
        &self,
        feed_id: &str,
        categories: &[Category],
        title: Option<&str>,
    ) -> Result<bool, FeedlyError> {
        let body = SubscriptionBody {
            id: self.resolve_stream_id(ContentType::Feed, feed_id)?,
            title,
            categories,
        };
        let request = ApiRequest::post("subscriptions").json(&body)?;
        self.execute_status(request).await
    }

    pub async fn remove_subscription(&self, feed_id: &str) -> Result<bool, FeedlyError> {
        let id = self.resolve_stream_id(ContentType::Feed, feed_id)?;
        self.execute_status(ApiRequest::delete("subscriptions").segment(id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::client_for;
    use crate::models::Category;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_subscriptions_decode_categories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/subscriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{
                    "id": "feed/https://a.com/rss",
                    "title": "A",
                    "categories": [{"id": "user/u/category/tech", "label": "tech"}],
                    "added": 1367539068016,
                    "updated": -1
                }]"#,
            ))
            .mount(&server)
            .await;

        let subs = client_for(&server).subscriptions().await.unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].categories[0].label, "tech");
        assert!(subs[0].added.is_some());
        assert!(subs[0].updated.is_none());
    }

    #[tokio::test]
    async fn test_add_subscription_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/subscriptions"))
            .and(body_json(serde_json::json!({
                "id": "feed/https://a.com/rss",
                "title": "Renamed",
                "categories": [{"id": "user/u/category/tech", "label": "tech"}]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let categories = [Category::new("user/u/category/tech", "tech")];
        assert!(client_for(&server)
            .add_or_update_subscription("https://a.com/rss", &categories, Some("Renamed"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_remove_subscription() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v3/subscriptions/feed%2Fhttps:%2F%2Fa.com%2Frss"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client_for(&server)
            .remove_subscription("feed/https://a.com/rss")
            .await
            .unwrap());
    }
}
