use super::{ApiRequest, FeedlyClient, FeedlyError};
use crate::models::{ContentType, Entry, MixesOptions, MixesResponse};

impl FeedlyClient {
    /// The most engaging entries of a feed, category or tag.
    pub async fn mixes(
        &self,
        kind: ContentType,
        id: &str,
        options: &MixesOptions,
    ) -> Result<Vec<Entry>, FeedlyError> {
        let stream_id = self.resolve_stream_id(kind, id)?;
        let request = ApiRequest::get("mixes/contents")
            .query("streamId", stream_id)
            .query_opt("count", options.count)
            .query_flag("unreadOnly", options.unread_only)
            .query_opt("hours", options.hours)
            .query_date("newerThan", options.newer_than)
            .query_flag("backfill", options.backfill);
        let response: MixesResponse = self.execute(request).await?;
        Ok(response.items)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{client_for, USER_ID};
    use crate::models::{ContentType, MixesOptions};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_mixes_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/mixes/contents"))
            .and(query_param("streamId", format!("user/{USER_ID}/category/tech")))
            .and(query_param("count", "3"))
            .and(query_param("unreadOnly", "false"))
            .and(query_param("hours", "12"))
            .and(query_param("backfill", "true"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"items": [{"id": "a"}, {"id": "b"}, {"id": "c"}]}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let options = MixesOptions {
            count: Some(3),
            hours: Some(12),
            ..Default::default()
        };
        let entries = client_for(&server)
            .mixes(ContentType::Category, "tech", &options)
            .await
            .unwrap();
        assert_eq!(entries.len(), 3);
    }
}
