use super::request::LabelBody;
use super::{ApiRequest, FeedlyClient, FeedlyError};
use crate::models::{ContentType, Tag};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TagEntriesBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    entry_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry_ids: Option<&'a [&'a str]>,
}

impl FeedlyClient {
    // ========================================================================
    // Tag Operations
    //
    // Tag arguments accept bare labels (`"tech"`, `"global.saved"`) or full
    // `user/{userId}/tag/{label}` ids.
    // ========================================================================

    pub async fn tags(&self) -> Result<Vec<Tag>, FeedlyError> {
        self.execute(ApiRequest::get("tags")).await
    }

    /// Tag one entry with every tag in `tags`.
    pub async fn tag_entry(&self, entry_id: &str, tags: &[&str]) -> Result<bool, FeedlyError> {
        self.put_tags(
            tags,
            TagEntriesBody {
                entry_id: Some(entry_id),
                entry_ids: None,
            },
        )
        .await
    }

    /// Tag several entries with every tag in `tags`.
    pub async fn tag_entries(
        &self,
        entry_ids: &[&str],
        tags: &[&str],
    ) -> Result<bool, FeedlyError> {
        self.put_tags(
            tags,
            TagEntriesBody {
                entry_id: None,
                entry_ids: Some(entry_ids),
            },
        )
        .await
    }

    /// Change a tag's label.
    pub async fn rename_tag(&self, old_tag: &str, new_label: &str) -> Result<bool, FeedlyError> {
        let id = self.resolve_stream_id(ContentType::Tag, old_tag)?;
        let request = ApiRequest::post("tags")
            .segment(id)
            .json(&LabelBody { label: new_label })?;
        self.execute_status(request).await
    }

    /// Delete tags entirely; tagged entries lose them.
    pub async fn remove_tags(&self, tags: &[&str]) -> Result<bool, FeedlyError> {
        let tags = self.resolve_stream_ids(ContentType::Tag, tags)?;
        self.execute_status(ApiRequest::delete("tags").segment_list(&tags))
            .await
    }

    /// Remove `tags` from the given entries only.
    pub async fn untag_entries(
        &self,
        entry_ids: &[&str],
        tags: &[&str],
    ) -> Result<bool, FeedlyError> {
        let tags = self.resolve_stream_ids(ContentType::Tag, tags)?;
        let request = ApiRequest::delete("tags")
            .segment_list(&tags)
            .segment_list(entry_ids);
        self.execute_status(request).await
    }

    async fn put_tags(&self, tags: &[&str], body: TagEntriesBody<'_>) -> Result<bool, FeedlyError> {
        let tags = self.resolve_stream_ids(ContentType::Tag, tags)?;
        let request = ApiRequest::put("tags").segment_list(&tags).json(&body)?;
        self.execute_status(request).await
    }
}
