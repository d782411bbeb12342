use super::{ApiRequest, FeedlyClient, FeedlyError};
use crate::models::Profile;
use std::collections::HashMap;

impl FeedlyClient {
    /// The authenticated user's profile.
    pub async fn profile(&self) -> Result<Profile, FeedlyError> {
        self.execute(ApiRequest::get("profile")).await
    }

    /// Update profile fields (for example `email`, `givenName`, `locale`) and
    /// return the stored profile.
    pub async fn update_profile(
        &self,
        fields: &HashMap<String, String>,
    ) -> Result<Profile, FeedlyError> {
        let request = ApiRequest::post("profile").json(fields)?;
        self.execute(request).await
    }
}
