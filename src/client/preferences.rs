use super::{ApiRequest, FeedlyClient, FeedlyError};
use std::collections::HashMap;

impl FeedlyClient {
    /// Application preferences stored for the user, as opaque key/value pairs.
    pub async fn preferences(&self) -> Result<HashMap<String, String>, FeedlyError> {
        self.execute(ApiRequest::get("preferences")).await
    }

    /// Merge `preferences` into the stored set and return the result.
    ///
    /// Feedly deletes a key when its value is the string `"==DELETE=="`.
    pub async fn update_preferences(
        &self,
        preferences: &HashMap<String, String>,
    ) -> Result<HashMap<String, String>, FeedlyError> {
        let request = ApiRequest::post("preferences").json(preferences)?;
        self.execute(request).await
    }
}
