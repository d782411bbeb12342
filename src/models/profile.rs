use crate::wire::{self, WireUrl};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user's profile (`GET /v3/profile`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub wave: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub subscription_status: Option<String>,
    #[serde(default, with = "wire::lenient_url")]
    pub picture: Option<WireUrl>,
    #[serde(default, with = "wire::bool_int")]
    pub evernote_connected: bool,
    #[serde(default, with = "wire::bool_int")]
    pub pocket_connected: bool,
    #[serde(default, with = "wire::bool_int")]
    pub twitter_connected: bool,
    #[serde(default, with = "wire::bool_int")]
    pub facebook_connected: bool,
    #[serde(
        default,
        with = "wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_expiration: Option<DateTime<Utc>>,
}

impl Profile {
    /// Full name if the API provided one, otherwise given and family name.
    pub fn display_name(&self) -> Option<String> {
        if let Some(full) = self.full_name.as_deref().filter(|n| !n.is_empty()) {
            return Some(full.to_owned());
        }
        match (self.given_name.as_deref(), self.family_name.as_deref()) {
            (Some(given), Some(family)) => Some(format!("{given} {family}")),
            (Some(name), None) | (None, Some(name)) => Some(name.to_owned()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_decode() {
        let json = r#"{
            "id": "c805fcbf-3acf-4302-a97e-d82f9d7c897f",
            "email": "jim.smith@gmail.com",
            "givenName": "Jim",
            "familyName": "Smith",
            "picture": "//img.example.com/jim.jpg",
            "evernoteConnected": 1,
            "pocketConnected": "0",
            "created": 1367539068016,
            "productExpiration": -1
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert!(profile.evernote_connected);
        assert!(!profile.pocket_connected);
        assert!(!profile.twitter_connected);
        assert!(profile.created.is_some());
        assert!(profile.product_expiration.is_none());
        assert_eq!(
            profile.picture.as_ref().map(WireUrl::as_str),
            Some("http://img.example.com/jim.jpg")
        );
        assert_eq!(profile.display_name().as_deref(), Some("Jim Smith"));
    }

    #[test]
    fn test_bool_flags_encode_as_integers() {
        let profile: Profile =
            serde_json::from_str(r#"{"id": "u", "twitterConnected": 1}"#).unwrap();
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["twitterConnected"], serde_json::json!(1));
        assert_eq!(value["facebookConnected"], serde_json::json!(0));
    }
}
