use crate::wire;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Query parameters carried by an OAuth redirect back to the application.
///
/// All fields are optional. `error` without `code` means the user denied
/// access or authorization failed; that is an ordinary result, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticationResponse {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

impl AuthenticationResponse {
    /// True when the redirect carried an authorization code.
    pub fn is_authorized(&self) -> bool {
        self.code.is_some()
    }
}

/// Result of exchanging an authorization code or refresh token.
///
/// SEC-015: Custom Debug impl masks both tokens.
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    /// Only present for authorization-code exchanges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, with = "wire::seconds")]
    pub expires_in: Duration,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Feedly user id the token belongs to.
    #[serde(rename = "id", default)]
    pub user_id: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
}

impl std::fmt::Debug for AccessTokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenResponse")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field("user_id", &self.user_id)
            .field("scope", &self.scope)
            .field("state", &self.state)
            .field("plan", &self.plan)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_decodes_expiry_seconds() {
        let json = r#"{
            "id": "c805fcbf-3acf-4302-a97e-d82f9d7c897f",
            "access_token": "AQAA7rJ7InAiOjEsImEiOiJmZWVk",
            "refresh_token": "AQAAF4iTvPam_M4_dWheV_5NUL8E",
            "expires_in": 3920,
            "token_type": "Bearer",
            "plan": "standard",
            "state": "state.passed.in"
        }"#;
        let token: AccessTokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.user_id, "c805fcbf-3acf-4302-a97e-d82f9d7c897f");
        assert_eq!(token.expires_in, Duration::from_secs(3920));
        assert_eq!(token.token_type.as_deref(), Some("Bearer"));
        assert_eq!(token.state.as_deref(), Some("state.passed.in"));
        assert!(token.scope.is_none());
    }

    #[test]
    fn test_refresh_response_without_refresh_token() {
        let json = r#"{"id": "u1", "access_token": "tok", "expires_in": "oops"}"#;
        let token: AccessTokenResponse = serde_json::from_str(json).unwrap();
        assert!(token.refresh_token.is_none());
        assert_eq!(token.expires_in, Duration::ZERO);
    }

    #[test]
    fn test_debug_masks_tokens() {
        let token = AccessTokenResponse {
            access_token: "secret-access".to_string(),
            refresh_token: Some("secret-refresh".to_string()),
            expires_in: Duration::from_secs(60),
            token_type: None,
            user_id: "u1".to_string(),
            scope: None,
            state: None,
            plan: None,
        };
        let output = format!("{:?}", token);
        assert!(!output.contains("secret-access"));
        assert!(!output.contains("secret-refresh"));
        assert!(output.contains("[REDACTED]"));
        assert!(output.contains("u1"));
    }

    #[test]
    fn test_authentication_response_denied() {
        let denied = AuthenticationResponse {
            error: Some("access_denied".to_string()),
            ..Default::default()
        };
        assert!(!denied.is_authorized());
    }
}
