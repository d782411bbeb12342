//! OAuth2 authorization-code flow against `/v3/auth`.
//!
//! None of these calls read or write the [`Session`](super::Session): the
//! caller decides when a freshly issued token becomes active.

use crate::client::{ApiRequest, FeedlyClient, FeedlyError};
use crate::models::{AccessTokenResponse, AuthenticationResponse};
use secrecy::ExposeSecret;
use serde::Serialize;
use url::Url;

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<&'a str>,
    client_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_secret: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_uri: Option<&'a str>,
}

/// Read the query string of the redirect Feedly sent back after the user
/// approved (or refused) access.
///
/// A redirect carrying `error` instead of `code` is returned as data; only a
/// URI that cannot be parsed is an error.
///
/// ```
/// let response = feedly::parse_authentication_response("https://cb?code=abc&state=xyz").unwrap();
/// assert_eq!(response.code.as_deref(), Some("abc"));
/// assert_eq!(response.state.as_deref(), Some("xyz"));
/// assert!(response.error.is_none());
/// ```
pub fn parse_authentication_response(uri: &str) -> Result<AuthenticationResponse, FeedlyError> {
    let url = Url::parse(uri)?;
    let mut response = AuthenticationResponse::default();
    for (name, value) in url.query_pairs() {
        match name.as_ref() {
            "code" => response.code = Some(value.into_owned()),
            "state" => response.state = Some(value.into_owned()),
            "error" => response.error = Some(value.into_owned()),
            _ => {}
        }
    }
    Ok(response)
}

impl FeedlyClient {
    // ========================================================================
    // OAuth
    // ========================================================================

    /// URL to send the user to for approval.
    ///
    /// `scope` defaults to the configured scope. `state` is echoed back in the
    /// redirect and is omitted when `None`.
    pub fn authentication_url(
        &self,
        scope: Option<&str>,
        state: Option<&str>,
    ) -> Result<Url, FeedlyError> {
        let request = ApiRequest::get("auth/auth")
            .query("client_id", &self.client_id)
            .query("redirect_uri", &self.redirect_uri)
            .query("response_type", "code")
            .query("scope", scope.unwrap_or(&self.scope))
            .query_opt("state", state);
        self.endpoint_url(&request)
    }

    /// Exchange the `code` from the redirect for an access and refresh token.
    pub async fn request_access_token(
        &self,
        code: &str,
    ) -> Result<AccessTokenResponse, FeedlyError> {
        tracing::info!("Exchanging authorization code for access token");
        let body = TokenRequest {
            grant_type: "authorization_code",
            code: Some(code),
            refresh_token: None,
            client_id: &self.client_id,
            client_secret: self.client_secret.as_deref().map(|s| s.expose_secret()),
            redirect_uri: Some(&self.redirect_uri),
        };
        self.execute(self.token_request(&body)?).await
    }

    /// Obtain a new access token from a refresh token. The response carries no
    /// new refresh token.
    pub async fn request_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<AccessTokenResponse, FeedlyError> {
        tracing::info!("Refreshing access token");
        let body = TokenRequest {
            grant_type: "refresh_token",
            code: None,
            refresh_token: Some(refresh_token),
            client_id: &self.client_id,
            client_secret: self.client_secret.as_deref().map(|s| s.expose_secret()),
            redirect_uri: None,
        };
        self.execute(self.token_request(&body)?).await
    }

    /// Invalidate a refresh token. Success is judged by status alone.
    pub async fn revoke_refresh_token(&self, refresh_token: &str) -> Result<bool, FeedlyError> {
        tracing::info!("Revoking refresh token");
        let body = TokenRequest {
            grant_type: "revoke_token",
            code: None,
            refresh_token: Some(refresh_token),
            client_id: &self.client_id,
            client_secret: self.client_secret.as_deref().map(|s| s.expose_secret()),
            redirect_uri: None,
        };
        self.execute_status(self.token_request(&body)?).await
    }

    fn token_request(&self, body: &TokenRequest<'_>) -> Result<ApiRequest, FeedlyError> {
        if body.client_secret.is_none() {
            tracing::warn!(
                "No client secret configured; the token endpoint will likely reject the request"
            );
        }
        ApiRequest::post("auth/token").anonymous().json(body)
    }
}
