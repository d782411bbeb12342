//! Typed client for the Feedly Cloud API.
//!
//! [`FeedlyClient`] owns the HTTP transport and a shared [`Session`]. Each
//! endpoint group lives in its own file as a separate `impl FeedlyClient`
//! block; all of them funnel through [`FeedlyClient::send`], which enforces
//! authentication, the request timeout and the response size cap.

mod categories;
mod entries;
mod error;
mod feeds;
mod markers;
mod mixes;
mod opml;
mod preferences;
mod profile;
mod request;
mod search;
mod streams;
mod subscriptions;
mod tags;
mod topics;

pub use error::FeedlyError;
pub use request::ApiRequest;

use crate::auth::Session;
use crate::config::Config;
use crate::models::{stream_id, ContentType};
use futures::StreamExt;
use request::RequestBody;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Upper bound on a response body. Large stream pages and OPML exports stay
/// well below this.
const MAX_RESPONSE_SIZE: usize = 10 * 1024 * 1024; // 10MB

const USER_AGENT: &str = concat!("feedly-rs/", env!("CARGO_PKG_VERSION"));

/// Client for one Feedly host.
///
/// Cloning is cheap: clones share the connection pool and the session.
#[derive(Debug, Clone)]
pub struct FeedlyClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
    pub(crate) client_id: String,
    pub(crate) client_secret: Option<Arc<SecretString>>,
    pub(crate) redirect_uri: String,
    pub(crate) scope: String,
    timeout: Duration,
}

impl FeedlyClient {
    /// Build a client from configuration, sharing `session` with the caller.
    ///
    /// # Errors
    ///
    /// - [`FeedlyError::InvalidUrl`] if `base_url` does not parse
    /// - [`FeedlyError::InsecureBaseUrl`] if it is not HTTPS and not localhost
    /// - [`FeedlyError::Network`] if the TLS backend cannot be initialized
    pub fn new(config: &Config, session: Session) -> Result<Self, FeedlyError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(FeedlyError::Network)?;
        Self::with_http_client(http, config, session)
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_http_client(
        http: reqwest::Client,
        config: &Config,
        session: Session,
    ) -> Result<Self, FeedlyError> {
        let base_url = validate_base_url(&config.base_url)?;
        Ok(Self {
            http,
            base_url,
            session,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret().map(Arc::new),
            redirect_uri: config.redirect_uri.clone(),
            scope: config.scope.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    /// The session this client reads its credential from.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Install a token on the shared session.
    pub fn activate(&self, access_token: impl Into<String>, user_id: impl Into<String>) {
        self.session.activate(access_token, user_id);
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ========================================================================
    // Pipeline
    // ========================================================================

    /// Issue `request` and return the raw response body.
    ///
    /// Exactly one HTTP request is made; there is no retry. Non-success
    /// statuses become [`FeedlyError::Api`] with the body kept verbatim.
    pub async fn send(&self, request: ApiRequest) -> Result<Vec<u8>, FeedlyError> {
        let credential = if request.authenticated {
            match self.session.credential() {
                Some(credential) => Some(credential),
                None => {
                    tracing::debug!(
                        path = %request.path(),
                        "No active credential, request not sent"
                    );
                    return Err(FeedlyError::NotAuthenticated);
                }
            }
        } else {
            None
        };

        let url = self.endpoint_url(&request)?;
        let method = request.method.clone();
        let path = request.path();

        let mut builder = self.http.request(method.clone(), url);
        if let Some(credential) = &credential {
            builder = builder.bearer_auth(credential.access_token.expose_secret());
        }
        builder = match request.body {
            Some(RequestBody::Json(bytes)) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(bytes),
            Some(RequestBody::Text {
                content_type,
                content,
            }) => builder.header(CONTENT_TYPE, content_type).body(content),
            None => builder,
        };

        tracing::debug!(method = %method, path = %path, "Sending Feedly API request");

        // The deadline covers the body as well as the headers
        let exchange = async {
            let response = builder.send().await.map_err(FeedlyError::Network)?;
            let status = response.status();
            let body = if status.is_success() {
                read_limited_bytes(response, MAX_RESPONSE_SIZE).await?
            } else {
                read_truncated_bytes(response, MAX_RESPONSE_SIZE).await?
            };
            Ok::<_, FeedlyError>((status, body))
        };
        let (status, body) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| FeedlyError::Timeout)??;

        if !status.is_success() {
            tracing::warn!(
                method = %method,
                path = %path,
                status = status.as_u16(),
                "Feedly API returned an error status"
            );
            return Err(FeedlyError::Api {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        tracing::trace!(path = %path, bytes = body.len(), "Feedly API response received");
        Ok(body)
    }

    /// Issue `request` and decode the JSON body as `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, FeedlyError> {
        let body = self.send(request).await?;
        serde_json::from_slice(&body).map_err(FeedlyError::Decode)
    }

    /// Issue `request`; any success status is `true` whatever the body holds.
    pub async fn execute_status(&self, request: ApiRequest) -> Result<bool, FeedlyError> {
        self.send(request).await.map(|_| true)
    }

    /// Issue `request` and return the body as text.
    pub async fn execute_text(&self, request: ApiRequest) -> Result<String, FeedlyError> {
        let body = self.send(request).await?;
        String::from_utf8(body).map_err(|_| FeedlyError::InvalidUtf8)
    }

    pub(crate) fn endpoint_url(&self, request: &ApiRequest) -> Result<Url, FeedlyError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FeedlyError::InvalidUrl(url::ParseError::RelativeUrlWithoutBase))?
            .pop_if_empty()
            .extend(&request.segments);
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .query
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            );
        }
        Ok(url)
    }

    /// Qualify a bare category or tag label with the session's user id.
    ///
    /// Already-qualified ids need no session. A bare label without an active
    /// session fails with [`FeedlyError::NotAuthenticated`], the same error the
    /// call itself would produce.
    pub(crate) fn resolve_stream_id(
        &self,
        kind: ContentType,
        id: &str,
    ) -> Result<String, FeedlyError> {
        let qualified =
            id.starts_with("feed/") || id.starts_with("user/") || id.starts_with("enterprise/");
        if qualified || kind == ContentType::Feed {
            return Ok(stream_id(kind, id, ""));
        }
        let user_id = self.session.user_id().ok_or(FeedlyError::NotAuthenticated)?;
        Ok(stream_id(kind, id, &user_id))
    }

    pub(crate) fn resolve_stream_ids<S: AsRef<str>>(
        &self,
        kind: ContentType,
        ids: &[S],
    ) -> Result<Vec<String>, FeedlyError> {
        ids.iter()
            .map(|id| self.resolve_stream_id(kind, id.as_ref()))
            .collect()
    }
}

/// SEC-002: Enforce HTTPS for the API host so the bearer token is never sent
/// in clear. Plain HTTP is allowed only for localhost/127.0.0.1 (testing).
fn validate_base_url(raw: &str) -> Result<Url, FeedlyError> {
    let url = Url::parse(raw)?;
    if url.scheme() != "https" {
        let is_localhost = url.scheme() == "http"
            && matches!(url.host_str(), Some("localhost") | Some("127.0.0.1"));
        if !is_localhost {
            tracing::error!(
                base_url = %raw,
                "Rejecting non-HTTPS base URL (HTTPS required except for localhost)"
            );
            return Err(FeedlyError::InsecureBaseUrl);
        }
        tracing::warn!(base_url = %raw, "Using non-HTTPS Feedly base URL (localhost only)");
    }
    Ok(url)
}

/// Read a response body, stopping once `limit` bytes are exceeded.
async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FeedlyError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(FeedlyError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FeedlyError::Network)?;
        // SEC-003: Use saturating_add to prevent integer overflow in size check
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FeedlyError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

/// Read at most `limit` bytes of an error body, dropping the rest so the
/// status still reaches the caller.
async fn read_truncated_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FeedlyError> {
    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FeedlyError::Network)?;
        let room = limit - bytes.len();
        if chunk.len() >= room {
            bytes.extend_from_slice(&chunk[..room]);
            tracing::debug!(limit, "Error response body truncated");
            break;
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use wiremock::MockServer;

    pub const USER_ID: &str = "c805fcbf-3acf-4302-a97e-d82f9d7c897f";

    /// Client pointed at `server` with an active session.
    pub fn client_for(server: &MockServer) -> FeedlyClient {
        let config = Config {
            client_id: "sandbox".to_string(),
            base_url: server.uri(),
            ..Config::default()
        };
        FeedlyClient::new(&config, Session::with_credential("test-token", USER_ID)).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{client_for, USER_ID};
    use super::*;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_with_base(base_url: &str) -> Config {
        Config {
            base_url: base_url.to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_https_base_url_accepted() {
        let client =
            FeedlyClient::new(&config_with_base("https://cloud.feedly.com"), Session::new());
        assert!(client.is_ok());
    }

    #[test]
    fn test_insecure_base_url_rejected() {
        let result =
            FeedlyClient::new(&config_with_base("http://evil.example.com"), Session::new());
        assert!(matches!(result, Err(FeedlyError::InsecureBaseUrl)));
    }

    #[test]
    fn test_localhost_http_allowed() {
        for base in ["http://127.0.0.1:8080", "http://localhost:8080"] {
            assert!(FeedlyClient::new(&config_with_base(base), Session::new()).is_ok());
        }
    }

    #[test]
    fn test_unparsable_base_url() {
        let result = FeedlyClient::new(&config_with_base("not a url"), Session::new());
        assert!(matches!(result, Err(FeedlyError::InvalidUrl(_))));
    }

    #[test]
    fn test_endpoint_url_encodes_id_segments() {
        let client =
            FeedlyClient::new(&config_with_base("https://cloud.feedly.com"), Session::new())
                .unwrap();
        let request = ApiRequest::get("feeds")
            .segment("feed/http://example.com/rss")
            .query("count", 5);
        let url = client.endpoint_url(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "https://cloud.feedly.com/v3/feeds/feed%2Fhttp:%2F%2Fexample.com%2Frss?count=5"
        );
    }

    #[test]
    fn test_resolve_stream_id() {
        let client = FeedlyClient::new(
            &config_with_base("https://cloud.feedly.com"),
            Session::with_credential("t", "u1"),
        )
        .unwrap();
        assert_eq!(
            client.resolve_stream_id(ContentType::Category, "tech").unwrap(),
            "user/u1/category/tech"
        );
        assert_eq!(
            client.resolve_stream_id(ContentType::Tag, "user/u2/tag/x").unwrap(),
            "user/u2/tag/x"
        );
    }

    #[test]
    fn test_resolve_bare_label_without_session() {
        let client =
            FeedlyClient::new(&config_with_base("https://cloud.feedly.com"), Session::new())
                .unwrap();
        assert!(matches!(
            client.resolve_stream_id(ContentType::Tag, "global.saved"),
            Err(FeedlyError::NotAuthenticated)
        ));
        assert_eq!(
            client.resolve_stream_id(ContentType::Feed, "https://a.com/rss").unwrap(),
            "feed/https://a.com/rss"
        );
    }

    #[tokio::test]
    async fn test_send_attaches_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/profile"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"x"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body = client.send(ApiRequest::get("profile")).await.unwrap();
        assert_eq!(body, br#"{"id":"x"}"#);
    }

    #[tokio::test]
    async fn test_send_without_credential_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.session().deactivate();
        let result = client.send(ApiRequest::get("profile")).await;
        assert!(matches!(result, Err(FeedlyError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_anonymous_request_has_no_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/auth/token"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.session().deactivate();
        assert!(client
            .execute_status(ApiRequest::post("auth/token").anonymous())
            .await
            .unwrap());

        let requests = server.received_requests().await.unwrap();
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_error_status_keeps_body_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.send(ApiRequest::get("profile")).await.unwrap_err();
        match err {
            FeedlyError::Api { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "slow down");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_execute_status_ignores_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client
            .execute_status(ApiRequest::delete("topics").segment("x"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_execute_decode_error_on_wrong_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[1, 2, 3]"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result: Result<crate::models::Profile, _> =
            client.execute(ApiRequest::get("profile")).await;
        assert!(matches!(result, Err(FeedlyError::Decode(_))));
    }

    #[tokio::test]
    async fn test_json_body_sent_with_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/entries/.mget"))
            .and(header("content-type", "application/json"))
            .and(body_string(r#"["e1"]"#))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = ApiRequest::post("entries/.mget").json(&["e1"]).unwrap();
        let entries: Vec<crate::models::Entry> = client.execute(request).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_query_parameters_reach_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/streams/ids"))
            .and(query_param("streamId", format!("user/{USER_ID}/category/global.all")))
            .and(query_param("count", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ids":[]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = ApiRequest::get("streams/ids")
            .query("streamId", format!("user/{USER_ID}/category/global.all"))
            .query("count", 20);
        client.send(request).await.unwrap();
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let config = Config {
            base_url: server.uri(),
            request_timeout_secs: 1,
            ..Config::default()
        };
        let client = FeedlyClient::new(&config, Session::with_credential("t", "u")).unwrap();
        let result = client.send(ApiRequest::get("profile")).await;
        assert!(matches!(result, Err(FeedlyError::Timeout)));
    }

    #[tokio::test]
    async fn test_response_too_large() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_bytes(vec![b'a'; MAX_RESPONSE_SIZE + 1]),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.send(ApiRequest::get("opml")).await;
        assert!(matches!(result, Err(FeedlyError::ResponseTooLarge(_))));
    }

    #[tokio::test]
    async fn test_oversized_error_body_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(500).set_body_bytes(vec![b'e'; MAX_RESPONSE_SIZE + 1]),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        match client.send(ApiRequest::get("opml")).await {
            Err(FeedlyError::Api { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body.len(), MAX_RESPONSE_SIZE);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_covers_stalled_body() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // Headers arrive at once, then the body never finishes
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"id\"")
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let config = Config {
            base_url: format!("http://127.0.0.1:{}", addr.port()),
            request_timeout_secs: 1,
            ..Config::default()
        };
        let client = FeedlyClient::new(&config, Session::with_credential("t", "u")).unwrap();
        let result = client.send(ApiRequest::get("profile")).await;
        assert!(matches!(result, Err(FeedlyError::Timeout)));
    }

    #[tokio::test]
    async fn test_execute_text_rejects_invalid_utf8() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfe]))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.execute_text(ApiRequest::get("opml")).await;
        assert!(matches!(result, Err(FeedlyError::InvalidUtf8)));
    }
}
