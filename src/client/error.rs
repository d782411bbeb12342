use crate::opml::OpmlError;
use thiserror::Error;

/// Errors surfaced by [`FeedlyClient`](super::FeedlyClient) calls.
///
/// Irregular field values in a successful response are never errors: they
/// decode to documented defaults (see [`crate::wire`]). Only a body that does
/// not have the expected shape at all produces [`FeedlyError::Decode`].
#[derive(Debug, Error)]
pub enum FeedlyError {
    /// No credential is active on the session; nothing was sent.
    #[error("Not authenticated: activate a session before calling this endpoint")]
    NotAuthenticated,

    /// The API answered with a non-success status. The body is kept verbatim;
    /// 401, 403 and 429 are not told apart here.
    #[error("API error: status {status}: {body}")]
    Api { status: u16, body: String },

    /// Connection, TLS, DNS or protocol failure from the transport.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),

    #[error("Invalid UTF-8 in response")]
    InvalidUtf8,

    /// The response body could not be read as the expected type.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request body could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Insecure base URL: HTTPS required (except localhost for testing)")]
    InsecureBaseUrl,

    /// OPML rejected locally before upload.
    #[error("Invalid OPML: {0}")]
    InvalidOpml(#[from] OpmlError),
}

impl FeedlyError {
    /// HTTP status of an [`FeedlyError::Api`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            FeedlyError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 401 from the API, which usually means the token expired and
    /// the caller should refresh and re-activate the session.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
