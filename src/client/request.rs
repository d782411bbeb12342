use super::FeedlyError;
use crate::wire::epoch_millis;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Serialize;

/// Every Feedly endpoint lives under this version prefix.
const API_VERSION: &str = "v3";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RequestBody {
    Json(Vec<u8>),
    Text {
        content_type: &'static str,
        content: String,
    },
}

/// `{"label": ...}` body shared by the category and tag rename calls.
#[derive(Debug, Serialize)]
pub(crate) struct LabelBody<'a> {
    pub label: &'a str,
}

/// Description of one API call, turned into an HTTP request by
/// [`FeedlyClient::send`](super::FeedlyClient::send).
///
/// Path segments are stored unencoded and percent-encoded one by one when the
/// URL is built, so an id such as `feed/http://example.com/rss` stays a single
/// segment. Query parameters keep insertion order.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) segments: Vec<String>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<RequestBody>,
    pub(crate) authenticated: bool,
}

impl ApiRequest {
    /// Start a request for `/v3/{resource}`. `resource` is a fixed path such as
    /// `"markers/counts"`; dynamic ids go through [`ApiRequest::segment`].
    pub fn new(method: Method, resource: &str) -> Self {
        let segments = std::iter::once(API_VERSION)
            .chain(resource.split('/').filter(|s| !s.is_empty()))
            .map(str::to_owned)
            .collect();
        Self {
            method,
            segments,
            query: Vec::new(),
            body: None,
            authenticated: true,
        }
    }

    pub fn get(resource: &str) -> Self {
        Self::new(Method::GET, resource)
    }

    pub fn post(resource: &str) -> Self {
        Self::new(Method::POST, resource)
    }

    pub fn put(resource: &str) -> Self {
        Self::new(Method::PUT, resource)
    }

    pub fn delete(resource: &str) -> Self {
        Self::new(Method::DELETE, resource)
    }

    /// Append one path segment. Reserved characters, `/` included, are encoded.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Append a comma-joined list of ids as a single segment.
    pub fn segment_list<S: AsRef<str>>(self, ids: &[S]) -> Self {
        let joined = ids.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
        self.segment(joined)
    }

    pub fn query(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_owned(), value.to_string()));
        self
    }

    /// Add a parameter only when a value is present.
    pub fn query_opt<T: ToString>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Add a date parameter as epoch milliseconds; absent dates are omitted.
    pub fn query_date(self, name: &str, value: Option<DateTime<Utc>>) -> Self {
        let millis = epoch_millis::encode(value);
        self.query_opt(name, millis)
    }

    /// Add a boolean parameter rendered as `true` / `false`.
    pub fn query_flag(self, name: &str, value: bool) -> Self {
        self.query(name, value)
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, FeedlyError> {
        let bytes = serde_json::to_vec(body).map_err(FeedlyError::Encode)?;
        self.body = Some(RequestBody::Json(bytes));
        Ok(self)
    }

    /// Send `content` verbatim as an XML document.
    pub fn xml(mut self, content: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text {
            content_type: "text/xml",
            content: content.into(),
        });
        self
    }

    /// Send without a bearer token. Used by the token endpoint.
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Unencoded path, for logging.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}
