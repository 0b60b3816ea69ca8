// Backend key-value service access.
//
// The service exposes two GET routes relative to the page (base) URL:
//   rpush/<key>/<value>  append a value, answer with the updated list
//   lrange/<key>         answer with the full list
// Both answer with a JSON array of strings.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use thiserror::Error;
use tracing::debug;

use crate::config::BackendConfig;
use crate::entry::{decode_entry_list, EntryList};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid backend url `{url}`: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("`{segment}` cannot be sent as a path segment")]
    DotSegment { segment: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to decode entry list from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// GuestbookBackend
// ---------------------------------------------------------------------------

/// The two list operations the client needs from the key-value service.
#[async_trait]
pub trait GuestbookBackend: Send + Sync {
    /// Append `value` to the list stored under `key` and return the full
    /// updated list.
    async fn append(&self, key: &str, value: &str) -> Result<EntryList, BackendError>;

    /// Return the full list stored under `key`, in stored order.
    async fn read_all(&self, key: &str) -> Result<EntryList, BackendError>;
}

// ---------------------------------------------------------------------------
// HttpBackend
// ---------------------------------------------------------------------------

/// `GuestbookBackend` over HTTP. No request timeout is set; a hung request
/// simply stays pending.
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a backend rooted at `base_url`. Route paths are resolved
    /// relative to it the way a browser resolves them against the page URL.
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let parsed = parse_base_url(base_url)?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: parsed,
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the append route. `value` becomes a single path segment, so
    /// slashes, spaces, `?`, `#` and `%` are percent-encoded. A value of `.`
    /// or `..` is rejected with `DotSegment`.
    pub fn append_url(&self, key: &str, value: &str) -> Result<Url, BackendError> {
        endpoint(&self.base_url, &["rpush", key, value])
    }

    /// URL of the read-all route.
    pub fn read_url(&self, key: &str) -> Result<Url, BackendError> {
        endpoint(&self.base_url, &["lrange", key])
    }

    async fn fetch_list(&self, url: Url) -> Result<EntryList, BackendError> {
        let url_str = url.to_string();
        debug!(url = %url_str, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| BackendError::Request {
                url: url_str.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                url: url_str,
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| BackendError::Request {
                url: url_str.clone(),
                source,
            })?;

        decode_entry_list(&body).map_err(|source| BackendError::Decode {
            url: url_str,
            source,
        })
    }
}

#[async_trait]
impl GuestbookBackend for HttpBackend {
    async fn append(&self, key: &str, value: &str) -> Result<EntryList, BackendError> {
        let url = self.append_url(key, value)?;
        self.fetch_list(url).await
    }

    async fn read_all(&self, key: &str) -> Result<EntryList, BackendError> {
        let url = self.read_url(key)?;
        self.fetch_list(url).await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse and check a base URL: absolute, http or https.
pub fn parse_base_url(base_url: &str) -> Result<Url, BackendError> {
    let invalid = |message: String| BackendError::InvalidUrl {
        url: base_url.to_string(),
        message,
    };

    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme `{other}`"))),
    }
    if url.cannot_be_a_base() {
        return Err(invalid("url cannot be used as a base".into()));
    }
    Ok(url)
}

/// Append `segments` to the directory part of `base`.
///
/// The last path segment of `base` is treated like a browser treats the
/// document name: `http://h/app/` keeps `app`, `http://h/app/index.html`
/// drops `index.html`. Query and fragment are dropped.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, BackendError> {
    // URL parsing collapses `.` and `..` segments, percent-encoded or not, so
    // they would silently vanish from the request path.
    if let Some(segment) = segments.iter().find(|s| matches!(**s, "." | "..")) {
        return Err(BackendError::DotSegment {
            segment: segment.to_string(),
        });
    }

    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
        let mut path = url.path_segments_mut().map_err(|_| BackendError::InvalidUrl {
            url: base.to_string(),
            message: "url cannot be used as a base".into(),
        })?;
        // Drop the trailing document name (or the empty segment after a
        // trailing slash).
        path.pop();
        path.extend(segments);
    }
    Ok(url)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
