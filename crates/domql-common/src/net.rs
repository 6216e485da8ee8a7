//! Fetch utilities for domql.
//!
//! Provides the async [`Fetcher`] used to load documents for the `get` query
//! field. `http://` and `https://` URLs go over the network; `data:` URLs
//! are decoded locally.
//!
//! Any HTTP status is a successful fetch: a `404` page is still a document
//! and the status is reported next to it. Only transport failures and
//! unreadable bodies are errors.
use std::borrow::Cow;
use std::time::Duration;

use base64::Engine;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;

use crate::warning::warn_once;

/// Default User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [RFC 2397 § 2](https://www.rfc-editor.org/rfc/rfc2397#section-2)
/// "If <mediatype> is omitted, it defaults to text/plain;charset=US-ASCII."
const DEFAULT_DATA_MEDIA_TYPE: &str = "text/plain;charset=US-ASCII";

/// Settings for the HTTP client behind a [`Fetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Total timeout for one request, body included.
    pub timeout: Duration,
    /// Value of the `User-Agent` request header.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Error type for document fetching.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or no response arrived.
    #[error("{url} is not accessible: {source}")]
    Unreachable {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived but its body could not be read.
    #[error("{url} response is not readable as HTML: {source}")]
    Unreadable {
        /// Requested URL.
        url: String,
        /// Underlying body error.
        #[source]
        source: reqwest::Error,
    },

    /// A `data:` URL could not be decoded.
    #[error("invalid data URL: {reason}")]
    InvalidDataUrl {
        /// What was wrong with the URL.
        reason: String,
    },
}

/// A fetched document body together with its response metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Numeric HTTP status, e.g. `200`.
    pub status_code: u16,
    /// Status line text, e.g. `"200 OK"`.
    pub status_message: String,
    /// `Content-Type` header value, or `""` when absent.
    pub content_type: String,
    /// Response body, decoded as UTF-8 (lossy).
    pub body: String,
}

impl FetchedPage {
    fn ok(content_type: String, body: String) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            status_message: status_message(StatusCode::OK),
            content_type,
            body,
        }
    }
}

/// A parsed `data:` URL that can be decoded into raw bytes.
///
/// [RFC 2397](https://www.rfc-editor.org/rfc/rfc2397)
/// `data:[<mediatype>][;base64],<data>`
pub struct DataURL {
    /// The full raw `data:` URL string (e.g. `data:text/html;base64,...`).
    pub raw_data: String,
}

impl DataURL {
    /// Create a new `DataURL` from a raw data URL string.
    #[must_use]
    pub const fn new(raw_data: String) -> Self {
        Self { raw_data }
    }

    /// Media type of the payload, falling back to the RFC 2397 default.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidDataUrl`] if the URL has no comma.
    pub fn media_type(&self) -> Result<Cow<'_, str>, FetchError> {
        let (metadata, _) = self.split()?;
        let media_type = metadata.strip_suffix(";base64").unwrap_or(metadata);

        Ok(if media_type.is_empty() {
            Cow::Borrowed(DEFAULT_DATA_MEDIA_TYPE)
        } else if media_type.starts_with(';') {
            // Parameters without a type, e.g. `;charset=utf-8`
            Cow::Owned(format!("text/plain{media_type}"))
        } else {
            Cow::Borrowed(media_type)
        })
    }

    /// Decode the data URL payload into raw bytes.
    ///
    /// The payload is percent-decoded first; `;base64` payloads are then
    /// base64-decoded.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidDataUrl`] if the URL has no comma or the
    /// base64 payload is malformed.
    pub fn decode(&self) -> Result<Vec<u8>, FetchError> {
        let (metadata, data) = self.split()?;
        let data = urlencoding::decode_binary(data.as_bytes());

        if metadata.ends_with(";base64") {
            base64::engine::general_purpose::STANDARD
                .decode(data.as_ref())
                .map_err(|e| FetchError::InvalidDataUrl {
                    reason: format!("base64 decode error: {e}"),
                })
        } else {
            Ok(data.into_owned())
        }
    }

    fn split(&self) -> Result<(&str, &str), FetchError> {
        let data_url = self
            .raw_data
            .strip_prefix("data:")
            .unwrap_or(&self.raw_data);
        data_url
            .split_once(',')
            .ok_or_else(|| FetchError::InvalidDataUrl {
                reason: "missing comma".to_string(),
            })
    }
}

/// Loads documents by URL.
///
/// Holds one pooled `reqwest` client; clone it freely, clones share the
/// connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Build a fetcher from the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the TLS backend or client cannot be
    /// initialized.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }

    /// Fetch a URL and return its body with the response metadata.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Unreachable`] if the request fails,
    /// [`FetchError::Unreadable`] if the body cannot be read, or
    /// [`FetchError::InvalidDataUrl`] for a malformed `data:` URL.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        if url.starts_with("data:") {
            return fetch_data_url(url);
        }

        let response = self.client.get(url).send().await.map_err(|source| {
            tracing::warn!(url, error = %source, "request failed");
            FetchError::Unreachable {
                url: url.to_string(),
                source,
            }
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let body = response.bytes().await.map_err(|source| {
            tracing::warn!(url, error = %source, "failed to read response body");
            FetchError::Unreadable {
                url: url.to_string(),
                source,
            }
        })?;

        if !content_type.is_empty() && !content_type.contains("html") {
            warn_once(
                "fetch",
                &format!("content type '{content_type}' is not HTML, parsing it anyway"),
            );
        }

        tracing::debug!(
            url,
            status = status.as_u16(),
            bytes = body.len(),
            "fetched document"
        );

        Ok(FetchedPage {
            status_code: status.as_u16(),
            status_message: status_message(status),
            content_type,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

/// Decode a `data:` URL into a `200 OK` page.
fn fetch_data_url(url: &str) -> Result<FetchedPage, FetchError> {
    let data_url = DataURL::new(url.to_string());
    let content_type = data_url.media_type()?.into_owned();
    let bytes = data_url.decode()?;

    tracing::debug!(bytes = bytes.len(), "decoded data URL");
    Ok(FetchedPage::ok(
        content_type,
        String::from_utf8_lossy(&bytes).into_owned(),
    ))
}

/// Status line text: `"<code> <reason>"`, or just the code when the status
/// has no canonical reason phrase.
fn status_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}
