//! HTTP delivery of signed request bodies.
//!
//! The client never talks to the network directly: it hands the serialized
//! body, the final URL and the headers to a [`Transport`]. Retry, pooling
//! and backoff are the transport's business.

use std::collections::BTreeMap;
use std::future::Future;

/// Request headers, by name.
pub type Headers = BTreeMap<&'static str, String>;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while delivering a request.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// Any other delivery failure
    #[error("transport error: {0}")]
    Other(String),
}

/// Sends a request body and returns the raw response body.
///
/// This abstraction allows the client to be tested with canned responses.
pub trait Transport {
    /// POST `body` to `url` with the given headers.
    fn send(
        &self,
        url: &str,
        body: Vec<u8>,
        headers: &Headers,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// Configuration for [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransportConfig {
    pub fn new() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }
}

impl Transport for ReqwestTransport {
    async fn send(
        &self,
        url: &str,
        body: Vec<u8>,
        headers: &Headers,
    ) -> Result<String, TransportError> {
        let mut request = self.http.post(url).body(body);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}
