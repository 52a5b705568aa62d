//! Mock transport for testing without network access.
//!
//! Serves canned response bodies keyed by the request's `meth` and records
//! every request it receives.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use super::transport::{Headers, Transport, TransportError};

/// A request as received by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub url: String,
    /// Request body as sent
    pub raw: String,
    /// Parsed request body
    pub body: Value,
    pub headers: Headers,
}

impl SentRequest {
    /// `svcReqL[0].meth`.
    pub fn method(&self) -> Option<&str> {
        self.body["svcReqL"][0]["meth"].as_str()
    }

    /// `svcReqL[0].req`.
    pub fn req(&self) -> &Value {
        &self.body["svcReqL"][0]["req"]
    }
}

/// Transport that answers from memory.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    /// Response bodies, keyed by method (`TripSearch`, ...)
    responses: HashMap<String, String>,
    sent: Arc<Mutex<Vec<SentRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests for `method` with `body`.
    pub fn with_response(mut self, method: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(method.into(), body.into());
        self
    }

    /// Load responses from a directory.
    ///
    /// Expects files named `{Method}.json` (e.g. `TripSearch.json`).
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, TransportError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            TransportError::Other(format!("failed to read mock data directory: {e}"))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                TransportError::Other(format!("failed to read directory entry: {e}"))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let method = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| TransportError::Other(format!("invalid filename: {path:?}")))?
                .to_string();

            let body = std::fs::read_to_string(&path)
                .map_err(|e| TransportError::Other(format!("failed to read {path:?}: {e}")))?;

            mock.responses.insert(method, body);
        }

        if mock.responses.is_empty() {
            return Err(TransportError::Other(format!(
                "no mock response files found in {data_dir:?}"
            )));
        }

        Ok(mock)
    }

    /// Requests received so far, oldest first.
    pub async fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().await.clone()
    }
}

impl Transport for MockTransport {
    async fn send(
        &self,
        url: &str,
        body: Vec<u8>,
        headers: &Headers,
    ) -> Result<String, TransportError> {
        let raw = String::from_utf8(body)
            .map_err(|e| TransportError::Other(format!("request body is not UTF-8: {e}")))?;
        let body: Value = serde_json::from_str(&raw)
            .map_err(|e| TransportError::Other(format!("request body is not JSON: {e}")))?;

        let request = SentRequest {
            url: url.to_string(),
            raw,
            body,
            headers: headers.clone(),
        };
        let method = request.method().unwrap_or_default().to_string();
        self.sent.lock().await.push(request);

        self.responses.get(&method).cloned().ok_or_else(|| {
            let mut available: Vec<_> = self.responses.keys().collect();
            available.sort();
            TransportError::Other(format!(
                "no mock response for method '{method}'. Available: {available:?}"
            ))
        })
    }
}
