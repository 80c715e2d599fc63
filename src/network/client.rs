//! HTTP client for contacting remote providers

use crate::config::OutgoingSettings;
use anyhow::Result;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Error surface of a single HTTP exchange.
///
/// Cancellation is separate from transport failure so callers can render a
/// timed-out attempt distinctly from backend unavailability.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request cancelled before completion")]
    Cancelled,
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Response to a remote-procedure POST
#[derive(Debug)]
pub struct RpcResponse {
    /// HTTP status code
    pub status: u16,
    /// Content type reported by the server
    pub content_type: Option<String>,
    /// Full response body as text
    pub text: String,
}

impl RpcResponse {
    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Response to a plain GET retrieval
#[derive(Debug)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// Content type reported by the server
    pub content_type: Option<String>,
    /// Response URL (after redirects)
    pub final_url: String,
    /// Raw response body
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8 text, lossy
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP client wrapper with WebTools-specific configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true)
            .build()?;

        let user_agent = settings
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("webtools-rs/{}", crate::VERSION));

        Ok(Self { client, user_agent })
    }

    /// POST a remote-procedure envelope and read the whole body as text.
    ///
    /// Accepts both structured-JSON and event-stream answers; the token
    /// aborts the exchange at either suspension point.
    pub async fn post_rpc(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &Value,
        cancel: &CancellationToken,
    ) -> Result<RpcResponse, HttpError> {
        let mut request = self
            .client
            .post(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json, text/event-stream")
            .json(body);

        for (key, value) in headers {
            request = request.header(*key, value);
        }

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(HttpError::Cancelled),
            res = request.send() => res?,
        };

        let status = response.status().as_u16();
        let content_type = header_str(response.headers(), "content-type");

        let text = tokio::select! {
            _ = cancel.cancelled() => return Err(HttpError::Cancelled),
            res = response.text() => res?,
        };

        Ok(RpcResponse {
            status,
            content_type,
            text,
        })
    }

    /// GET a URL and read the whole body as bytes.
    pub async fn fetch(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<FetchResponse, HttpError> {
        let request = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "*/*");

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(HttpError::Cancelled),
            res = request.send() => res?,
        };

        let status = response.status().as_u16();
        let content_type = header_str(response.headers(), "content-type");
        let final_url = response.url().to_string();

        let body = tokio::select! {
            _ = cancel.cancelled() => return Err(HttpError::Cancelled),
            res = response.bytes() => res?.to_vec(),
        };

        Ok(FetchResponse {
            status,
            content_type,
            final_url,
            body,
        })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

fn header_str(headers: &reqwest::header::HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}
