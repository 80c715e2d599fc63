//! Provider trait and shared types

use crate::network::{HttpError, RpcResponse};
use crate::search::SearchRequest;
use crate::stream;
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

/// The single normalized payload a provider produced.
///
/// Providers flatten their native result shape into one text block before
/// returning; an empty payload is an error, never a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResult {
    pub content: String,
}

/// Failure of a single provider attempt
#[derive(Debug)]
pub enum ProviderError {
    /// A required credential is not configured; reported before any request
    /// is issued.
    MissingCredential { provider: &'static str, variable: &'static str },
    /// Non-success HTTP status, with the error body
    Http { status: u16, body: String },
    /// Network-level failure
    Network(String),
    /// The response body did not decode into a usable payload
    Parse(String),
    /// The provider answered but produced no results
    Empty,
    /// The derived cancellation token fired mid-exchange
    Cancelled,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredential { provider, variable } => {
                write!(f, "{} API key not configured (set {})", provider, variable)
            }
            Self::Http { status, body } => {
                write!(f, "HTTP error {}: {}", status, body)
            }
            Self::Network(msg) => write!(f, "network error: {}", msg),
            Self::Parse(msg) => write!(f, "failed to parse response: {}", msg),
            Self::Empty => write!(f, "no results returned"),
            Self::Cancelled => write!(f, "request cancelled"),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<HttpError> for ProviderError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Cancelled => Self::Cancelled,
            HttpError::Transport(e) => Self::Network(e.to_string()),
        }
    }
}

/// Main trait that all search providers implement
///
/// One operation; the orchestrator holds an ordered list of
/// `Arc<dyn SearchProvider>` and is agnostic to which backend it calls.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name, used in logs and aggregated failure messages
    fn name(&self) -> &str;

    /// Run one search attempt under the given derived token.
    async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<ProviderResult, ProviderError>;
}

/// Build the remote-procedure envelope naming a remote tool and its
/// arguments.
pub(crate) fn rpc_envelope(tool: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": {
            "name": tool,
            "arguments": arguments,
        },
    })
}

/// Decode an RPC response into its text payload.
///
/// Non-success status carries the error body; a body that decodes to
/// nothing, or to whitespace only, is an explicit empty-result error so the
/// orchestrator knows to try the next provider.
pub(crate) fn extract_payload(response: RpcResponse) -> Result<String, ProviderError> {
    if !response.is_success() {
        return Err(ProviderError::Http {
            status: response.status,
            body: response.text,
        });
    }

    match stream::decode_body(response.content_type.as_deref(), &response.text) {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ProviderError::Empty),
    }
}
