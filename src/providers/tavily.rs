//! Tavily search provider
//!
//! Calls the hosted Tavily remote tool `tavily-search` with a Bearer
//! credential. The credential is injected at construction; a missing key
//! fails before any request is issued. Tavily's payload text is already a
//! readable result block and is used as the content directly.

use super::traits::*;
use crate::network::HttpClient;
use crate::search::SearchRequest;
use async_trait::async_trait;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Hosted Tavily endpoint
pub const TAVILY_ENDPOINT: &str = "https://mcp.tavily.com/mcp/";

/// Tavily web search provider
pub struct Tavily {
    client: HttpClient,
    endpoint: String,
    api_key: Option<String>,
}

impl Tavily {
    pub fn new(client: HttpClient, api_key: Option<String>) -> Self {
        Self::with_endpoint(client, TAVILY_ENDPOINT, api_key)
    }

    /// Point the adapter at a different endpoint (used by tests).
    pub fn with_endpoint(
        client: HttpClient,
        endpoint: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        }
    }
}

#[async_trait]
impl SearchProvider for Tavily {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<ProviderResult, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::MissingCredential {
                provider: "Tavily",
                variable: "TAVILY_API_KEY",
            })?;

        let envelope = rpc_envelope(
            "tavily-search",
            json!({
                "query": request.query,
                "max_results": request.max_results,
            }),
        );
        let headers = [("Authorization", format!("Bearer {}", api_key))];

        debug!(query = %request.query, "sending tavily search");
        let response = self
            .client
            .post_rpc(&self.endpoint, &headers, &envelope, cancel)
            .await?;

        let content = extract_payload(response)?;
        Ok(ProviderResult { content })
    }
}
