//! Web search tool
//!
//! Normalizes caller parameters, runs the provider fallback sequence, and
//! bounds the winning text before returning it.

use super::{ContentBlock, Tool, ToolOutput};
use crate::config::Settings;
use crate::network::HttpClient;
use crate::output;
use crate::providers;
use crate::search::{FallbackSearch, SearchRequest, TimeRange};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Web search across providers with ordered fallback
pub struct WebSearchTool {
    search: FallbackSearch,
    default_max_results: u32,
}

impl WebSearchTool {
    /// Build the tool from settings: one HTTP client, providers in
    /// configured priority order.
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = HttpClient::with_settings(&settings.outgoing)?;
        let providers = providers::from_settings(settings, &client)?;

        Ok(Self {
            search: FallbackSearch::new(providers),
            default_max_results: settings.search.default_max_results,
        })
    }

    /// Build over an explicit orchestrator (used by tests).
    pub fn with_orchestrator(search: FallbackSearch, default_max_results: u32) -> Self {
        Self {
            search,
            default_max_results,
        }
    }

    fn parse_request(&self, input: &Value) -> Result<SearchRequest> {
        let query = input
            .get("query")
            .and_then(|q| q.as_str())
            .context("missing required parameter: query")?;

        let max_results = match input.get("max_results") {
            None | Some(Value::Null) => self.default_max_results,
            Some(v) => {
                let n = v
                    .as_u64()
                    .context("max_results must be a positive integer")?;
                u32::try_from(n).unwrap_or(u32::MAX)
            }
        };

        let time_range = TimeRange::parse(
            input.get("published_after").and_then(|v| v.as_str()),
            input.get("published_before").and_then(|v| v.as_str()),
        )?;

        Ok(SearchRequest::new(query, max_results)?.with_time_range(time_range))
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web. Returns ranked results with titles, URLs, and content \
         snippets. Falls back to an alternate provider when the primary fails."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Number of results to return (1-50)"
                },
                "published_after": {
                    "type": "string",
                    "description": "Only results published on or after this date (YYYY-MM-DD)"
                },
                "published_before": {
                    "type": "string",
                    "description": "Only results published on or before this date (YYYY-MM-DD)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(
        &self,
        input: Value,
        cancel: Option<&CancellationToken>,
    ) -> Result<ToolOutput> {
        let request = self.parse_request(&input)?;
        info!(query = %request.query, max_results = request.max_results, "web search");

        let result = match self.search.execute(&request, cancel).await {
            Ok(result) => result,
            Err(err) => bail!("{}", err),
        };

        let text = output::bound_tool_output(self.name(), &result.content).await?;

        Ok(ToolOutput {
            content: vec![ContentBlock::text(text)],
            details: serde_json::to_value(&request)?,
        })
    }
}
