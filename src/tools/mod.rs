//! Agent-facing tool boundary
//!
//! Tools take structured parameters and return content blocks plus a details
//! object echoing the normalized request, suitable for inclusion in provider
//! messages as tool results.

mod web_fetch;
mod web_search;

pub use web_fetch::WebFetchTool;
pub use web_search::WebSearchTool;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// One block of tool output content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Image {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// Tool execution output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: Vec<ContentBlock>,
    /// Normalized request parameters, for observability
    pub details: Value,
}

/// A tool that can be executed by the agent.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name.
    fn name(&self) -> &str;

    /// Get the tool description.
    fn description(&self) -> &str;

    /// Get the tool parameters as JSON Schema.
    fn parameters(&self) -> Value;

    /// Execute the tool.
    ///
    /// The caller's token, when provided, aborts in-flight work; each
    /// network call still runs under its own timeout-bound scope.
    async fn execute(
        &self,
        input: Value,
        cancel: Option<&CancellationToken>,
    ) -> anyhow::Result<ToolOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_blocks_serialize_with_type_tags() {
        let text = serde_json::to_value(ContentBlock::text("hello")).unwrap();
        assert_eq!(text["type"], "text");
        assert_eq!(text["text"], "hello");

        let image = serde_json::to_value(ContentBlock::Image {
            data: "aGk=".to_string(),
            mime_type: "image/png".to_string(),
        })
        .unwrap();
        assert_eq!(image["type"], "image");
        assert_eq!(image["mimeType"], "image/png");
    }
}
