//! Web fetch tool
//!
//! Retrieves a URL and returns its content as markdown (HTML converted via
//! an external transform), raw text, or a passthrough image block. Textual
//! output is bounded like every other tool result.

use super::{ContentBlock, Tool, ToolOutput};
use crate::cancel::{CancelCause, CancelScope};
use crate::config::Settings;
use crate::network::{HttpClient, HttpError};
use crate::output;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use url::Url;

/// Requested output rendering for a fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchFormat {
    Markdown,
    Html,
}

impl FetchFormat {
    fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            None | Some("markdown") => Ok(Self::Markdown),
            Some("html") => Ok(Self::Html),
            Some(other) => bail!("invalid format '{}', expected markdown or html", other),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
        }
    }
}

/// URL retrieval with content-type-aware normalization
pub struct WebFetchTool {
    client: HttpClient,
    timeout: Duration,
}

impl WebFetchTool {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            client: HttpClient::with_settings(&settings.outgoing)?,
            timeout: Duration::from_secs(crate::FETCH_TIMEOUT_SECS),
        })
    }

    /// Override the fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Tool for WebFetchTool {
    fn name(&self) -> &str {
        "web_fetch"
    }

    fn description(&self) -> &str {
        "Fetch a URL and return its content. HTML pages are converted to \
         markdown; images are returned as-is."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The http(s) URL to fetch"
                },
                "format": {
                    "type": "string",
                    "enum": ["markdown", "html"],
                    "description": "Rendering of HTML content, defaults to markdown"
                }
            },
            "required": ["url"]
        })
    }

    async fn execute(
        &self,
        input: Value,
        cancel: Option<&CancellationToken>,
    ) -> Result<ToolOutput> {
        let raw_url = input
            .get("url")
            .and_then(|u| u.as_str())
            .context("missing required parameter: url")?;
        let url = Url::parse(raw_url.trim()).with_context(|| format!("invalid URL '{}'", raw_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("unsupported URL scheme '{}', expected http or https", url.scheme());
        }

        let format = FetchFormat::parse(input.get("format").and_then(|f| f.as_str()))?;

        info!(url = %url, format = format.as_str(), "web fetch");

        let scope = CancelScope::new(cancel, self.timeout);
        let response = match self.client.fetch(url.as_str(), &scope.token()).await {
            Ok(response) => response,
            Err(HttpError::Cancelled) => match scope.cause() {
                Some(CancelCause::Caller) => bail!("fetch cancelled"),
                _ => bail!("fetch timed out after {} seconds", self.timeout.as_secs()),
            },
            Err(HttpError::Transport(e)) => return Err(e).context("fetch failed"),
        };

        if !response.is_success() {
            bail!(
                "fetch failed with status {}: {}",
                response.status,
                response.text().trim()
            );
        }

        let content_type = response
            .content_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let details = json!({
            "url": url.as_str(),
            "final_url": response.final_url,
            "content_type": content_type,
            "format": format.as_str(),
        });

        // Binary image passthrough, no bounding.
        if content_type.starts_with("image/") {
            let mime_type = content_type
                .split(';')
                .next()
                .unwrap_or(&content_type)
                .trim()
                .to_string();
            return Ok(ToolOutput {
                content: vec![ContentBlock::Image {
                    data: BASE64.encode(&response.body),
                    mime_type,
                }],
                details,
            });
        }

        let body = response.text();
        let text = if content_type.contains("text/html") && format == FetchFormat::Markdown {
            html_to_markdown(&body)?
        } else {
            body
        };

        let bounded = output::bound_tool_output(self.name(), &text).await?;
        Ok(ToolOutput {
            content: vec![ContentBlock::text(bounded)],
            details,
        })
    }
}

/// Convert HTML to markdown. The conversion itself is an external
/// capability; script and style bodies never belong in tool output.
fn html_to_markdown(html: &str) -> Result<String> {
    let converter = htmd::HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style"])
        .build();
    converter
        .convert(html)
        .context("failed to convert HTML to markdown")
}
