//! Exa search provider
//!
//! Calls the hosted Exa remote tool `web_search_exa`. No credential is
//! required. The payload text is itself JSON (a `results` array of ranked
//! records) and is flattened into one multi-paragraph text block, one record
//! per paragraph, order preserved as received.

use super::traits::*;
use crate::network::HttpClient;
use crate::search::SearchRequest;
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Hosted Exa endpoint
pub const EXA_ENDPOINT: &str = "https://mcp.exa.ai/mcp";

/// Exa web search provider
pub struct Exa {
    client: HttpClient,
    endpoint: String,
}

impl Exa {
    pub fn new(client: HttpClient) -> Self {
        Self::with_endpoint(client, EXA_ENDPOINT)
    }

    /// Point the adapter at a different endpoint (used by tests).
    pub fn with_endpoint(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn arguments(request: &SearchRequest) -> Value {
        let mut arguments = json!({
            "query": request.query,
            "numResults": request.max_results,
        });

        if let Some(range) = &request.time_range {
            if let Some(after) = range.after {
                arguments["startPublishedDate"] =
                    json!(after.format("%Y-%m-%dT00:00:00.000Z").to_string());
            }
            if let Some(before) = range.before {
                arguments["endPublishedDate"] =
                    json!(before.format("%Y-%m-%dT23:59:59.999Z").to_string());
            }
        }

        arguments
    }
}

#[async_trait]
impl SearchProvider for Exa {
    fn name(&self) -> &str {
        "exa"
    }

    async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<ProviderResult, ProviderError> {
        let envelope = rpc_envelope("web_search_exa", Self::arguments(request));

        debug!(query = %request.query, "sending exa search");
        let response = self
            .client
            .post_rpc(&self.endpoint, &[], &envelope, cancel)
            .await?;

        let payload = extract_payload(response)?;
        let content = flatten_results(&payload)?;

        Ok(ProviderResult { content })
    }
}

/// Flatten Exa's ranked result records into paragraphs.
///
/// Three lines per record (title, URL, optional content), blank line between
/// records. Order is preserved; the provider already ranks its output.
fn flatten_results(payload: &str) -> Result<String, ProviderError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| ProviderError::Parse(e.to_string()))?;

    let records = value
        .get("results")
        .and_then(|r| r.as_array())
        .or_else(|| value.as_array())
        .ok_or_else(|| {
            ProviderError::Parse("expected a results array in the payload".to_string())
        })?;

    let mut paragraphs = Vec::new();
    for record in records {
        let title = record
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("(untitled)");
        let url = record.get("url").and_then(|v| v.as_str()).unwrap_or("");

        let mut lines = vec![format!("Title: {}", title), format!("Url: {}", url)];

        let content = record
            .get("text")
            .or_else(|| record.get("content"))
            .or_else(|| record.get("snippet"))
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if let Some(content) = content {
            lines.push(format!("Content: {}", content));
        }

        paragraphs.push(lines.join("\n"));
    }

    if paragraphs.is_empty() {
        return Err(ProviderError::Empty);
    }

    Ok(paragraphs.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sse_body(inner: &Value) -> String {
        let envelope = json!({
            "result": {"content": [{"type": "text", "text": inner.to_string()}]}
        });
        format!(": ping\n\ndata: {}\n\n", envelope)
    }

    #[test]
    fn flattens_records_into_paragraphs() {
        let payload = json!({"results": [
            {"title": "Tokio", "url": "https://tokio.rs", "text": "An async runtime"},
            {"title": "smol", "url": "https://github.com/smol-rs/smol"},
        ]})
        .to_string();

        let text = flatten_results(&payload).unwrap();
        let paragraphs: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(
            paragraphs[0],
            "Title: Tokio\nUrl: https://tokio.rs\nContent: An async runtime"
        );
        assert_eq!(paragraphs[1], "Title: smol\nUrl: https://github.com/smol-rs/smol");
    }

    #[test]
    fn accepts_top_level_array_payload() {
        let payload = json!([{"title": "A", "url": "https://a.example"}]).to_string();
        let text = flatten_results(&payload).unwrap();
        assert!(text.starts_with("Title: A"));
    }

    #[test]
    fn empty_results_are_an_error() {
        let payload = json!({"results": []}).to_string();
        assert!(matches!(flatten_results(&payload), Err(ProviderError::Empty)));
    }

    #[test]
    fn non_json_payload_is_a_parse_error() {
        assert!(matches!(
            flatten_results("plain prose, not json"),
            Err(ProviderError::Parse(_))
        ));
    }

    #[test]
    fn arguments_carry_result_count_and_date_window() {
        let request = SearchRequest::new("rust", 10)
            .unwrap()
            .with_time_range(
                crate::search::TimeRange::parse(Some("2024-01-01"), None).unwrap(),
            );

        let arguments = Exa::arguments(&request);
        assert_eq!(arguments["numResults"], 10);
        assert_eq!(arguments["startPublishedDate"], "2024-01-01T00:00:00.000Z");
        assert!(arguments.get("endPublishedDate").is_none());
    }

    #[tokio::test]
    async fn searches_through_event_stream_response() {
        let server = MockServer::start().await;
        let inner = json!({"results": [
            {"title": "Rust async runtimes compared", "url": "https://example.com/a", "text": "tokio vs smol"},
            {"title": "State of async Rust", "url": "https://example.com/b", "text": "2024 overview"},
        ]});

        Mock::given(method("POST"))
            .and(path("/mcp"))
            .and(body_partial_json(json!({
                "method": "tools/call",
                "params": {"name": "web_search_exa", "arguments": {"query": "rust async runtimes 2024", "numResults": 10}},
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_bytes(sse_body(&inner).as_bytes()),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let provider = Exa::with_endpoint(client, format!("{}/mcp", server.uri()));
        let request = SearchRequest::new("rust async runtimes 2024", 10).unwrap();
        let cancel = CancellationToken::new();

        let result = provider.search(&request, &cancel).await.unwrap();
        assert!(result.content.contains("Title: Rust async runtimes compared"));
        assert!(result.content.contains("Url: https://example.com/b"));
        assert_eq!(result.content.split("\n\n").count(), 2);
    }

    #[tokio::test]
    async fn http_error_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let provider = Exa::with_endpoint(client, server.uri());
        let request = SearchRequest::new("rust", 5).unwrap();
        let cancel = CancellationToken::new();

        match provider.search(&request, &cancel).await {
            Err(ProviderError::Http { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "upstream unavailable");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn heartbeat_only_stream_is_empty_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(": keepalive\n\ndata: [DONE]\n\n"),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let provider = Exa::with_endpoint(client, server.uri());
        let request = SearchRequest::new("rust", 5).unwrap();
        let cancel = CancellationToken::new();

        assert!(matches!(
            provider.search(&request, &cancel).await,
            Err(ProviderError::Empty)
        ));
    }
}
