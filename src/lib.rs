//! WebTools-RS: resilient web search and fetch tool calls for AI agents
//!
//! Provides `web_search` and `web_fetch` tools that contact remote providers
//! over HTTP, tolerate provider failure with ordered fallback, decode
//! stream-protocol responses, and bound result size before returning to the
//! agent. Oversized output is persisted to a temporary artifact for later
//! retrieval.

pub mod cancel;
pub mod config;
pub mod network;
pub mod output;
pub mod providers;
pub mod search;
pub mod stream;
pub mod tools;

pub use cancel::CancelScope;
pub use config::Settings;
pub use providers::{ProviderError, ProviderResult, SearchProvider};
pub use search::{FallbackSearch, SearchRequest};
pub use tools::{ContentBlock, Tool, ToolOutput};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Timeout for a single provider attempt in seconds.
///
/// Fixed per attempt; the caller's own cancellation token is the only thing
/// that shortens it.
pub const ATTEMPT_TIMEOUT_SECS: u64 = 30;

/// Timeout for a `web_fetch` retrieval in seconds
pub const FETCH_TIMEOUT_SECS: u64 = 30;
