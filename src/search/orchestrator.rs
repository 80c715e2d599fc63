//! Fallback orchestration across search providers

use super::SearchRequest;
use crate::cancel::{CancelCause, CancelScope};
use crate::providers::{ProviderError, ProviderResult, SearchProvider};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Terminal outcome of a failed fallback sequence.
#[derive(Debug)]
pub enum SearchError {
    /// The caller's token was cancelled; remaining providers were not tried.
    Cancelled,
    /// Every provider failed; reasons in attempt order.
    AllProvidersFailed(Vec<(String, String)>),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cancelled => write!(f, "search cancelled by caller"),
            Self::AllProvidersFailed(failures) => {
                let summary = failures
                    .iter()
                    .map(|(name, reason)| format!("{}: {}", name, reason))
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "all search providers failed: {}", summary)
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// Sequences providers in priority order until one succeeds.
///
/// Attempts are strictly sequential: a provider is never started before the
/// previous attempt has fully resolved. Each attempt runs under its own
/// timeout-bound scope; the caller's token short-circuits the whole chain.
pub struct FallbackSearch {
    providers: Vec<Arc<dyn SearchProvider>>,
    attempt_timeout: Duration,
}

impl FallbackSearch {
    /// Create an orchestrator over providers in priority order.
    pub fn new(providers: Vec<Arc<dyn SearchProvider>>) -> Self {
        Self {
            providers,
            attempt_timeout: Duration::from_secs(crate::ATTEMPT_TIMEOUT_SECS),
        }
    }

    /// Override the per-attempt timeout.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Run the fallback sequence for one request.
    ///
    /// Returns the first provider's successful result unmodified, or one
    /// error enumerating every attempted provider's failure.
    pub async fn execute(
        &self,
        request: &SearchRequest,
        caller: Option<&CancellationToken>,
    ) -> Result<ProviderResult, SearchError> {
        let mut failures: Vec<(String, String)> = Vec::new();

        for provider in &self.providers {
            if caller.is_some_and(|t| t.is_cancelled()) {
                return Err(SearchError::Cancelled);
            }

            let scope = CancelScope::new(caller, self.attempt_timeout);
            debug!(provider = provider.name(), query = %request.query, "attempting provider");

            match provider.search(request, &scope.token()).await {
                Ok(result) => {
                    info!(
                        provider = provider.name(),
                        bytes = result.content.len(),
                        "provider succeeded"
                    );
                    return Ok(result);
                }
                Err(ProviderError::Cancelled) if scope.cause() == Some(CancelCause::Caller) => {
                    return Err(SearchError::Cancelled);
                }
                Err(ProviderError::Cancelled) => {
                    let reason =
                        format!("timed out after {} seconds", self.attempt_timeout.as_secs());
                    warn!(provider = provider.name(), "{}", reason);
                    failures.push((provider.name().to_string(), reason));
                }
                Err(err) => {
                    if scope.caller_cancelled() {
                        return Err(SearchError::Cancelled);
                    }
                    warn!(provider = provider.name(), error = %err, "provider failed");
                    failures.push((provider.name().to_string(), err.to_string()));
                }
            }
        }

        Err(SearchError::AllProvidersFailed(failures))
    }
}
