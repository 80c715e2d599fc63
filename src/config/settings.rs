//! Settings structures for WebTools-RS configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
    pub credentials: Credentials,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    ///
    /// `WEBTOOLS_*` variables override non-secret settings; provider
    /// credentials come from their conventional variable names. This is the
    /// only place the process environment is read.
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("WEBTOOLS_PROVIDERS") {
            let providers: Vec<String> = val
                .split(',')
                .map(|s| s.trim().to_ascii_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
            if !providers.is_empty() {
                self.search.providers = providers;
            }
        }
        if let Ok(val) = std::env::var("WEBTOOLS_MAX_RESULTS") {
            if let Ok(n) = val.parse() {
                self.search.default_max_results = n;
            }
        }
        if let Ok(val) = std::env::var("WEBTOOLS_REQUEST_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.outgoing.request_timeout = secs;
            }
        }
        if let Ok(val) = std::env::var("WEBTOOLS_USER_AGENT") {
            self.outgoing.user_agent = Some(val);
        }
        if let Ok(val) = std::env::var("TAVILY_API_KEY") {
            if !val.trim().is_empty() {
                self.credentials.tavily_api_key = Some(val);
            }
        }
    }
}

/// Search pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Provider fallback order, first entry tried first
    pub providers: Vec<String>,
    /// Result count used when the caller does not pass one
    pub default_max_results: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            providers: vec!["exa".to_string(), "tavily".to_string()],
            default_max_results: 8,
        }
    }
}

/// Outgoing HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Whole-request timeout in seconds at the HTTP client level
    pub request_timeout: f64,
    /// Connection pool size per host
    pub pool_maxsize: usize,
    /// Override for the default user agent
    pub user_agent: Option<String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 60.0,
            pool_maxsize: 10,
            user_agent: None,
        }
    }
}

/// Provider credentials
///
/// Injected into adapters at construction; absence is reported when the
/// provider is actually used, not at load time.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub tavily_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "tavily_api_key",
                &self.tavily_api_key.as_deref().map(mask_key),
            )
            .finish()
    }
}

fn mask_key(key: &str) -> String {
    if key.len() > 8 {
        format!("{}...", &key[..8])
    } else {
        "***".to_string()
    }
}
