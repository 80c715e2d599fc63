//! Search provider adapters
//!
//! Defines the SearchProvider trait and one adapter per remote backend. The
//! orchestrator treats all adapters identically through the trait.

mod traits;

// Provider implementations
pub mod exa;
pub mod tavily;

pub use exa::Exa;
pub use tavily::Tavily;
pub use traits::*;

use crate::config::Settings;
use crate::network::HttpClient;
use anyhow::{bail, Result};
use std::sync::Arc;

/// Build the provider chain in configured priority order.
pub fn from_settings(settings: &Settings, client: &HttpClient) -> Result<Vec<Arc<dyn SearchProvider>>> {
    let mut providers: Vec<Arc<dyn SearchProvider>> = Vec::new();

    for name in &settings.search.providers {
        match name.as_str() {
            "exa" => providers.push(Arc::new(Exa::new(client.clone()))),
            "tavily" => providers.push(Arc::new(Tavily::new(
                client.clone(),
                settings.credentials.tavily_api_key.clone(),
            ))),
            other => bail!("unknown search provider '{}'. Supported: exa, tavily", other),
        }
    }

    if providers.is_empty() {
        bail!("no search providers configured");
    }

    Ok(providers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_chain_in_configured_order() {
        let settings = Settings::default();
        let client = HttpClient::new().unwrap();
        let providers = from_settings(&settings, &client).unwrap();

        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["exa", "tavily"]);
    }

    #[test]
    fn rejects_unknown_provider_name() {
        let mut settings = Settings::default();
        settings.search.providers = vec!["exa".to_string(), "altavista".to_string()];
        let client = HttpClient::new().unwrap();

        let err = from_settings(&settings, &client).err().unwrap();
        assert!(err.to_string().contains("altavista"));
    }

    #[test]
    fn rejects_empty_provider_list() {
        let mut settings = Settings::default();
        settings.search.providers.clear();
        let client = HttpClient::new().unwrap();

        assert!(from_settings(&settings, &client).is_err());
    }
}
