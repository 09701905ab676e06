//! Configuration for the model provider.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Configuration for the hosted model provider (OpenAI).
///
/// The API key is optional on purpose: without one the engine builds
/// offline fallback agents instead of failing, so the whole surface stays
/// exercisable without live credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ProviderConfig {
    /// OpenAI API key. Absent key selects the offline fallback agent.
    #[cfg_attr(feature = "config", arg(long, env = "OPENAI_API_KEY"))]
    pub api_key: Option<String>,

    /// Completion model name.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAI_MODEL", default_value = "gpt-4.1-nano")
    )]
    pub model: String,

    /// Provider API base URL.
    #[cfg_attr(
        feature = "config",
        arg(
            long,
            env = "OPENAI_BASE_URL",
            default_value = "https://api.openai.com/v1"
        )
    )]
    pub base_url: String,

    /// Bound applied to every provider call, in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "60")
    )]
    pub request_timeout_secs: u64,

    /// Attach only the first uploaded file to document-aware completion
    /// calls instead of all of them.
    #[cfg_attr(feature = "config", arg(long, env = "ATTACH_FIRST_ONLY"))]
    pub attach_first_only: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4.1-nano".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            request_timeout_secs: 60,
            attach_first_only: false,
        }
    }
}

impl ProviderConfig {
    /// Returns true if a provider credential is configured.
    pub fn has_credentials(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    /// Returns the per-call timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parses and validates the configured base URL.
    pub fn parse_base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("invalid base URL {:?}: {e}", self.base_url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_credentials() {
        let config = ProviderConfig::default();
        assert!(!config.has_credentials());
        assert_eq!(config.model, "gpt-4.1-nano");
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let config = ProviderConfig {
            api_key: Some(String::new()),
            ..ProviderConfig::default()
        };
        assert!(!config.has_credentials());
    }

    #[test]
    fn base_url_validation() {
        let config = ProviderConfig::default();
        assert!(config.parse_base_url().is_ok());

        let config = ProviderConfig {
            base_url: "not a url".to_string(),
            ..ProviderConfig::default()
        };
        assert!(config.parse_base_url().is_err());
    }
}
