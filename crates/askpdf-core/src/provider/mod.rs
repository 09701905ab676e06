//! Model provider clients.
//!
//! Two capabilities back the agents: chat completion (rig, OpenAI) and
//! file storage with document-aware completion (plain HTTP). Both are
//! connected once from a [`ProviderConfig`] and shared from there.

mod completion;
mod credentials;
mod files;

pub use completion::CompletionProvider;
pub use credentials::ApiKeyCredentials;
pub use files::FilesClient;

use crate::config::ProviderConfig;
use crate::{Result, TRACING_TARGET};

/// Connected provider clients derived from one configuration.
///
/// Without a credential both clients are absent and agent construction
/// falls back to the offline variant; a missing credential is a supported
/// mode, not an error.
#[derive(Debug, Clone)]
pub struct ProviderContext {
    completion: Option<CompletionProvider>,
    files: Option<FilesClient>,
    config: ProviderConfig,
}

impl ProviderContext {
    /// Connects provider clients for the given configuration.
    pub fn connect(config: &ProviderConfig) -> Result<Self> {
        let Some(api_key) = config.api_key.as_deref().filter(|key| !key.is_empty()) else {
            tracing::warn!(
                target: TRACING_TARGET,
                "no provider credential configured; replies fall back to offline mode"
            );
            return Ok(Self {
                completion: None,
                files: None,
                config: config.clone(),
            });
        };

        let credentials = ApiKeyCredentials::new(api_key);
        let completion =
            CompletionProvider::openai(&credentials, &config.model, config.request_timeout())?;
        let files = FilesClient::new(&credentials, config)?;

        Ok(Self {
            completion: Some(completion),
            files: Some(files),
            config: config.clone(),
        })
    }

    /// Returns the chat-completion provider, if connected.
    pub fn completion(&self) -> Option<&CompletionProvider> {
        self.completion.as_ref()
    }

    /// Returns the file-storage client, if connected.
    pub fn files(&self) -> Option<&FilesClient> {
        self.files.as_ref()
    }

    /// Returns the provider configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Returns true if no credential is configured.
    pub fn is_offline(&self) -> bool {
        self.completion.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_connects_offline() {
        let context = ProviderContext::connect(&ProviderConfig::default()).unwrap();
        assert!(context.is_offline());
        assert!(context.completion().is_none());
        assert!(context.files().is_none());
    }

    #[test]
    fn empty_credential_counts_as_missing() {
        let config = ProviderConfig {
            api_key: Some(String::new()),
            ..ProviderConfig::default()
        };
        let context = ProviderContext::connect(&config).unwrap();
        assert!(context.is_offline());
    }
}
