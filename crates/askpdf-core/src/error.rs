//! Error types for askpdf-core.

use std::fmt;

/// Result type alias for chat engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while ingesting documents or talking to the model provider.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Ingestion error (text extraction or provider upload failed).
    #[error("ingestion error: {0}")]
    Ingestion(String),

    /// Provider error (completion call failed: network, auth, quota, malformed response).
    #[error("provider error: {provider}: {message}")]
    Provider { provider: String, message: String },

    /// Session error (malformed conversation state).
    #[error("session error: {0}")]
    Session(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an ingestion error.
    pub fn ingestion(message: impl fmt::Display) -> Self {
        Self::Ingestion(message.to_string())
    }

    /// Creates a provider error.
    pub fn provider(provider: impl fmt::Display, message: impl fmt::Display) -> Self {
        Self::Provider {
            provider: provider.to_string(),
            message: message.to_string(),
        }
    }

    /// Creates a session error.
    pub fn session(message: impl fmt::Display) -> Self {
        Self::Session(message.to_string())
    }

    /// Creates a configuration error.
    pub fn config(message: impl fmt::Display) -> Self {
        Self::Config(message.to_string())
    }

    /// Returns true if this error came from the model provider.
    ///
    /// Used by callers to present provider failures as visible transcript
    /// entries instead of aborting the session.
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_helpers_preserve_messages() {
        let err = Error::provider("openai", "quota exceeded");
        assert_eq!(err.to_string(), "provider error: openai: quota exceeded");
        assert!(err.is_provider());

        let err = Error::ingestion("unreadable pdf");
        assert_eq!(err.to_string(), "ingestion error: unreadable pdf");
        assert!(!err.is_provider());
    }
}
