//! Provider credential types.

use serde::{Deserialize, Serialize};

/// API key credentials for the model provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyCredentials {
    /// API key.
    pub api_key: String,
}

impl ApiKeyCredentials {
    /// Creates credentials from an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}
