//! Completion provider backed by the rig OpenAI client.

use std::sync::Arc;
use std::time::Duration;

use rig::completion::{AssistantContent, CompletionError, CompletionModel as RigCompletionModel};
use rig::message::Message;
use rig::one_or_many::OneOrMany;
use rig::prelude::CompletionClient;
use rig::providers::openai;

use super::credentials::ApiKeyCredentials;
use crate::{Error, Result};

struct CompletionInner {
    model: openai::CompletionModel,
    model_name: String,
    timeout: Duration,
}

/// Chat-completion capability of the model provider.
///
/// This is a cheaply cloneable wrapper around an `Arc` of the connected
/// rig completion model. One call is one request/response round trip; any
/// multi-step reasoning stays on the provider side.
#[derive(Clone)]
pub struct CompletionProvider(Arc<CompletionInner>);

impl CompletionProvider {
    /// Connects an OpenAI completion provider for the given model.
    pub fn openai(
        credentials: &ApiKeyCredentials,
        model: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = openai::Client::new(&credentials.api_key)
            .map_err(|e| Error::provider("openai", e.to_string()))?
            .completions_api();

        Ok(Self(Arc::new(CompletionInner {
            model: client.completion_model(model),
            model_name: model.to_string(),
            timeout,
        })))
    }

    /// Returns the model name.
    pub fn model_name(&self) -> &str {
        &self.0.model_name
    }

    /// Sends one completion request: grounding preamble, prior conversation,
    /// and the latest user prompt. Returns the completion text.
    ///
    /// The call is bounded by the configured timeout; timeouts surface as
    /// provider errors like any other failure.
    pub async fn complete(
        &self,
        preamble: &str,
        prompt: &str,
        chat_history: Vec<Message>,
    ) -> Result<String> {
        let map_err =
            |e: CompletionError| Error::provider(&self.0.model_name, e.to_string());

        let request = self
            .0
            .model
            .completion_request(prompt)
            .preamble(preamble.to_string())
            .messages(chat_history)
            .temperature(0.0)
            .send();

        let response = tokio::time::timeout(self.0.timeout, request)
            .await
            .map_err(|_| Error::provider(&self.0.model_name, "request timed out"))?
            .map_err(map_err)?;

        Ok(extract_text_content(&response.choice))
    }
}

/// Extracts text content from assistant content choices.
fn extract_text_content(choice: &OneOrMany<AssistantContent>) -> String {
    choice
        .iter()
        .filter_map(|content| match content {
            AssistantContent::Text(text) => Some(text.text()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("")
}

impl std::fmt::Debug for CompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionProvider")
            .field("model", &self.0.model_name)
            .finish()
    }
}
