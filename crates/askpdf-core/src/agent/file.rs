//! File-grounded agent: original PDFs attached through provider handles.

use super::latest_user_turn;
use crate::Result;
use crate::document::FileHandle;
use crate::provider::FilesClient;
use crate::session::Message;

/// Fixed reply when no file handle is available to answer from.
pub const NO_DOCUMENTS_REPLY: &str =
    "No file uploaded. Please upload a PDF document before asking questions.";

/// Agent that attaches stored provider files to each completion call.
///
/// Unlike [`TextAgent`](super::TextAgent), only the latest user turn is
/// forwarded to the provider; earlier turns are not replayed on this path.
#[derive(Debug)]
pub struct FileAgent {
    client: FilesClient,
    grounding: String,
    handles: Vec<FileHandle>,
    attach_first_only: bool,
}

impl FileAgent {
    pub(crate) fn new(
        client: FilesClient,
        grounding: String,
        handles: Vec<FileHandle>,
        attach_first_only: bool,
    ) -> Self {
        Self {
            client,
            grounding,
            handles,
            attach_first_only,
        }
    }

    /// Returns the rendered grounding instructions.
    pub fn grounding(&self) -> &str {
        &self.grounding
    }

    /// Returns the provider handles this agent answers from.
    pub fn handles(&self) -> &[FileHandle] {
        &self.handles
    }

    /// Answers the latest user turn from the attached files.
    #[tracing::instrument(skip_all, fields(attachments = self.handles.len(), turns = history.len()))]
    pub async fn reply(&self, history: &[Message]) -> Result<String> {
        if self.handles.is_empty() {
            return Ok(NO_DOCUMENTS_REPLY.to_string());
        }

        let (prompt, _prior) = latest_user_turn(history)?;
        let attached = if self.attach_first_only {
            &self.handles[..1]
        } else {
            &self.handles[..]
        };

        self.client.respond(&self.grounding, attached, prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderConfig;
    use crate::provider::ApiKeyCredentials;

    #[tokio::test]
    async fn zero_handles_short_circuits_without_a_provider_call() {
        let config = ProviderConfig {
            api_key: Some("test-key".to_string()),
            ..ProviderConfig::default()
        };
        let client = FilesClient::new(&ApiKeyCredentials::new("test-key"), &config).unwrap();
        let agent = FileAgent::new(client, "grounding".to_string(), Vec::new(), false);

        let reply = agent.reply(&[Message::user("What is the total?")]).await;
        assert_eq!(reply.unwrap(), NO_DOCUMENTS_REPLY);
    }
}
