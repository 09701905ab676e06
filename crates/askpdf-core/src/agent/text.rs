//! Text-grounded agent: extracted document text embedded in the preamble.

use rig::message::Message as RigMessage;

use super::latest_user_turn;
use crate::Result;
use crate::provider::CompletionProvider;
use crate::session::{Message, MessageRole};

/// Agent whose grounding preamble carries the extracted document text.
///
/// Every call replays the entire conversation: earlier turns travel as chat
/// history and the latest user turn becomes the prompt.
#[derive(Debug)]
pub struct TextAgent {
    provider: CompletionProvider,
    grounding: String,
}

impl TextAgent {
    pub(crate) fn new(provider: CompletionProvider, grounding: String) -> Self {
        Self {
            provider,
            grounding,
        }
    }

    /// Returns the rendered grounding instructions.
    pub fn grounding(&self) -> &str {
        &self.grounding
    }

    /// Produces one reply from the full conversation history.
    #[tracing::instrument(skip_all, fields(model = %self.provider.model_name(), turns = history.len()))]
    pub async fn reply(&self, history: &[Message]) -> Result<String> {
        let (prompt, prior) = latest_user_turn(history)?;
        let chat_history = prior.iter().map(to_rig_message).collect();

        self.provider
            .complete(&self.grounding, prompt, chat_history)
            .await
    }
}

fn to_rig_message(message: &Message) -> RigMessage {
    match message.role() {
        MessageRole::User => RigMessage::user(message.content()),
        MessageRole::Assistant => RigMessage::assistant(message.content()),
    }
}
