//! Per-upload agents mapping a conversation history to a single reply.
//!
//! One agent is built per upload event and replaced wholesale when the
//! upload or ingestion mode changes. Which variant is built depends on the
//! ingested context and on whether a provider credential is configured:
//!
//! - [`TextAgent`] — extracted document text embedded in the grounding
//!   preamble, full history replayed on every call.
//! - [`FileAgent`] — original files attached via provider handles, only the
//!   latest user turn forwarded.
//! - [`FallbackAgent`] — offline diagnostic echo when no credential exists.

mod fallback;
mod file;
mod text;

pub use fallback::FallbackAgent;
pub use file::{FileAgent, NO_DOCUMENTS_REPLY};
pub use text::TextAgent;

use crate::document::IngestedContext;
use crate::prompt;
use crate::provider::ProviderContext;
use crate::session::{Message, MessageRole};
use crate::{Error, Result};

/// A capability object mapping a conversation history to a single reply.
///
/// Stateless from the caller's perspective: every call receives the entire
/// ordered history, and no conversation state survives on the provider
/// between calls.
#[derive(Debug)]
pub enum Agent {
    /// Answers from extracted text embedded in the grounding preamble.
    TextGrounded(TextAgent),
    /// Answers from files attached through provider handles.
    FileGrounded(FileAgent),
    /// Offline diagnostic agent used without provider credentials.
    Fallback(FallbackAgent),
}

impl Agent {
    /// Builds the agent for an ingested context.
    ///
    /// Falls back to the offline variant whenever the provider clients the
    /// context calls for are not connected.
    pub fn build(context: &IngestedContext, providers: &ProviderContext) -> Self {
        let grounding = prompt::render(context);

        match (context, providers.completion(), providers.files()) {
            (IngestedContext::PlainText(_), Some(completion), _) => {
                Self::TextGrounded(TextAgent::new(completion.clone(), grounding))
            }
            (IngestedContext::FileHandles(handles), _, Some(files)) => {
                Self::FileGrounded(FileAgent::new(
                    files.clone(),
                    grounding,
                    handles.clone(),
                    providers.config().attach_first_only,
                ))
            }
            _ => Self::Fallback(FallbackAgent::new(grounding)),
        }
    }

    /// Builds the agent used before any upload: empty text context.
    pub fn empty(providers: &ProviderContext) -> Self {
        Self::build(&IngestedContext::PlainText(String::new()), providers)
    }

    /// Produces one reply from the full ordered conversation history.
    pub async fn reply(&self, history: &[Message]) -> Result<String> {
        match self {
            Self::TextGrounded(agent) => agent.reply(history).await,
            Self::FileGrounded(agent) => agent.reply(history).await,
            Self::Fallback(agent) => agent.reply(history).await,
        }
    }

    /// Returns the rendered grounding instructions this agent answers under.
    pub fn grounding(&self) -> &str {
        match self {
            Self::TextGrounded(agent) => agent.grounding(),
            Self::FileGrounded(agent) => agent.grounding(),
            Self::Fallback(agent) => agent.grounding(),
        }
    }

    /// Returns a short variant name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TextGrounded(_) => "text-grounded",
            Self::FileGrounded(_) => "file-grounded",
            Self::Fallback(_) => "fallback",
        }
    }
}

/// Splits the latest user turn off the history.
///
/// The session appends the user turn before asking for a reply, so a
/// well-formed history always ends with one.
pub(crate) fn latest_user_turn(history: &[Message]) -> Result<(&str, &[Message])> {
    match history.split_last() {
        Some((last, prior)) if last.role() == MessageRole::User => Ok((last.content(), prior)),
        _ => Err(Error::session("conversation does not end with a user turn")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderConfig;
    use crate::document::FileHandle;

    fn offline_providers() -> ProviderContext {
        ProviderContext::connect(&ProviderConfig::default()).unwrap()
    }

    #[test]
    fn offline_context_always_builds_fallback() {
        let providers = offline_providers();

        let text = Agent::build(
            &IngestedContext::PlainText("content".to_string()),
            &providers,
        );
        assert_eq!(text.kind(), "fallback");

        let files = Agent::build(
            &IngestedContext::FileHandles(vec![FileHandle::new("file-1", "a.pdf")]),
            &providers,
        );
        assert_eq!(files.kind(), "fallback");
    }

    #[test]
    fn agent_exposes_its_grounding() {
        let providers = offline_providers();
        let agent = Agent::build(
            &IngestedContext::PlainText("Total: $42".to_string()),
            &providers,
        );
        assert!(agent.grounding().contains("Total: $42"));
    }

    #[test]
    fn latest_user_turn_requires_trailing_user_message() {
        let history = [Message::user("question")];
        let (prompt, prior) = latest_user_turn(&history).unwrap();
        assert_eq!(prompt, "question");
        assert!(prior.is_empty());

        let history = [Message::user("question"), Message::assistant("answer")];
        assert!(latest_user_turn(&history).is_err());

        assert!(latest_user_turn(&[]).is_err());
    }
}
