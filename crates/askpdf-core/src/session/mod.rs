//! Session management for the single chat conversation.
//!
//! The session owns the append-only transcript and the currently active
//! agent. Every turn replays the full history through the agent; there is
//! no provider-side conversation state between calls. Replacing the agent
//! (a new upload, a different ingestion mode) never touches the history.

mod message;

pub use message::{Message, MessageRole};

use jiff::Timestamp;
use uuid::Uuid;

use crate::agent::Agent;

/// Tracing target for session operations.
const TRACING_TARGET: &str = "askpdf_core::session";

/// An active chat session: transcript plus the agent answering it.
#[derive(Debug)]
pub struct Session {
    /// Unique session ID.
    id: Uuid,

    /// Conversation history, append-only.
    messages: Vec<Message>,

    /// Agent answering the current upload.
    agent: Agent,

    /// When the session was created.
    created_at: Timestamp,

    /// Last activity time.
    last_activity_at: Timestamp,
}

impl Session {
    /// Creates a session with an empty transcript.
    pub fn new(agent: Agent) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::now_v7(),
            messages: Vec::new(),
            agent,
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Returns the session ID.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the conversation messages.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the active agent.
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Returns the creation time.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns the last activity time.
    pub fn last_activity_at(&self) -> Timestamp {
        self.last_activity_at
    }

    /// Replaces the active agent, keeping the transcript intact.
    ///
    /// Earlier turns may reference content the new agent no longer sees;
    /// retaining them anyway keeps conversational continuity across upload
    /// changes.
    pub fn install_agent(&mut self, agent: Agent) {
        tracing::debug!(
            target: TRACING_TARGET,
            session_id = %self.id,
            agent = agent.kind(),
            "agent replaced"
        );
        self.agent = agent;
        self.last_activity_at = Timestamp::now();
    }

    /// Handles one user turn.
    ///
    /// Appends the user message, replays the full history through the
    /// active agent, appends the reply, and returns it. A provider failure
    /// becomes a visible assistant-role error entry so the transcript stays
    /// an honest record; it never aborts the session.
    pub async fn send(&mut self, text: &str) -> String {
        self.messages.push(Message::user(text));

        let reply = match self.agent.reply(&self.messages).await {
            Ok(reply) => reply,
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    session_id = %self.id,
                    %error,
                    "reply failed; recording the error in the transcript"
                );
                format!("The assistant could not answer this turn: {error}")
            }
        };

        self.messages.push(Message::assistant(&reply));
        self.last_activity_at = Timestamp::now();
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderConfig;
    use crate::document::{FileHandle, IngestedContext};
    use crate::prompt;
    use crate::provider::ProviderContext;

    fn offline_session() -> Session {
        let providers = ProviderContext::connect(&ProviderConfig::default()).unwrap();
        Session::new(Agent::empty(&providers))
    }

    fn offline_agent(context: &IngestedContext) -> Agent {
        let providers = ProviderContext::connect(&ProviderConfig::default()).unwrap();
        Agent::build(context, &providers)
    }

    #[tokio::test]
    async fn transcript_grows_by_two_per_turn() {
        let mut session = offline_session();

        for turn in 1..=3 {
            session.send(&format!("question {turn}")).await;
            assert_eq!(session.messages().len(), 2 * turn);
        }

        let roles: Vec<MessageRole> = session.messages().iter().map(Message::role).collect();
        assert_eq!(
            roles,
            [
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant,
            ]
        );
    }

    #[tokio::test]
    async fn fallback_reply_contains_rendered_instructions() {
        let mut session = offline_session();
        let reply = session.send("What is the capital of France?").await;

        let rendered = prompt::render(&IngestedContext::PlainText(String::new()));
        assert!(reply.contains(&rendered));
    }

    #[tokio::test]
    async fn agent_swap_preserves_history_verbatim() {
        let mut session = offline_session();
        session.send("first question").await;

        let before: Vec<String> = session
            .messages()
            .iter()
            .map(|m| m.content().to_string())
            .collect();

        let context =
            IngestedContext::FileHandles(vec![FileHandle::new("file-1", "report.pdf")]);
        session.install_agent(offline_agent(&context));

        let after: Vec<String> = session
            .messages()
            .iter()
            .map(|m| m.content().to_string())
            .collect();
        assert_eq!(before, after);

        // The next turn answers under the new grounding.
        let reply = session.send("second question").await;
        assert!(reply.contains("report.pdf"));
        assert_eq!(session.messages().len(), 4);
    }
}
