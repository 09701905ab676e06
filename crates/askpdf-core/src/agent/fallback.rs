//! Offline fallback agent used when no provider credential is configured.

use crate::Result;
use crate::session::Message;

/// Notice prefixed to every fallback reply.
pub(crate) const OFFLINE_NOTICE: &str =
    "No API key configured. Echoing the grounding instructions this session would send to the model:";

/// Agent that echoes its grounding instructions instead of calling the
/// provider, keeping the whole surface exercisable without credentials.
#[derive(Debug)]
pub struct FallbackAgent {
    grounding: String,
}

impl FallbackAgent {
    pub(crate) fn new(grounding: String) -> Self {
        Self { grounding }
    }

    /// Returns the rendered grounding instructions.
    pub fn grounding(&self) -> &str {
        &self.grounding
    }

    /// Returns the fixed diagnostic reply; the history is ignored.
    pub async fn reply(&self, _history: &[Message]) -> Result<String> {
        Ok(format!("{OFFLINE_NOTICE}\n\n{}", self.grounding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fallback_echoes_grounding_verbatim() {
        let agent = FallbackAgent::new("instructions go here".to_string());
        let reply = agent.reply(&[Message::user("anything")]).await.unwrap();

        assert!(reply.starts_with(OFFLINE_NOTICE));
        assert!(reply.contains("instructions go here"));
    }
}
