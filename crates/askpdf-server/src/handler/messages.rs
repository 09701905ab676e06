//! Chat turn and transcript handlers.

use askpdf_core::session::Message;
use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::service::ServiceState;
use crate::{Error, Result};

/// Tracing target for chat turn operations.
const TRACING_TARGET: &str = "askpdf_server::handler::messages";

/// Request to submit one user turn.
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessage {
    /// The user's message text.
    pub text: String,
}

/// Response carrying the assistant reply for one turn.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageSent {
    /// The assistant reply, also appended to the transcript.
    pub reply: String,
}

/// The full ordered transcript.
#[derive(Debug, Serialize, Deserialize)]
pub struct Transcript {
    /// All messages, oldest first.
    pub messages: Vec<Message>,
}

/// Liveness response.
#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    /// Always `"ok"` while the service is up.
    pub status: String,
}

/// Handles one user turn and returns the reply.
pub(super) async fn send_message(
    State(state): State<ServiceState>,
    Json(request): Json<SendMessage>,
) -> Result<Json<MessageSent>> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(Error::bad_request("message text must not be empty"));
    }

    let mut session = state.session().lock().await;
    let reply = session.send(text).await;

    tracing::debug!(
        target: TRACING_TARGET,
        session_id = %session.id(),
        transcript_len = session.messages().len(),
        "turn handled"
    );

    Ok(Json(MessageSent { reply }))
}

/// Returns the full ordered transcript.
pub(super) async fn get_transcript(
    State(state): State<ServiceState>,
) -> Result<Json<Transcript>> {
    let session = state.session().lock().await;
    Ok(Json(Transcript {
        messages: session.messages().to_vec(),
    }))
}

/// Liveness probe.
pub(super) async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}
