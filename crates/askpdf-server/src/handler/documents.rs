//! Document upload handling.

use askpdf_core::agent::Agent;
use askpdf_core::document::{DocumentUpload, IngestMode};
use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::service::ServiceState;
use crate::{Error, Result};

/// Tracing target for document upload operations.
const TRACING_TARGET: &str = "askpdf_server::handler::documents";

/// Characters of rendered context echoed back for inspection.
const PREVIEW_LIMIT: usize = 400;

/// Response for a successful upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentsUploaded {
    /// Ingestion mode the agent was built for.
    pub mode: IngestMode,

    /// Uploaded filenames, in upload order.
    pub files: Vec<String>,

    /// Leading slice of the grounding instructions the agent answers under.
    pub context_preview: String,
}

/// Ingests uploaded PDFs and installs a fresh agent for them.
///
/// Expects a multipart form with one `mode` text field (`text` or
/// `scanned`) and one or more `file` parts. A failed ingest leaves the
/// previously active agent and the transcript untouched.
pub(super) async fn upload_documents(
    State(state): State<ServiceState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentsUploaded>)> {
    let mut mode: Option<IngestMode> = None;
    let mut files: Vec<DocumentUpload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::bad_request(format!("invalid multipart request: {e}")))?
    {
        let field_name = field.name().map(ToString::to_string);
        match field_name.as_deref() {
            Some("mode") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| Error::bad_request(format!("unreadable mode field: {e}")))?;
                let parsed = value
                    .parse::<IngestMode>()
                    .map_err(|_| Error::bad_request(format!("unknown ingestion mode {value:?}")))?;
                mode = Some(parsed);
            }
            Some("file") => {
                let name = field
                    .file_name()
                    .unwrap_or("document.pdf")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::bad_request(format!("unreadable file part: {e}")))?;
                files.push(DocumentUpload::new(name, data));
            }
            other => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    field = other.unwrap_or("<unnamed>"),
                    "ignoring unexpected multipart field"
                );
            }
        }
    }

    let mode = mode.ok_or_else(|| Error::bad_request("missing `mode` field"))?;
    if files.is_empty() {
        return Err(Error::bad_request("no `file` parts in upload"));
    }

    let names: Vec<String> = files.iter().map(|file| file.name().to_string()).collect();
    let context = state.ingestor().ingest(&files, mode).await?;
    let agent = Agent::build(&context, state.providers());
    let context_preview = preview(agent.grounding());

    {
        let mut session = state.session().lock().await;
        session.install_agent(agent);
    }

    tracing::info!(
        target: TRACING_TARGET,
        count = names.len(),
        %mode,
        "documents ingested and agent installed"
    );

    Ok((
        StatusCode::CREATED,
        Json(DocumentsUploaded {
            mode,
            files: names,
            context_preview,
        }),
    ))
}

fn preview(grounding: &str) -> String {
    match grounding.char_indices().nth(PREVIEW_LIMIT) {
        Some((index, _)) => format!("{}…", &grounding[..index]),
        None => grounding.to_string(),
    }
}
