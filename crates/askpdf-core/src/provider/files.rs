//! Provider file storage and document-aware completion.
//!
//! Covers the SCANNED ingestion path: original PDF blobs are registered
//! with the provider's file storage at ingestion time, and replies are
//! produced by the provider's document-aware completion endpoint with the
//! stored files attached.

use std::io::Write;
use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client as HttpClient, ClientBuilder, StatusCode, multipart};
use serde::Deserialize;
use serde_json::json;
use tokio_util::io::ReaderStream;

use super::credentials::ApiKeyCredentials;
use crate::config::ProviderConfig;
use crate::document::FileHandle;
use crate::{Error, Result};

/// Tracing target for provider file operations.
const TRACING_TARGET: &str = "askpdf_core::provider::files";

/// Purpose tag sent with every stored file.
const FILE_PURPOSE: &str = "user_data";

/// Connection timeout, separate from the per-request bound.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the provider's file-storage and document-aware completion APIs.
///
/// Cheap to clone; the underlying HTTP client is pooled.
#[derive(Clone)]
pub struct FilesClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
    model: String,
}

impl FilesClient {
    /// Creates a client from credentials and provider configuration.
    pub fn new(credentials: &ApiKeyCredentials, config: &ProviderConfig) -> Result<Self> {
        let base_url = config.parse_base_url()?;
        let http = ClientBuilder::new()
            .timeout(config.request_timeout())
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| Error::provider("openai", e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            api_key: credentials.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Uploads one PDF blob to the provider file storage.
    ///
    /// The blob is staged through a scoped temporary file that is written,
    /// streamed into the upload call, and released when the call returns.
    #[tracing::instrument(skip_all, fields(file = name, bytes = data.len()))]
    pub async fn upload(&self, name: &str, data: &Bytes) -> Result<FileHandle> {
        let staged = stage(data.clone()).await?;

        let file = tokio::fs::File::open(staged.path()).await?;
        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
        let part = multipart::Part::stream(body)
            .file_name(name.to_string())
            .mime_str("application/pdf")
            .map_err(|e| Error::provider("openai", e.to_string()))?;
        let form = multipart::Form::new()
            .text("purpose", FILE_PURPOSE)
            .part("file", part);

        let response = self
            .http
            .post(self.endpoint("files"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::provider("openai", e.to_string()))?;
        drop(staged);

        if !response.status().is_success() {
            return Err(self.response_error(response).await);
        }

        let uploaded: UploadedFile = response
            .json()
            .await
            .map_err(|e| Error::provider("openai", format!("malformed upload response: {e}")))?;

        tracing::debug!(
            target: TRACING_TARGET,
            file = name,
            file_id = %uploaded.id,
            "file registered with provider"
        );

        Ok(FileHandle::new(uploaded.id, name))
    }

    /// Document-aware completion: answers `prompt` from the attached files
    /// under the given grounding instructions.
    #[tracing::instrument(skip_all, fields(model = %self.model, attachments = handles.len()))]
    pub async fn respond(
        &self,
        instructions: &str,
        handles: &[FileHandle],
        prompt: &str,
    ) -> Result<String> {
        let mut content = Vec::with_capacity(handles.len() + 1);
        for handle in handles {
            content.push(json!({"type": "input_file", "file_id": handle.id}));
        }
        content.push(json!({"type": "input_text", "text": prompt}));

        let body = json!({
            "model": self.model,
            "instructions": instructions,
            "input": [{"role": "user", "content": content}],
        });

        let response = self
            .http
            .post(self.endpoint("responses"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::provider(&self.model, e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.response_error(response).await);
        }

        let completion: ModelResponse = response.json().await.map_err(|e| {
            Error::provider(&self.model, format!("malformed completion response: {e}"))
        })?;

        let text = completion.output_text();
        if text.is_empty() {
            return Err(Error::provider(
                &self.model,
                "completion contained no output text",
            ));
        }
        Ok(text)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Maps a non-success response to an error; rejected credentials are
    /// configuration errors so callers can abort instead of degrading.
    async fn response_error(&self, response: reqwest::Response) -> Error {
        let status = response.status();
        let detail = response.text().await.unwrap_or_default();
        let detail = truncate(&detail, 200);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Error::config(format!("provider rejected credentials ({status}): {detail}"))
        } else {
            Error::provider("openai", format!("{status}: {detail}"))
        }
    }
}

/// Writes the blob to a scoped temporary file, off the async runtime.
async fn stage(data: Bytes) -> Result<tempfile::NamedTempFile> {
    tokio::task::spawn_blocking(move || {
        let mut staged = tempfile::NamedTempFile::new()?;
        staged.write_all(&data)?;
        staged.flush()?;
        Ok(staged)
    })
    .await
    .map_err(|e| Error::ingestion(format!("staging task failed: {e}")))?
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ModelResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl ModelResponse {
    /// Concatenates the output text of every message item, ignoring
    /// non-message items such as reasoning traces.
    fn output_text(&self) -> String {
        self.output
            .iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| &item.content)
            .filter(|content| content.kind == "output_text")
            .map(|content| content.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

impl std::fmt::Debug for FilesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilesClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}
