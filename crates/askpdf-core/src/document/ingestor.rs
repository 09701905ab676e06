//! Ingestion of uploaded documents into model-ready context.

use super::{DocumentUpload, FileHandle, IngestMode, IngestedContext};
use crate::provider::FilesClient;
use crate::{Error, Result};

/// Tracing target for document ingestion.
const TRACING_TARGET: &str = "askpdf_core::document";

/// Turns uploaded PDF blobs into an [`IngestedContext`] for the selected mode.
///
/// Text extraction is best-effort per page: a page without extractable text
/// contributes an empty string. A file that cannot be parsed at all aborts
/// the upload event with [`Error::Ingestion`]. File uploads to the provider
/// happen here, at ingestion time, never at reply time.
#[derive(Debug, Clone)]
pub struct DocumentIngestor {
    files: Option<FilesClient>,
}

impl DocumentIngestor {
    /// Creates an ingestor.
    ///
    /// `files` is the provider file-storage client; `None` when no credential
    /// is configured, in which case only [`IngestMode::Text`] is available.
    pub fn new(files: Option<FilesClient>) -> Self {
        Self { files }
    }

    /// Ingests the uploaded files for the selected mode.
    #[tracing::instrument(skip_all, fields(count = files.len(), %mode))]
    pub async fn ingest(
        &self,
        files: &[DocumentUpload],
        mode: IngestMode,
    ) -> Result<IngestedContext> {
        match mode {
            IngestMode::Text => self.extract_all(files).await.map(IngestedContext::PlainText),
            IngestMode::Scanned => self
                .upload_all(files)
                .await
                .map(IngestedContext::FileHandles),
        }
    }

    /// Extracts text from every file and concatenates it in upload order.
    async fn extract_all(&self, files: &[DocumentUpload]) -> Result<String> {
        let mut text = String::new();
        for file in files {
            let pages = extract_pages(file).await?;
            tracing::debug!(
                target: TRACING_TARGET,
                file = file.name(),
                pages = pages.len(),
                "extracted text"
            );
            for page in pages {
                text.push_str(&page);
            }
        }
        Ok(text)
    }

    /// Registers every file with the provider file storage, in upload order.
    ///
    /// A credential rejected by the provider aborts the whole upload event;
    /// any other per-file failure omits that file's handle with a warning.
    async fn upload_all(&self, files: &[DocumentUpload]) -> Result<Vec<FileHandle>> {
        let Some(client) = &self.files else {
            return Err(Error::ingestion(
                "no provider credential configured for file uploads",
            ));
        };

        let mut handles = Vec::with_capacity(files.len());
        for file in files {
            match client.upload(file.name(), file.data()).await {
                Ok(handle) => handles.push(handle),
                Err(error @ Error::Config(_)) => {
                    return Err(Error::ingestion(format!(
                        "provider rejected the upload: {error}"
                    )));
                }
                Err(error) => {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        file = file.name(),
                        %error,
                        "file upload failed; omitting its handle"
                    );
                }
            }
        }
        Ok(handles)
    }
}

/// Extracts per-page text from one PDF, off the async runtime.
async fn extract_pages(file: &DocumentUpload) -> Result<Vec<String>> {
    let name = file.name().to_string();
    let data = file.data().clone();

    let pages = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem_by_pages(&data)
    })
    .await
    .map_err(|e| Error::ingestion(format!("{name}: extraction task failed: {e}")))?
    .map_err(|e| Error::ingestion(format!("{name}: {e}")))?;

    Ok(pages)
}
