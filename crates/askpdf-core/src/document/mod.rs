//! Document ingestion: uploaded PDF blobs become model-ready context.
//!
//! An upload event produces one [`IngestedContext`], either the extracted
//! plain text of every document or a set of provider-assigned file handles.
//! The context is immutable; changing the upload builds a new one.

mod ingestor;

use bytes::Bytes;
pub use ingestor::DocumentIngestor;
use serde::{Deserialize, Serialize};

/// A PDF document received from the upload boundary.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    /// Original filename.
    name: String,

    /// Raw PDF bytes.
    data: Bytes,
}

impl DocumentUpload {
    /// Creates an upload from a filename and its raw bytes.
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Returns the original filename.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw PDF bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

/// How uploaded documents reach the model.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum IngestMode {
    /// Extract selectable text and embed it in the grounding prompt.
    Text,
    /// Attach the original file to the model via provider file storage.
    Scanned,
}

/// Provider-assigned identifier for an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    /// Opaque identifier assigned by the provider.
    pub id: String,

    /// Original filename, kept for the human-readable manifest.
    pub name: String,
}

impl FileHandle {
    /// Creates a handle from a provider id and the original filename.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Model-ready document content produced by one upload event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestedContext {
    /// Concatenated extracted text across all files in upload order.
    PlainText(String),
    /// Provider file handles in upload order.
    FileHandles(Vec<FileHandle>),
}

impl IngestedContext {
    /// Returns the ingestion mode that produced this context.
    pub fn mode(&self) -> IngestMode {
        match self {
            Self::PlainText(_) => IngestMode::Text,
            Self::FileHandles(_) => IngestMode::Scanned,
        }
    }

    /// Returns true if the context carries no document content.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::PlainText(text) => text.is_empty(),
            Self::FileHandles(handles) => handles.is_empty(),
        }
    }
}
