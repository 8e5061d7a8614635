//! Wire types for the chat backend.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::Message;

/// The only MIME type accepted for resume uploads.
pub const PDF_MIME: &str = "application/pdf";

/// Request body for `POST /chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    /// Full conversation so far, ending with the new user message.
    pub messages: &'a [Message],
    /// Session the backend keys its state by.
    pub session_id: &'a str,
}

/// Response from `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    /// Assistant reply text.
    pub response: String,
}

/// Response from `POST /upload-resume`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadReply {
    /// Analysis of the resume, when the backend produced one.
    #[serde(default)]
    pub analysis: Option<String>,
    /// Filename as the backend saw it.
    #[serde(default)]
    pub filename: Option<String>,
    /// Human-readable status line.
    #[serde(default)]
    pub message: Option<String>,
}

/// A resume file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    /// Original filename.
    pub filename: String,
    /// MIME type as reported by the picker.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    /// Create a file from in-memory contents.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            filename,
            content_type,
            bytes,
        })
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether the MIME type is exactly `application/pdf`.
    #[must_use]
    pub fn is_pdf(&self) -> bool {
        self.content_type == PDF_MIME
    }
}
