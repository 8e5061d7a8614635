//! Backend access for the chat client.
//!
//! The [`ChatBackend`] trait is the seam between the controller and the
//! network. [`HttpBackend`] speaks to the real endpoints; tests plug in
//! their own implementations.
//!
//! # Endpoints
//!
//! - `POST /chat`: JSON conversation in, assistant reply out
//! - `POST /clear-chat`: form-encoded `session_id`, response ignored
//! - `POST /upload-resume`: multipart PDF plus `session_id`

mod http;
mod types;

pub use http::HttpBackend;
pub use types::{ChatReply, ChatRequest, PDF_MIME, ResumeFile, UploadReply};

use async_trait::async_trait;

use crate::error::Result;

/// Remote side of a chat session.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send the conversation and get the assistant reply.
    async fn send_chat(&self, request: &ChatRequest<'_>) -> Result<ChatReply>;

    /// Ask the backend to discard its state for a session.
    async fn clear_chat(&self, session_id: &str) -> Result<()>;

    /// Upload a resume for analysis.
    async fn upload_resume(&self, session_id: &str, file: &ResumeFile) -> Result<UploadReply>;
}
