//! Conversation thread and resume state for one session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix of every generated session identifier.
const SESSION_ID_PREFIX: &str = "session_";

/// Generate a fresh session identifier.
///
/// Identifiers only need to avoid accidental reuse within one client
/// lifetime; they are not secrets.
#[must_use]
pub fn generate_session_id() -> String {
    format!("{SESSION_ID_PREFIX}{}", Uuid::new_v4().simple())
}

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The person typing into the chat.
    User,
    /// The remote assistant.
    Assistant,
}

impl MessageRole {
    /// Wire name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One turn in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message author.
    pub role: MessageRole,
    /// Raw text; may contain newlines and fenced code blocks.
    pub content: String,
}

impl Message {
    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Metadata of the resume attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeInfo {
    /// Original filename.
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type; always `application/pdf` for accepted uploads.
    pub content_type: String,
    /// Analysis text returned by the backend, if any.
    pub analysis: Option<String>,
    /// When the upload completed.
    pub uploaded_at: DateTime<Utc>,
}

/// A single client-side conversation session.
///
/// The message log is append-only. Resetting the conversation means building
/// a new `Session` (or calling [`Session::clear`]) rather than editing
/// entries in place.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier.
    id: String,
    /// Conversation messages in exchange order.
    messages: Vec<Message>,
    /// Resume attached to this conversation.
    resume: Option<ResumeInfo>,
    /// Session creation time.
    created_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with a freshly generated identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(generate_session_id())
    }

    /// Create a session with a specific identifier.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
            resume: None,
            created_at: Utc::now(),
        }
    }

    /// Get the session ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the session creation time.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Add a user message to the conversation.
    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.add_message(Message::user(content));
    }

    /// Add an assistant message to the conversation.
    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.add_message(Message::assistant(content));
    }

    /// Add a message to the conversation.
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Get all messages in the conversation.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Get the number of messages in the conversation.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Get the attached resume, if any.
    #[must_use]
    pub fn resume(&self) -> Option<&ResumeInfo> {
        self.resume.as_ref()
    }

    /// Attach a resume, replacing any previous one.
    ///
    /// Earlier messages are left as they are.
    pub fn set_resume(&mut self, resume: ResumeInfo) {
        self.resume = Some(resume);
    }

    /// Detach the resume, returning it.
    pub fn take_resume(&mut self) -> Option<ResumeInfo> {
        self.resume.take()
    }

    /// Drop all messages and the resume, keeping the identifier.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.resume = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_resume(name: &str) -> ResumeInfo {
        ResumeInfo {
            filename: name.to_string(),
            size: 1024,
            content_type: "application/pdf".to_string(),
            analysis: None,
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_session_lifecycle() {
        let mut session = Session::with_id("test-123");

        assert_eq!(session.id(), "test-123");
        assert_eq!(session.message_count(), 0);

        session.add_user_message("Hello");
        assert_eq!(session.message_count(), 1);

        session.add_assistant_message("Hi there!");
        assert_eq!(session.message_count(), 2);

        let messages = session.messages();
        assert_eq!(messages[0].role.as_str(), "user");
        assert_eq!(messages[1].role.as_str(), "assistant");
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = generate_session_id();
        let b = generate_session_id();

        assert!(a.starts_with("session_"));
        assert_eq!(a.len(), "session_".len() + 32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_clear_keeps_id() {
        let mut session = Session::with_id("keep-me");
        let started = session.created_at();
        session.add_user_message("Hello");
        session.set_resume(sample_resume("cv.pdf"));

        session.clear();

        assert_eq!(session.id(), "keep-me");
        assert_eq!(session.created_at(), started);
        assert!(session.messages().is_empty());
        assert!(session.resume().is_none());
    }

    #[test]
    fn test_replacing_resume_keeps_messages() {
        let mut session = Session::new();
        session.set_resume(sample_resume("old.pdf"));
        session.add_user_message("What does my resume say?");
        session.set_resume(sample_resume("new.pdf"));

        assert_eq!(session.resume().map(|r| r.filename.as_str()), Some("new.pdf"));
        assert_eq!(session.messages(), &[Message::user("What does my resume say?")]);

        let removed = session.take_resume();
        assert_eq!(removed.map(|r| r.filename), Some("new.pdf".to_string()));
        assert_eq!(session.message_count(), 1);
    }

    #[test]
    fn test_message_wire_format() {
        let json = serde_json::to_value(Message::assistant("Hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "role": "assistant", "content": "Hi" }));
    }
}
