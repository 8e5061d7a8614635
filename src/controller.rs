//! Chat session controller.
//!
//! [`ChatSessionController`] owns the current [`Session`], a [`ChatBackend`]
//! and a [`ChatView`], and implements the user-facing actions of the chat:
//! sending messages, clearing and restarting the conversation, attaching a
//! resume, and cosmetic preferences.
//!
//! Every operation takes `&mut self`, so at most one action is in flight and
//! the message log has a single writer. Transient UI (typing indicator,
//! loading overlay) is removed right after the awaited request returns, on
//! the success and the failure path alike.

use std::fmt;

use tracing::{debug, error, info, warn};

use crate::client::{ChatBackend, ChatRequest, ResumeFile};
use crate::error::Result;
use crate::preferences::{
    ANIMATION_ENABLED_KEY, PreferenceStore, Preferences, THEME_PREFERENCE_KEY,
};
use crate::session::{Message, MessageRole, ResumeInfo, Session};
use crate::view::ChatView;

/// Title shown for a fresh conversation.
pub const DEFAULT_CHAT_TITLE: &str = "General Assistant";

/// Rendered in place of an assistant reply when `/chat` fails.
pub const CHAT_ERROR_FALLBACK: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";

pub const CLEAR_CHAT_PROMPT: &str = "Are you sure you want to clear the chat history?";
pub const NO_FILE_ALERT: &str = "Please select a file first.";
pub const NOT_PDF_ALERT: &str = "Please upload a PDF file.";
pub const UPLOAD_FAILED_ALERT: &str = "Failed to upload resume. Please try again.";
pub const RESUME_REMOVED_NOTICE: &str = "Resume has been removed from the conversation context.";

/// Result of [`ChatSessionController::submit_user_message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was blank; nothing happened.
    Ignored,
    /// The assistant reply was appended.
    Answered,
    /// The request failed; only the user turn was appended.
    Failed,
}

/// Result of [`ChatSessionController::upload_resume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Missing file or wrong type; no request was sent.
    Rejected,
    /// The resume is attached to the session.
    Uploaded,
    /// The upload request failed.
    Failed,
}

/// Drives one chat page: session state, backend exchange, rendering.
pub struct ChatSessionController<B, V> {
    session: Session,
    backend: B,
    view: V,
    preferences: Box<dyn PreferenceStore>,
}

impl<B, V> fmt::Debug for ChatSessionController<B, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSessionController")
            .field("session_id", &self.session.id())
            .field("message_count", &self.session.message_count())
            .field("has_resume", &self.session.resume().is_some())
            .finish_non_exhaustive()
    }
}

impl<B: ChatBackend, V: ChatView> ChatSessionController<B, V> {
    /// Create a controller with a fresh session and apply stored preferences.
    pub fn new(backend: B, view: V, preferences: impl PreferenceStore + 'static) -> Self {
        let mut controller = Self {
            session: Session::new(),
            backend,
            view,
            preferences: Box::new(preferences),
        };
        controller.load_preferences();
        info!(
            name: "chat.session.started",
            session_id = %controller.session.id(),
            "Chat session started"
        );
        controller
    }

    /// Current session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current session ID.
    #[must_use]
    pub fn session_id(&self) -> &str {
        self.session.id()
    }

    /// Messages exchanged in the current session.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        self.session.messages()
    }

    /// Resume attached to the current session.
    #[must_use]
    pub fn resume(&self) -> Option<&ResumeInfo> {
        self.session.resume()
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Start over with a new session identifier.
    ///
    /// The old session is replaced in one assignment; the backend is not
    /// told, since the new identifier has no server-side state yet.
    pub fn start_new_chat(&mut self) {
        let previous = std::mem::replace(&mut self.session, Session::new());

        self.view.reset_to_welcome();
        self.view.set_resume_preview(None);
        self.view.set_title(DEFAULT_CHAT_TITLE);

        info!(
            name: "chat.session.renewed",
            previous_session_id = %previous.id(),
            previous_started_at = %previous.created_at(),
            session_id = %self.session.id(),
            "Started new chat"
        );
    }

    /// Send a user message and render the reply.
    pub async fn submit_user_message(&mut self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.session.add_user_message(text);
        self.view.append_message(MessageRole::User, text);
        self.view.show_typing();

        let result = {
            let request = ChatRequest {
                messages: self.session.messages(),
                session_id: self.session.id(),
            };
            debug!(
                name: "chat.request.sent",
                session_id = %request.session_id,
                message_count = request.messages.len(),
                "Sending chat request"
            );
            self.backend.send_chat(&request).await
        };

        self.view.hide_typing();

        match result {
            Ok(reply) => {
                info!(
                    name: "chat.reply.received",
                    session_id = %self.session.id(),
                    response_length = reply.response.len(),
                    "Received assistant reply"
                );
                self.view.append_message(MessageRole::Assistant, &reply.response);
                self.session.add_assistant_message(reply.response);
                SubmitOutcome::Answered
            }
            Err(e) => {
                error!(
                    name: "chat.request.failed",
                    session_id = %self.session.id(),
                    error = %e,
                    "Chat request failed"
                );
                self.view.append_message(MessageRole::Assistant, CHAT_ERROR_FALLBACK);
                SubmitOutcome::Failed
            }
        }
    }

    /// Clear the conversation after the user confirms.
    ///
    /// Returns `false` when the user declined. The backend is notified after
    /// the local clear; a failure there is only logged.
    pub async fn clear_chat(&mut self) -> bool {
        if !self.view.confirm(CLEAR_CHAT_PROMPT) {
            debug!(
                name: "chat.clear.declined",
                session_id = %self.session.id(),
                "Clear chat declined"
            );
            return false;
        }

        self.view.reset_to_welcome();
        self.view.set_resume_preview(None);
        self.session.clear();

        match self.backend.clear_chat(self.session.id()).await {
            Ok(()) => info!(
                name: "chat.cleared",
                session_id = %self.session.id(),
                "Chat cleared"
            ),
            Err(e) => warn!(
                name: "chat.clear.notify_failed",
                session_id = %self.session.id(),
                error = %e,
                "Error clearing chat session on server"
            ),
        }
        true
    }

    /// Upload a resume for the current session.
    pub async fn upload_resume(&mut self, file: Option<ResumeFile>) -> UploadOutcome {
        let Some(file) = file else {
            self.view.alert(NO_FILE_ALERT);
            return UploadOutcome::Rejected;
        };
        if !file.is_pdf() {
            debug!(
                name: "resume.upload.rejected",
                filename = %file.filename,
                content_type = %file.content_type,
                "Rejected non-PDF resume"
            );
            self.view.alert(NOT_PDF_ALERT);
            return UploadOutcome::Rejected;
        }

        self.view.show_loading();
        let result = self.backend.upload_resume(self.session.id(), &file).await;
        self.view.hide_loading();

        let outcome = match result {
            Ok(reply) => {
                let analysis = reply.analysis.filter(|a| !a.trim().is_empty());
                let text = analysis.clone().unwrap_or_else(|| {
                    format!(
                        "I've analyzed your resume \"{}\". How can I help you with it?",
                        file.filename
                    )
                });

                self.session.set_resume(ResumeInfo {
                    filename: file.filename.clone(),
                    size: file.size(),
                    content_type: file.content_type.clone(),
                    analysis,
                    uploaded_at: chrono::Utc::now(),
                });
                self.view.set_resume_preview(Some(&file.filename));
                self.view.close_resume_dialog();
                self.view.append_message(MessageRole::Assistant, &text);

                info!(
                    name: "resume.upload.completed",
                    session_id = %self.session.id(),
                    filename = %file.filename,
                    stored_as = reply.filename.as_deref().unwrap_or(&file.filename),
                    size = file.size(),
                    status = reply.message.as_deref().unwrap_or_default(),
                    "Resume uploaded"
                );
                UploadOutcome::Uploaded
            }
            Err(e) => {
                error!(
                    name: "resume.upload.failed",
                    session_id = %self.session.id(),
                    filename = %file.filename,
                    error = %e,
                    "Error uploading resume"
                );
                self.view.alert(UPLOAD_FAILED_ALERT);
                UploadOutcome::Failed
            }
        };

        self.view.reset_file_input();
        outcome
    }

    /// Detach the resume locally.
    ///
    /// There is no backend endpoint for this, so the server may still hold
    /// the resume context for this session until it is cleared.
    pub fn remove_resume(&mut self) {
        let removed = self.session.take_resume();
        self.view.set_resume_preview(None);
        self.view.append_message(MessageRole::Assistant, RESUME_REMOVED_NOTICE);

        info!(
            name: "resume.removed",
            session_id = %self.session.id(),
            filename = ?removed.map(|r| r.filename),
            "Resume removed"
        );
    }

    /// Read stored preferences and apply the ones that are set.
    pub fn load_preferences(&mut self) -> Preferences {
        let prefs = Preferences::load(self.preferences.as_ref());
        if let Some(enabled) = prefs.animation_enabled {
            self.view.set_animations_enabled(enabled);
        }
        if let Some(theme) = &prefs.theme {
            self.view.set_theme(theme);
        }
        debug!(
            name: "preferences.loaded",
            animation_enabled = ?prefs.animation_enabled,
            theme = ?prefs.theme,
            "Preferences loaded"
        );
        prefs
    }

    /// Toggle background animations and remember the choice.
    pub fn set_animations_enabled(&mut self, enabled: bool) -> Result<()> {
        self.view.set_animations_enabled(enabled);
        self.preferences
            .set(ANIMATION_ENABLED_KEY, if enabled { "true" } else { "false" })
    }

    /// Switch theme and remember the choice.
    pub fn set_theme(&mut self, theme: &str) -> Result<()> {
        self.view.set_theme(theme);
        self.preferences.set(THEME_PREFERENCE_KEY, theme)
    }
}
