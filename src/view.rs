//! The render layer the controller drives.
//!
//! [`ChatView`] stands in for the page: it receives rendered turns, shows
//! and hides transient indicators, and asks the user blocking questions.
//! [`HtmlTranscript`] is the HTML rendition, usable headless and as an
//! export format.

use std::collections::VecDeque;

use crate::render::{self, escape_html};
use crate::session::MessageRole;

/// Everything the controller needs from a chat front end.
pub trait ChatView {
    /// Render one message at the end of the transcript.
    fn append_message(&mut self, role: MessageRole, content: &str);

    /// Show the "assistant is typing" indicator.
    fn show_typing(&mut self);

    /// Remove the typing indicator. Must be a no-op when none is shown.
    fn hide_typing(&mut self);

    /// Drop every rendered message except the welcome message.
    fn reset_to_welcome(&mut self);

    /// Show the blocking loading overlay.
    fn show_loading(&mut self);

    /// Hide the loading overlay.
    fn hide_loading(&mut self);

    /// Show a blocking notice.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question and wait for the answer.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Show (`Some`) or hide (`None`) the attached-resume preview.
    fn set_resume_preview(&mut self, filename: Option<&str>);

    /// Close the resume upload dialog.
    fn close_resume_dialog(&mut self) {}

    /// Clear the selected file.
    fn reset_file_input(&mut self) {}

    /// Set the chat title.
    fn set_title(&mut self, title: &str);

    /// Turn background animations on or off.
    fn set_animations_enabled(&mut self, enabled: bool);

    /// Apply a theme by name.
    fn set_theme(&mut self, theme: &str);
}

/// A rendered element of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptNode {
    /// A chat turn, kept with its raw text for copying.
    Message {
        role: MessageRole,
        content: String,
        html: String,
    },
    /// The typing indicator.
    Typing,
}

/// A change to one of the transient indicators, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorEvent {
    TypingShown,
    TypingHidden,
    LoadingShown,
    LoadingHidden,
}

/// Headless HTML view of a chat.
///
/// Confirmations are answered from a queue (see
/// [`HtmlTranscript::queue_confirmation`]); an empty queue answers with the
/// configured default.
#[derive(Debug, Clone)]
pub struct HtmlTranscript {
    welcome: String,
    welcome_html: String,
    nodes: Vec<TranscriptNode>,
    loading: bool,
    indicator_events: Vec<IndicatorEvent>,
    alerts: Vec<String>,
    prompts: Vec<String>,
    confirmations: VecDeque<bool>,
    default_confirmation: bool,
    resume_preview: Option<String>,
    resume_dialog_open: bool,
    file_input_resets: usize,
    title: String,
    animations_enabled: bool,
    theme: Option<String>,
}

impl HtmlTranscript {
    /// Create a transcript holding only the welcome message.
    #[must_use]
    pub fn new(welcome: impl Into<String>) -> Self {
        let welcome = welcome.into();
        let welcome_html = render::welcome_message(&welcome);
        Self {
            welcome,
            welcome_html,
            nodes: Vec::new(),
            loading: false,
            indicator_events: Vec::new(),
            alerts: Vec::new(),
            prompts: Vec::new(),
            confirmations: VecDeque::new(),
            default_confirmation: false,
            resume_preview: None,
            resume_dialog_open: false,
            file_input_resets: 0,
            title: crate::controller::DEFAULT_CHAT_TITLE.to_string(),
            animations_enabled: true,
            theme: None,
        }
    }

    /// Answer used when no queued confirmation is left.
    #[must_use]
    pub fn with_default_confirmation(mut self, answer: bool) -> Self {
        self.default_confirmation = answer;
        self
    }

    /// Queue the answer to the next confirmation prompt.
    pub fn queue_confirmation(&mut self, answer: bool) {
        self.confirmations.push_back(answer);
    }

    /// Welcome message text.
    #[must_use]
    pub fn welcome(&self) -> &str {
        &self.welcome
    }

    /// Rendered nodes after the welcome message.
    #[must_use]
    pub fn nodes(&self) -> &[TranscriptNode] {
        &self.nodes
    }

    /// Rendered chat turns as `(role, raw text)`, in display order.
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageRole, &str)> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                TranscriptNode::Message { role, content, .. } => Some((*role, content.as_str())),
                TranscriptNode::Typing => None,
            })
            .collect()
    }

    /// Raw text of the `index`-th rendered turn, as a copy button would take it.
    #[must_use]
    pub fn message_text(&self, index: usize) -> Option<&str> {
        self.messages().get(index).map(|(_, text)| *text)
    }

    /// Whether the typing indicator is currently in the transcript.
    #[must_use]
    pub fn has_typing_indicator(&self) -> bool {
        self.nodes.iter().any(|n| matches!(n, TranscriptNode::Typing))
    }

    /// Whether the loading overlay is shown.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Indicator changes so far. Hiding something that is not shown is
    /// not recorded.
    #[must_use]
    pub fn indicator_events(&self) -> &[IndicatorEvent] {
        &self.indicator_events
    }

    /// Alerts shown so far.
    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Confirmation prompts asked so far.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Filename shown in the resume preview.
    #[must_use]
    pub fn resume_preview(&self) -> Option<&str> {
        self.resume_preview.as_deref()
    }

    /// Open the resume upload dialog.
    pub fn open_resume_dialog(&mut self) {
        self.resume_dialog_open = true;
    }

    /// Whether the resume upload dialog is open.
    #[must_use]
    pub fn is_resume_dialog_open(&self) -> bool {
        self.resume_dialog_open
    }

    /// How many times the file input was cleared.
    #[must_use]
    pub fn file_input_resets(&self) -> usize {
        self.file_input_resets
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn animations_enabled(&self) -> bool {
        self.animations_enabled
    }

    #[must_use]
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    /// Render the `chat-messages` container.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<div id="chat-messages" class="chat-messages">"#);
        html.push_str(&self.welcome_html);
        for node in &self.nodes {
            match node {
                TranscriptNode::Message { html: fragment, .. } => html.push_str(fragment),
                TranscriptNode::Typing => html.push_str(render::typing_indicator()),
            }
        }
        html.push_str("</div>");
        html
    }

    /// Render a self-contained page around the transcript.
    #[must_use]
    pub fn page_html(&self) -> String {
        let theme = escape_html(self.theme.as_deref().unwrap_or("default"));
        let animations = if self.animations_enabled { "on" } else { "off" };
        let resume = self.resume_preview.as_deref().map_or_else(String::new, |name| {
            format!(
                r#"<div id="resume-preview"><span id="resume-filename">{}</span></div>"#,
                escape_html(name)
            )
        });

        format!(
            r#"<!DOCTYPE html>
<html lang="en" data-theme="{theme}" data-animations="{animations}">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
</head>
<body>
    <h1 id="current-chat-title">{title}</h1>
    {resume}
    {messages}
</body>
</html>
"#,
            title = escape_html(&self.title),
            messages = self.to_html(),
        )
    }
}

impl ChatView for HtmlTranscript {
    fn append_message(&mut self, role: MessageRole, content: &str) {
        self.nodes.push(TranscriptNode::Message {
            role,
            content: content.to_string(),
            html: render::render_message(role, content),
        });
    }

    fn show_typing(&mut self) {
        if !self.has_typing_indicator() {
            self.nodes.push(TranscriptNode::Typing);
            self.indicator_events.push(IndicatorEvent::TypingShown);
        }
    }

    fn hide_typing(&mut self) {
        if self.has_typing_indicator() {
            self.nodes.retain(|n| !matches!(n, TranscriptNode::Typing));
            self.indicator_events.push(IndicatorEvent::TypingHidden);
        }
    }

    fn reset_to_welcome(&mut self) {
        self.nodes.clear();
    }

    fn show_loading(&mut self) {
        if !self.loading {
            self.loading = true;
            self.indicator_events.push(IndicatorEvent::LoadingShown);
        }
    }

    fn hide_loading(&mut self) {
        if self.loading {
            self.loading = false;
            self.indicator_events.push(IndicatorEvent::LoadingHidden);
        }
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.confirmations
            .pop_front()
            .unwrap_or(self.default_confirmation)
    }

    fn set_resume_preview(&mut self, filename: Option<&str>) {
        self.resume_preview = filename.map(str::to_string);
    }

    fn close_resume_dialog(&mut self) {
        self.resume_dialog_open = false;
    }

    fn reset_file_input(&mut self) {
        self.file_input_resets += 1;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_animations_enabled(&mut self, enabled: bool) {
        self.animations_enabled = enabled;
    }

    fn set_theme(&mut self, theme: &str) {
        self.theme = Some(theme.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_indicator_is_single_and_removable() {
        let mut view = HtmlTranscript::new("Welcome!");
        view.append_message(MessageRole::User, "Hi");
        view.show_typing();
        view.show_typing();
        assert_eq!(view.nodes().len(), 2);
        assert!(view.to_html().contains("typing-indicator"));

        view.hide_typing();
        assert!(!view.has_typing_indicator());
        view.hide_typing();
        assert_eq!(view.messages(), vec![(MessageRole::User, "Hi")]);
        assert_eq!(
            view.indicator_events(),
            &[IndicatorEvent::TypingShown, IndicatorEvent::TypingHidden]
        );
    }

    #[test]
    fn loading_changes_are_logged_once() {
        let mut view = HtmlTranscript::new("Welcome!");
        view.hide_loading();
        view.show_loading();
        view.show_loading();
        assert!(view.is_loading());
        view.hide_loading();

        assert!(!view.is_loading());
        assert_eq!(
            view.indicator_events(),
            &[IndicatorEvent::LoadingShown, IndicatorEvent::LoadingHidden]
        );
    }

    #[test]
    fn reset_keeps_welcome() {
        let mut view = HtmlTranscript::new("Welcome!");
        view.append_message(MessageRole::User, "Hi");
        view.append_message(MessageRole::Assistant, "Hello");

        view.reset_to_welcome();

        assert!(view.messages().is_empty());
        assert!(view.to_html().contains("<p>Welcome!</p>"));
    }

    #[test]
    fn confirmations_come_from_queue_then_default() {
        let mut view = HtmlTranscript::new("Welcome!").with_default_confirmation(true);
        view.queue_confirmation(false);

        assert!(!view.confirm("first?"));
        assert!(view.confirm("second?"));
        assert_eq!(view.prompts(), &["first?".to_string(), "second?".to_string()]);
    }

    #[test]
    fn message_text_is_raw() {
        let mut view = HtmlTranscript::new("Welcome!");
        view.append_message(MessageRole::Assistant, "a <b> c\n```x```");

        assert_eq!(view.message_text(0), Some("a <b> c\n```x```"));
        assert_eq!(view.message_text(1), None);
    }

    #[test]
    fn page_escapes_title_and_preview() {
        let mut view = HtmlTranscript::new("Welcome!");
        view.set_title("<Career> Chat");
        view.set_resume_preview(Some("me&you.pdf"));
        view.set_animations_enabled(false);

        let page = view.page_html();
        assert!(page.contains("&lt;Career&gt; Chat"));
        assert!(page.contains("me&amp;you.pdf"));
        assert!(page.contains(r#"data-animations="off""#));
        assert!(page.contains(r#"data-theme="default""#));
    }
}
