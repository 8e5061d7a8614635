//! Message rendering with an explicit escaping policy.
//!
//! Message text comes from the user and from the backend, so it is treated
//! as untrusted. [`escape_html`] runs exactly once, before any structural
//! rewriting, and the structural passes only ever insert fixed markup. The
//! result can be injected into a page without executing anything in the
//! text, and entities already present in the text are shown literally
//! rather than decoded.

use crate::session::MessageRole;

/// Fence delimiting a code block inside a message.
const FENCE: &str = "```";

/// Escape text for use inside HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Format raw message text as an HTML fragment.
///
/// Closed fenced spans become `<pre><code>` blocks with their newlines kept.
/// Newlines outside code blocks become `<br>`. An unclosed fence is left as
/// literal text.
#[must_use]
pub fn format_message_content(content: &str) -> String {
    let escaped = escape_html(content);
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped.as_str();

    while let Some(open) = rest.find(FENCE) {
        let body_start = open + FENCE.len();
        let Some(close) = rest[body_start..].find(FENCE) else {
            break;
        };
        let body = &rest[body_start..body_start + close];

        push_with_line_breaks(&mut out, &rest[..open]);
        push_code_block(&mut out, body);

        rest = &rest[body_start + close + FENCE.len()..];
    }

    push_with_line_breaks(&mut out, rest);
    out
}

fn push_with_line_breaks(out: &mut String, text: &str) {
    let mut lines = text.split('\n');
    if let Some(first) = lines.next() {
        out.push_str(first);
    }
    for line in lines {
        out.push_str("<br>");
        out.push_str(line);
    }
}

fn push_code_block(out: &mut String, body: &str) {
    let (language, code) = split_language_tag(body);
    match language {
        Some(lang) => {
            out.push_str("<pre><code class=\"language-");
            out.push_str(lang);
            out.push_str("\">");
        }
        None => out.push_str("<pre><code>"),
    }
    out.push_str(code);
    out.push_str("</code></pre>");
}

/// Split a leading info string (```` ```rust ````) off a fenced body.
fn split_language_tag(body: &str) -> (Option<&str>, &str) {
    let Some((first, code)) = body.split_once('\n') else {
        return (None, body);
    };
    let is_tag = !first.is_empty()
        && first
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '_' | '#' | '.'));
    if is_tag { (Some(first), code) } else { (None, body) }
}

/// CSS modifier class for a message role.
#[must_use]
pub fn role_class(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "user-message",
        MessageRole::Assistant => "ai-message",
    }
}

fn avatar_icon(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "person",
        MessageRole::Assistant => "robot",
    }
}

/// Render a chat message as an HTML fragment.
#[must_use]
pub fn render_message(role: MessageRole, content: &str) -> String {
    format!(
        concat!(
            r#"<div class="message {class}" data-role="{role}">"#,
            r#"<div class="message-avatar"><i class="bi bi-{icon}"></i></div>"#,
            r#"<div class="message-content">"#,
            r#"<div class="message-text"><p>{body}</p></div>"#,
            r#"<div class="message-actions">"#,
            r#"<button class="copy-message-btn" title="Copy message"><i class="bi bi-clipboard"></i></button>"#,
            r#"</div></div></div>"#,
        ),
        class = role_class(role),
        role = role.as_str(),
        icon = avatar_icon(role),
        body = format_message_content(content),
    )
}

/// Render the typing indicator shown while a chat request is pending.
#[must_use]
pub fn typing_indicator() -> &'static str {
    concat!(
        r#"<div class="typing-indicator">"#,
        r#"<div class="typing-dot"></div><div class="typing-dot"></div><div class="typing-dot"></div>"#,
        r#"</div>"#,
    )
}

/// Render the static welcome message that survives every reset.
#[must_use]
pub fn welcome_message(text: &str) -> String {
    render_message(MessageRole::Assistant, text)
}
