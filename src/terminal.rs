//! Terminal front end: a [`ChatView`] on stdout/stdin and the command loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use base64::{Engine, engine::general_purpose::STANDARD};

use resume_chat::ChatSessionController;
use resume_chat::client::{ChatBackend, ResumeFile};
use resume_chat::session::MessageRole;
use resume_chat::view::{ChatView, HtmlTranscript};

const HELP: &str = "\
Commands:
  /new                  start a new chat
  /clear                clear the chat history
  /upload [path]        upload a PDF resume
  /remove-resume        detach the resume
  /theme <name>         switch theme
  /animations on|off    toggle animations
  /export <path>        save the transcript as HTML
  /copy <n>             copy the n-th message to the clipboard
  /help                 show this help
  /quit                 exit
Anything else is sent as a message.";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Message(String),
    New,
    Clear,
    Upload(Option<PathBuf>),
    RemoveResume,
    Theme(String),
    Animations(bool),
    Export(PathBuf),
    /// One-based index into the rendered messages.
    Copy(usize),
    Help,
    Quit,
    Invalid(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Self::Message(line.to_string());
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match (name, arg) {
            ("new", "") => Self::New,
            ("clear", "") => Self::Clear,
            ("upload", "") => Self::Upload(None),
            ("upload", path) => Self::Upload(Some(PathBuf::from(path))),
            ("remove-resume", "") => Self::RemoveResume,
            ("theme", name) if !name.is_empty() => Self::Theme(name.to_string()),
            ("animations", "on") => Self::Animations(true),
            ("animations", "off") => Self::Animations(false),
            ("export", path) if !path.is_empty() => Self::Export(PathBuf::from(path)),
            ("copy", n) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Self::Copy(n),
                _ => Self::Invalid(trimmed.to_string()),
            },
            ("help", _) => Self::Help,
            ("quit" | "exit", _) => Self::Quit,
            _ => Self::Invalid(trimmed.to_string()),
        }
    }
}

/// Drop control characters other than newline and tab so remote text
/// cannot drive the terminal.
fn printable(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect()
}

/// OSC 52 sequence asking the terminal to put `text` on the clipboard.
fn clipboard_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

fn read_line() -> io::Result<Option<String>> {
    let mut buf = String::new();
    if io::stdin().lock().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
}

/// Chat view that prints to the terminal and mirrors into an HTML transcript
/// for `/export`.
#[derive(Debug)]
pub struct TerminalView {
    transcript: HtmlTranscript,
}

impl TerminalView {
    pub fn new(welcome: &str) -> Self {
        Self {
            transcript: HtmlTranscript::new(welcome),
        }
    }

    pub fn transcript(&self) -> &HtmlTranscript {
        &self.transcript
    }

    fn print_welcome(&self) {
        println!("assistant> {}", printable(self.transcript.welcome()));
    }
}

impl ChatView for TerminalView {
    fn append_message(&mut self, role: MessageRole, content: &str) {
        let label = match role {
            MessageRole::User => "you",
            MessageRole::Assistant => "assistant",
        };
        // The user's own line is already on screen.
        if role == MessageRole::Assistant {
            println!("{label}> {}", printable(content));
        }
        self.transcript.append_message(role, content);
    }

    fn show_typing(&mut self) {
        print!("assistant is typing...");
        let _ = io::stdout().flush();
        self.transcript.show_typing();
    }

    fn hide_typing(&mut self) {
        print!("\r\x1b[2K");
        let _ = io::stdout().flush();
        self.transcript.hide_typing();
    }

    fn reset_to_welcome(&mut self) {
        self.transcript.reset_to_welcome();
        println!();
        self.print_welcome();
    }

    fn show_loading(&mut self) {
        println!("Uploading resume...");
        self.transcript.show_loading();
    }

    fn hide_loading(&mut self) {
        self.transcript.hide_loading();
    }

    fn alert(&mut self, message: &str) {
        println!("! {}", printable(message));
        self.transcript.alert(message);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        let _ = io::stdout().flush();
        match read_line() {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(name: "terminal.confirm.read_failed", error = %e, "Could not read answer");
                false
            }
        }
    }

    fn set_resume_preview(&mut self, filename: Option<&str>) {
        if let Some(name) = filename {
            println!("[resume: {}]", printable(name));
        }
        self.transcript.set_resume_preview(filename);
    }

    fn set_title(&mut self, title: &str) {
        println!("== {} ==", printable(title));
        self.transcript.set_title(title);
    }

    fn set_animations_enabled(&mut self, enabled: bool) {
        self.transcript.set_animations_enabled(enabled);
    }

    fn set_theme(&mut self, theme: &str) {
        self.transcript.set_theme(theme);
    }
}

/// Read commands until `/quit` or end of input.
pub async fn run<B: ChatBackend>(
    controller: &mut ChatSessionController<B, TerminalView>,
) -> anyhow::Result<()> {
    println!("== {} ==", printable(controller.view().transcript().title()));
    controller.view().print_welcome();
    println!("(type /help for commands)");

    loop {
        print!("you> ");
        io::stdout().flush()?;
        let Some(line) = read_line()? else {
            break;
        };

        match Command::parse(&line) {
            Command::Message(text) => {
                controller.submit_user_message(&text).await;
            }
            Command::New => controller.start_new_chat(),
            Command::Clear => {
                controller.clear_chat().await;
            }
            Command::Upload(path) => {
                let file = match path.map(ResumeFile::from_path).transpose() {
                    Ok(file) => file,
                    Err(e) => {
                        controller.view_mut().alert(&format!("Could not read file: {e}"));
                        continue;
                    }
                };
                controller.upload_resume(file).await;
            }
            Command::RemoveResume => controller.remove_resume(),
            Command::Theme(name) => {
                if let Err(e) = controller.set_theme(&name) {
                    tracing::warn!(name: "preferences.save_failed", error = %e, "Could not save theme");
                }
                println!("Theme: {}", printable(&name));
            }
            Command::Animations(enabled) => {
                if let Err(e) = controller.set_animations_enabled(enabled) {
                    tracing::warn!(name: "preferences.save_failed", error = %e, "Could not save animation setting");
                }
                println!("Animations {}", if enabled { "on" } else { "off" });
            }
            Command::Export(path) => {
                let html = controller.view().transcript().page_html();
                match std::fs::write(&path, html) {
                    Ok(()) => println!("Transcript saved to {}", path.display()),
                    Err(e) => controller
                        .view_mut()
                        .alert(&format!("Could not write {}: {e}", path.display())),
                }
            }
            Command::Copy(n) => match controller.view().transcript().message_text(n - 1) {
                Some(text) => {
                    print!("{}", clipboard_sequence(text));
                    println!("Copied message {n}.");
                }
                None => println!("No message {n}."),
            },
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Invalid(input) => println!("Unknown command: {input} (try /help)"),
        }
    }

    Ok(())
}
