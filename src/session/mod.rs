//! Client-side chat session state.
//!
//! A [`Session`] is the conversation identity the backend keys its own state
//! by. It owns the ordered message log and the optional resume reference for
//! the current page lifetime. Nothing here is persisted.
//!
//! # Architecture
//!
//! - [`Session`]: identifier, message log, resume reference
//! - [`Message`]: one turn, authored by the user or the assistant
//! - [`ResumeInfo`]: metadata of the uploaded resume
//!
//! # Example
//!
//! ```rust
//! use resume_chat::session::{MessageRole, Session};
//!
//! let mut session = Session::new();
//! session.add_user_message("Hello!");
//!
//! assert_eq!(session.message_count(), 1);
//! assert_eq!(session.messages()[0].role, MessageRole::User);
//! ```

mod thread;

pub use thread::{Message, MessageRole, ResumeInfo, Session, generate_session_id};
