//! Resume Assistant Chat Client
//!
//! Client side of a resume-assistant chat: an in-memory session, a backend
//! exchange over HTTP, and a view layer that renders messages with an
//! explicit escaping policy.
//!
//! # Architecture
//!
//! - **Controller**: [`controller::ChatSessionController`] owns the session and drives every user action
//! - **Backend**: [`client::ChatBackend`] seam with a reqwest implementation
//! - **View**: [`view::ChatView`] seam with an HTML transcript implementation
//! - **Preferences**: flat key/value store for cosmetic settings
//!
//! # Modules
//!
//! - [`client`]: backend trait, HTTP client, wire types
//! - [`config`]: layered application configuration
//! - [`controller`]: the chat session controller
//! - [`preferences`]: preference storage
//! - [`render`]: escaping and message formatting
//! - [`session`]: session, message and resume state
//! - [`view`]: render-layer trait and HTML transcript

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod preferences;
pub mod render;
pub mod session;
pub mod view;

pub use controller::{ChatSessionController, SubmitOutcome, UploadOutcome};
pub use error::{Error, Result};
