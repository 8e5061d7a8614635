//! Resume Assistant Chat terminal client
//!
//! Entry point: loads configuration, sets up tracing, and runs the chat loop
//! against the configured backend.

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod terminal;

use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use resume_chat::ChatSessionController;
use resume_chat::client::HttpBackend;
use resume_chat::config::AppConfig;
use resume_chat::preferences::FilePreferenceStore;

use terminal::TerminalView;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present) before reading env-backed config
    let _ = dotenv();

    let config = AppConfig::load()?;

    init_tracing(config.logging.json);

    let backend = HttpBackend::new(&config.backend.base_url)?;
    let view = TerminalView::new(&config.ui.welcome_message);
    let preferences = FilePreferenceStore::open(&config.ui.preferences_path);

    info!(
        name: "backend.config.loaded",
        base_url = %backend.base_url(),
        preferences = %preferences.path().display(),
        "Configuration loaded"
    );

    let mut controller = ChatSessionController::new(backend, view, preferences);
    terminal::run(&mut controller).await?;

    info!(
        name: "client.stopped",
        session_id = %controller.session_id(),
        "Chat client stopped"
    );
    Ok(())
}

/// Initialize tracing (M-LOG-STRUCTURED). Logs go to stderr so they do not
/// interleave with the conversation on stdout.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
