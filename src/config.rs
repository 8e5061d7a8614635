use std::path::PathBuf;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Config file looked up in the working directory when none is given.
const DEFAULT_CONFIG_BASENAME: &str = "resume-chat";

/// Prefix of environment overrides, e.g. `RESUME_CHAT__BACKEND__BASE_URL`.
const ENV_PREFIX: &str = "RESUME_CHAT";

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal client for the resume assistant chat", long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Base URL of the chat backend
    #[arg(long, env = "BACKEND_URL")]
    pub base_url: Option<String>,

    /// Preferences file path
    #[arg(long, env = "PREFERENCES_FILE")]
    pub preferences: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub welcome_message: String,
    pub preferences_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub json: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Priority: CLI flag (or its env var) > `RESUME_CHAT__*` env > config file > defaults.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("backend.base_url", "http://127.0.0.1:5000")?
            .set_default(
                "ui.welcome_message",
                "Hello! I'm your AI assistant. Upload your resume or ask me anything about your career.",
            )?
            .set_default("ui.preferences_path", "resume-chat-preferences.json")?
            .set_default("logging.json", false)?;

        builder = match &cli.config {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(url) = cli.base_url {
            builder = builder.set_override("backend.base_url", url)?;
        }
        if let Some(path) = cli.preferences {
            builder = builder.set_override("ui.preferences_path", path.to_string_lossy().into_owned())?;
        }
        if let Some(json) = cli.log_json {
            builder = builder.set_override("logging.json", json)?;
        }

        builder.build()?.try_deserialize()
    }
}
