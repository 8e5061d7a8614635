use resume_chat::config::AppConfig;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    // SAFETY: tests touching the environment are serialized with #[serial].
    unsafe {
        env::remove_var("RESUME_CHAT__BACKEND__BASE_URL");
        env::remove_var("RESUME_CHAT__UI__WELCOME_MESSAGE");
        env::remove_var("BACKEND_URL");
        env::remove_var("PREFERENCES_FILE");
        env::remove_var("LOG_JSON");
        env::remove_var("CONFIG_FILE");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    // Explicit args so the test runner's own arguments are not parsed.
    let config = AppConfig::load_from_args(["resume-chat"]).expect("defaults should load");

    assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
    assert_eq!(
        config.ui.preferences_path,
        PathBuf::from("resume-chat-preferences.json")
    );
    assert!(!config.logging.json);
    assert!(!config.ui.welcome_message.is_empty());
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    // SAFETY: serialized with #[serial].
    unsafe {
        env::set_var("RESUME_CHAT__BACKEND__BASE_URL", "http://chat.internal:8080");
    }

    let config = AppConfig::load_from_args(["resume-chat"]).expect("Failed to load config");
    assert_eq!(config.backend.base_url, "http://chat.internal:8080");

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_beats_env() {
    clear_env_vars();
    // SAFETY: serialized with #[serial].
    unsafe {
        env::set_var("RESUME_CHAT__BACKEND__BASE_URL", "http://from-env:1");
    }

    let config = AppConfig::load_from_args([
        "resume-chat",
        "--base-url",
        "http://from-cli:2",
        "--log-json",
        "true",
    ])
    .expect("Failed to load config");
    assert_eq!(config.backend.base_url, "http://from-cli:2");
    assert!(config.logging.json);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("chat.yaml");
    fs::write(
        &file_path,
        r#"
backend:
  base_url: "http://file-config:7070"
ui:
  welcome_message: "Hi from file"
    "#,
    )
    .expect("Failed to write temp config");

    let config = AppConfig::load_from_args([
        "resume-chat",
        "--config",
        file_path.to_str().expect("utf-8 path"),
    ])
    .expect("Failed to load config from file");

    assert_eq!(config.backend.base_url, "http://file-config:7070");
    assert_eq!(config.ui.welcome_message, "Hi from file");
    // Keys missing from the file keep their defaults.
    assert!(!config.logging.json);
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args(["resume-chat", "--config", "/nonexistent/chat.yaml"]);
    assert!(result.is_err());
}
