//! Cosmetic UI preferences.
//!
//! Preferences live in a flat string key/value store, read once on start and
//! written on every change. There is no schema versioning: unknown or
//! malformed values are ignored.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Key for the animations toggle (`"true"` / `"false"`).
pub const ANIMATION_ENABLED_KEY: &str = "animation-enabled";

/// Key for the selected theme name.
pub const THEME_PREFERENCE_KEY: &str = "theme-preference";

/// String key/value storage for preferences.
pub trait PreferenceStore: Send {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences as read from a store. `None` means "never set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub animation_enabled: Option<bool>,
    pub theme: Option<String>,
}

impl Preferences {
    /// Read both preference keys from a store.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let animation_enabled = store
            .get(ANIMATION_ENABLED_KEY)
            .and_then(|v| match v.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            });
        let theme = store
            .get(THEME_PREFERENCE_KEY)
            .filter(|t| !t.is_empty());

        Self {
            animation_enabled,
            theme,
        }
    }
}

/// In-memory store; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object on disk.
///
/// The whole file is rewritten on every `set`. A missing file reads as an
/// empty store; an unreadable one is logged and treated the same way.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferenceStore {
    /// Open the store at `path`, loading existing values.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(
                    name: "preferences.parse_failed",
                    path = %path.display(),
                    error = %e,
                    "Ignoring malformed preferences file"
                );
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(
                    name: "preferences.read_failed",
                    path = %path.display(),
                    error = %e,
                    "Could not read preferences file"
                );
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, raw)?;
        tracing::debug!(
            name: "preferences.saved",
            key = key,
            path = %self.path.display(),
            "Preference saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_has_no_preferences() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(Preferences::load(&store), Preferences::default());
    }

    #[test]
    fn malformed_values_are_ignored() {
        let mut store = MemoryPreferenceStore::new();
        store.set(ANIMATION_ENABLED_KEY, "yes").unwrap();
        store.set(THEME_PREFERENCE_KEY, "").unwrap();

        assert_eq!(Preferences::load(&store), Preferences::default());
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut store = FilePreferenceStore::open(&path);
        assert_eq!(store.path(), path);
        store.set(ANIMATION_ENABLED_KEY, "false").unwrap();
        store.set(THEME_PREFERENCE_KEY, "cosmic").unwrap();

        let reopened = FilePreferenceStore::open(&path);
        let prefs = Preferences::load(&reopened);
        assert_eq!(prefs.animation_enabled, Some(false));
        assert_eq!(prefs.theme.as_deref(), Some("cosmic"));
    }

    #[test]
    fn malformed_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        let store = FilePreferenceStore::open(&path);
        assert!(store.get(THEME_PREFERENCE_KEY).is_none());
    }
}
