use crate::error::{NotepadError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DEBOUNCE_MS: u64 = 1000;
const DEFAULT_MAX_IMPORT_BYTES: u64 = 100_000_000;

/// Configuration, stored as config.json next to the preference store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotepadConfig {
    /// Quiet period before a dirty editor session autosaves, in ms.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Imports above this size are rejected.
    #[serde(default = "default_max_import_bytes")]
    pub max_import_bytes: u64,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_max_import_bytes() -> u64 {
    DEFAULT_MAX_IMPORT_BYTES
}

impl Default for NotepadConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_import_bytes: DEFAULT_MAX_IMPORT_BYTES,
        }
    }
}

impl NotepadConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotepadError::Io)?;
        let config: NotepadConfig =
            serde_json::from_str(&content).map_err(NotepadError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NotepadError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NotepadError::Serialization)?;
        fs::write(config_path, content).map_err(NotepadError::Io)?;
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = NotepadConfig::default();
        assert_eq!(config.debounce_ms, 1000);
        assert_eq!(config.max_import_bytes, 100_000_000);
        assert_eq!(config.debounce(), Duration::from_millis(1000));
    }

    #[test]
    fn load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = NotepadConfig::load(dir.path().join("nope")).unwrap();
        assert_eq!(config, NotepadConfig::default());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = NotepadConfig {
            debounce_ms: 250,
            max_import_bytes: 1024,
        };
        config.save(dir.path()).unwrap();

        let loaded = NotepadConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"debounce_ms": 2000}"#).unwrap();
        let loaded = NotepadConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.debounce_ms, 2000);
        assert_eq!(loaded.max_import_bytes, DEFAULT_MAX_IMPORT_BYTES);
    }
}
