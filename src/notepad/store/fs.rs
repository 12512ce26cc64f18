use super::PrefStore;
use crate::error::{NotepadError, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const PREFS_FILENAME: &str = "prefs.json";

/// File-backed preference store. The whole map lives in one `prefs.json`;
/// every `set`/`remove` is a read-modify-write ending in a single file
/// write, which is the store's atomicity unit.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn prefs_path(&self) -> PathBuf {
        self.root.join(PREFS_FILENAME)
    }

    fn load_map(&self) -> Result<BTreeMap<String, Value>> {
        let path = self.prefs_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path).map_err(NotepadError::Io)?;
        let map: BTreeMap<String, Value> =
            serde_json::from_str(&content).map_err(NotepadError::Serialization)?;
        Ok(map)
    }

    fn save_map(&self, map: &BTreeMap<String, Value>) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(NotepadError::Io)?;
        }
        let content = serde_json::to_string_pretty(map).map_err(NotepadError::Serialization)?;
        fs::write(self.prefs_path(), content).map_err(NotepadError::Io)?;
        Ok(())
    }
}

impl PrefStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.load_map()?.get(key).cloned())
    }

    fn set(&mut self, entries: Vec<(String, Value)>) -> Result<()> {
        let mut map = self.load_map()?;
        for (key, value) in entries {
            map.insert(key, value);
        }
        self.save_map(&map)
    }

    fn remove(&mut self, keys: &[String]) -> Result<()> {
        let mut map = self.load_map()?;
        for key in keys {
            map.remove(key);
        }
        self.save_map(&map)
    }

    fn snapshot(&self) -> Result<BTreeMap<String, Value>> {
        self.load_map()
    }
}
