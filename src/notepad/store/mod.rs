//! # Preference Store
//!
//! The [`PrefStore`] trait is the flat key-value persistence contract the
//! rest of the crate is written against. Keys are plain strings; composite
//! records (the header list, bookmarks) are serialized into a single value.
//! One `set` call is the only atomicity unit: it either lands completely or
//! the operation is reported as failed to the caller, with no retry.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, the whole preference map in one
//!   `prefs.json` file
//! - [`memory::InMemoryStore`]: in-memory storage for tests
//!
//! ## Key layout
//!
//! ```text
//! headers            ordered list of note/notebook headers
//! selected           id of the last-focused header
//! <id>-content       rich-text markup of one note
//! <id>-bookmark      opaque cursor/selection blob of one note
//! ```

use crate::error::Result;
use serde_json::Value;
use std::collections::BTreeMap;

pub mod fs;
pub mod memory;

/// Abstract flat key-value store with single-write atomicity per `set` call.
pub trait PrefStore {
    /// Read one key, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Write all entries in one atomic operation.
    fn set(&mut self, entries: Vec<(String, Value)>) -> Result<()>;

    /// Remove the given keys. Missing keys are not an error.
    fn remove(&mut self, keys: &[String]) -> Result<()>;

    /// Full copy of the stored map, for export.
    fn snapshot(&self) -> Result<BTreeMap<String, Value>>;

    /// Read one key with a default-value fallback.
    fn get_or(&self, key: &str, default: Value) -> Result<Value> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Read a string value, treating absent and non-string values as empty.
    fn get_string(&self, key: &str) -> Result<String> {
        Ok(self
            .get(key)?
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default())
    }
}
