use super::PrefStore;
use crate::error::Result;
use serde_json::Value;
use std::collections::BTreeMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    prefs: BTreeMap<String, Value>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.prefs.get(key).cloned())
    }

    fn set(&mut self, entries: Vec<(String, Value)>) -> Result<()> {
        for (key, value) in entries {
            self.prefs.insert(key, value);
        }
        Ok(())
    }

    fn remove(&mut self, keys: &[String]) -> Result<()> {
        for key in keys {
            self.prefs.remove(key);
        }
        Ok(())
    }

    fn snapshot(&self) -> Result<BTreeMap<String, Value>> {
        Ok(self.prefs.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::error::NotepadError;
    use crate::model::{content_key, Header};
    use crate::registry::HEADERS_KEY;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_headers(mut self, headers: Vec<Header>) -> Self {
            let value = serde_json::to_value(&headers).unwrap();
            self.store
                .set(vec![(HEADERS_KEY.to_string(), value)])
                .unwrap();
            self
        }

        pub fn with_content(mut self, id: &str, content: &str) -> Self {
            self.store
                .set(vec![(content_key(id), Value::String(content.into()))])
                .unwrap();
            self
        }
    }

    /// Store whose writes can be made to fail, for store-unavailable paths.
    #[derive(Debug, Default)]
    pub struct FlakyStore {
        pub inner: InMemoryStore,
        pub fail_writes: bool,
    }

    impl PrefStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<Value>> {
            self.inner.get(key)
        }

        fn set(&mut self, entries: Vec<(String, Value)>) -> Result<()> {
            if self.fail_writes {
                return Err(NotepadError::Store("store unavailable".to_string()));
            }
            self.inner.set(entries)
        }

        fn remove(&mut self, keys: &[String]) -> Result<()> {
            if self.fail_writes {
                return Err(NotepadError::Store("store unavailable".to_string()));
            }
            self.inner.remove(keys)
        }

        fn snapshot(&self) -> Result<BTreeMap<String, Value>> {
            self.inner.snapshot()
        }
    }
}
