use crate::error::Result;
use crate::model::{bookmark_key, content_key};
use crate::registry;
use crate::store::PrefStore;
use serde_json::{Map, Value};

/// Serialize the whole data set: the `headers` list plus, for every header
/// id, the `<id>-content` / `<id>-bookmark` entries that exist in the store.
/// An empty store exports an empty header list, not the seed.
pub fn run<S: PrefStore>(store: &S) -> Result<String> {
    let headers = registry::stored(store)?;
    let mut object = Map::new();
    object.insert("headers".to_string(), serde_json::to_value(&headers)?);

    for header in &headers {
        for key in [content_key(&header.id), bookmark_key(&header.id)] {
            if let Some(value) = store.get(&key)? {
                object.insert(key, value);
            }
        }
    }

    Ok(serde_json::to_string_pretty(&Value::Object(object))?)
}
