//! Note Registry: the persisted flat list of headers.
//!
//! The registry is one ordered list stored under the `headers` key. There is
//! no partial-failure handling: every mutation re-persists the whole list in
//! one key write, and a failed write surfaces as an error with no retry.

use crate::error::{NotepadError, Result};
use crate::model::{Header, DEFAULT_NOTE_ID};
use crate::store::PrefStore;
use serde_json::Value;

pub const HEADERS_KEY: &str = "headers";
pub const SELECTED_KEY: &str = "selected";

/// Headers exactly as stored; empty when the key is absent. Export reads
/// this, so an empty store exports empty instead of the seed.
pub fn stored<S: PrefStore>(store: &S) -> Result<Vec<Header>> {
    match store.get(HEADERS_KEY)? {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(Vec::new()),
    }
}

/// Ordered header list with the seed applied on first use and per-header
/// `selected` flags overridden by the stored `selected` key.
pub fn list<S: PrefStore>(store: &S) -> Result<Vec<Header>> {
    let headers = match store.get(HEADERS_KEY)? {
        Some(value) => serde_json::from_value(value)?,
        None => vec![Header::seed()],
    };
    let selected = selected_id(store)?;
    Ok(headers
        .into_iter()
        .map(|mut h: Header| {
            h.selected = h.id == selected;
            h
        })
        .collect())
}

/// Id of the last-focused header, defaulting to the seed note.
pub fn selected_id<S: PrefStore>(store: &S) -> Result<String> {
    Ok(store
        .get(SELECTED_KEY)?
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_NOTE_ID.to_string()))
}

pub fn set_selected<S: PrefStore>(store: &mut S, id: &str) -> Result<()> {
    store.set(vec![(SELECTED_KEY.to_string(), Value::String(id.into()))])
}

/// Merge the given headers into the stored list by id: matching entries are
/// replaced in place, new ones are appended. Returns the persisted list.
pub fn save<S: PrefStore>(store: &mut S, changes: &[Header]) -> Result<Vec<Header>> {
    let mut headers = list(store)?;
    for header in &mut headers {
        if let Some(change) = changes.iter().find(|c| c.id == header.id) {
            *header = change.clone();
        }
    }
    for change in changes {
        if !headers.iter().any(|h| h.id == change.id) {
            headers.push(change.clone());
        }
    }
    persist(store, &headers)?;
    Ok(headers)
}

/// Remove one header. Content entries are cleaned up separately.
pub fn delete<S: PrefStore>(store: &mut S, id: &str) -> Result<()> {
    delete_many(store, std::slice::from_ref(&id.to_string()))
}

/// Remove every header whose id is in `ids`, in one key write.
pub fn delete_many<S: PrefStore>(store: &mut S, ids: &[String]) -> Result<()> {
    let mut headers = list(store)?;
    let before = headers.len();
    headers.retain(|h| !ids.contains(&h.id));
    if headers.len() == before {
        return Err(NotepadError::HeaderNotFound(ids.join(", ")));
    }
    persist(store, &headers)
}

/// Root-to-id path of headers, for the editor title bar. A broken parent
/// link simply ends the walk.
pub fn ancestry<S: PrefStore>(store: &S, id: &str) -> Result<Vec<Header>> {
    let headers = list(store)?;
    let mut path = Vec::new();
    let mut cursor = headers.iter().find(|h| h.id == id);
    while let Some(header) = cursor {
        // A self-referencing parent would loop forever.
        if path.iter().any(|h: &Header| h.id == header.id) {
            break;
        }
        path.insert(0, header.clone());
        cursor = header
            .parent
            .as_ref()
            .and_then(|p| headers.iter().find(|h| &h.id == p));
    }
    if path.is_empty() {
        return Err(NotepadError::HeaderNotFound(id.to_string()));
    }
    Ok(path)
}

pub fn persist<S: PrefStore>(store: &mut S, headers: &[Header]) -> Result<()> {
    let value = serde_json::to_value(headers)?;
    store.set(vec![(HEADERS_KEY.to_string(), value)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn empty_store_lists_seed() {
        let store = InMemoryStore::new();
        let headers = list(&store).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].id, DEFAULT_NOTE_ID);
        assert!(headers[0].selected);
    }

    #[test]
    fn stored_does_not_seed() {
        let store = InMemoryStore::new();
        assert!(stored(&store).unwrap().is_empty());
    }

    #[test]
    fn save_merges_by_id() {
        let mut store = InMemoryStore::new();
        let note = Header::note("a", None);
        save(&mut store, &[note.clone()]).unwrap();

        let mut renamed = note.clone();
        renamed.name = "b".into();
        let headers = save(&mut store, &[renamed]).unwrap();

        // seed + the merged note, not three entries
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[1].name, "b");
    }

    #[test]
    fn selected_key_overrides_flags() {
        let mut store = InMemoryStore::new();
        let note = Header::note("a", None);
        save(&mut store, &[note.clone()]).unwrap();
        set_selected(&mut store, &note.id).unwrap();

        let headers = list(&store).unwrap();
        assert!(!headers[0].selected); // the seed lost selection
        assert!(headers[1].selected);
    }

    #[test]
    fn delete_removes_only_matching() {
        let mut store = InMemoryStore::new();
        let a = Header::note("a", None);
        let b = Header::note("b", None);
        save(&mut store, &[a.clone(), b.clone()]).unwrap();

        delete(&mut store, &a.id).unwrap();
        let headers = list(&store).unwrap();
        assert!(headers.iter().all(|h| h.id != a.id));
        assert!(headers.iter().any(|h| h.id == b.id));
    }

    #[test]
    fn delete_unknown_is_an_error() {
        let mut store = InMemoryStore::new();
        assert!(delete(&mut store, "note-missing").is_err());
    }

    #[test]
    fn ancestry_walks_to_root() {
        let mut store = InMemoryStore::new();
        let book = Header::notebook("Work", None);
        let note = Header::note("todo", Some(book.id.clone()));
        save(&mut store, &[book.clone(), note.clone()]).unwrap();

        let path = ancestry(&store, &note.id).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[0].id, book.id);
        assert_eq!(path[1].id, note.id);
    }
}
