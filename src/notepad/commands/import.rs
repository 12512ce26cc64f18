use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotepadError, Result};
use crate::model::{bookmark_key, content_key, Header};
use crate::registry::{self, HEADERS_KEY};
use crate::store::PrefStore;
use serde_json::Value;

/// Merge an exported JSON blob into the store. Incoming headers replace
/// same-id existing ones and are appended after the rest; their content and
/// bookmark entries are overwritten. Everything lands in one store write.
pub fn run<S: PrefStore>(store: &mut S, json: &str, max_bytes: u64) -> Result<CmdResult> {
    if json.len() as u64 > max_bytes {
        return Err(NotepadError::ImportTooLarge {
            size: json.len() as u64,
            limit: max_bytes,
        });
    }

    let value: Value = serde_json::from_str(json)?;
    let incoming: Vec<Header> = match value.get("headers") {
        Some(headers) => serde_json::from_value(headers.clone())?,
        None => return Err(NotepadError::Api("import has no headers".to_string())),
    };

    let incoming_ids: Vec<&str> = incoming.iter().map(|h| h.id.as_str()).collect();
    let mut headers = registry::stored(store)?;
    headers.retain(|h| !incoming_ids.contains(&h.id.as_str()));
    headers.extend(incoming.iter().cloned());

    let mut entries = vec![(HEADERS_KEY.to_string(), serde_json::to_value(&headers)?)];
    for header in &incoming {
        for key in [content_key(&header.id), bookmark_key(&header.id)] {
            if let Some(entry) = value.get(&key) {
                entries.push((key, entry.clone()));
            }
        }
    }
    store.set(entries)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Imported {} header(s)",
        incoming.len()
    )));
    Ok(result.with_affected(incoming))
}
