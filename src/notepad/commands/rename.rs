use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotepadError, Result};
use crate::model::UNNAMED;
use crate::registry;
use crate::store::PrefStore;
use crate::tree::TreeCache;

/// Rename a note or notebook. An empty name becomes the placeholder.
pub fn run<S: PrefStore>(
    store: &mut S,
    tree: &mut TreeCache,
    id: &str,
    name: &str,
) -> Result<CmdResult> {
    let headers = registry::list(store)?;
    let mut header = headers
        .iter()
        .find(|h| h.id == id)
        .cloned()
        .ok_or_else(|| NotepadError::HeaderNotFound(id.to_string()))?;

    let name = if name.is_empty() { UNNAMED } else { name };
    header.name = name.to_string();

    registry::save(store, std::slice::from_ref(&header))?;
    tree.rename(id, name);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Renamed to: {}", name)));
    Ok(result.with_affected(vec![header]))
}
