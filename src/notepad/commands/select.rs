use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotepadError, Result};
use crate::registry;
use crate::store::PrefStore;
use crate::tree::TreeCache;

/// Mark a header as the focused one and persist the `selected` key.
pub fn run<S: PrefStore>(store: &mut S, tree: &mut TreeCache, id: &str) -> Result<CmdResult> {
    tree.select(id)?;
    registry::set_selected(store, id)?;

    let header = tree
        .get(id)
        .cloned()
        .ok_or_else(|| NotepadError::HeaderNotFound(id.to_string()))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "Selected: {}",
        header.display_name()
    )));
    Ok(result.with_affected(vec![header]))
}
