use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotepadError, Result};
use crate::model::{bookmark_key, content_key, Kind};
use crate::registry;
use crate::store::PrefStore;
use crate::tree::TreeCache;

/// Delete one note: its header and both content entries. The selection key
/// is cleared when it pointed at the deleted id.
pub fn note<S: PrefStore>(store: &mut S, tree: &mut TreeCache, id: &str) -> Result<CmdResult> {
    let header = registry::list(store)?
        .into_iter()
        .find(|h| h.id == id)
        .ok_or_else(|| NotepadError::HeaderNotFound(id.to_string()))?;
    if header.kind() != Kind::Note {
        return Err(NotepadError::Api(format!(
            "{} is a notebook; delete it as one",
            id
        )));
    }

    registry::delete(store, id)?;
    store.remove(&[content_key(id), bookmark_key(id)])?;
    clear_selection_if_deleted(store, std::slice::from_ref(&id.to_string()))?;
    tree.remove(id);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Note deleted: {}",
        header.display_name()
    )));
    Ok(result.with_removed(vec![id.to_string()]))
}

/// Delete a notebook and its whole subtree, including the content entries
/// of every descendant note.
pub fn notebook<S: PrefStore>(store: &mut S, tree: &mut TreeCache, id: &str) -> Result<CmdResult> {
    let header = registry::list(store)?
        .into_iter()
        .find(|h| h.id == id)
        .ok_or_else(|| NotepadError::HeaderNotFound(id.to_string()))?;
    if header.kind() != Kind::Notebook {
        return Err(NotepadError::NotANotebook(id.to_string()));
    }

    let removed = tree.remove(id);
    registry::delete_many(store, &removed)?;

    let mut keys = Vec::new();
    for rid in &removed {
        if Kind::of(rid) == Kind::Note {
            keys.push(content_key(rid));
            keys.push(bookmark_key(rid));
        }
    }
    if !keys.is_empty() {
        store.remove(&keys)?;
    }
    clear_selection_if_deleted(store, &removed)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Notebook deleted with {} item(s): {}",
        removed.len() - 1,
        header.display_name()
    )));
    Ok(result.with_removed(removed))
}

fn clear_selection_if_deleted<S: PrefStore>(store: &mut S, removed: &[String]) -> Result<()> {
    let selected = registry::selected_id(store)?;
    if removed.contains(&selected) {
        store.remove(&[registry::SELECTED_KEY.to_string()])?;
    }
    Ok(())
}
