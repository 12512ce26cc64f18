use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Header, DEFAULT_NOTEBOOK_NAME, DEFAULT_NOTE_NAME};
use crate::registry;
use crate::store::PrefStore;
use crate::tree::TreeCache;

/// Create a note under the closest notebook of the current selection and
/// select it.
pub fn note<S: PrefStore>(
    store: &mut S,
    tree: &mut TreeCache,
    name: Option<&str>,
) -> Result<CmdResult> {
    let name = match name {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => DEFAULT_NOTE_NAME.to_string(),
    };
    let parent = tree
        .selected()
        .and_then(|selected| tree.closest_notebook(&selected.id));

    let mut header = Header::note(name, parent);
    header.selected = true;

    registry::save(store, std::slice::from_ref(&header))?;
    registry::set_selected(store, &header.id)?;
    tree.add(header.clone());
    tree.select(&header.id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Note created: {}",
        header.display_name()
    )));
    Ok(result.with_affected(vec![header]))
}

/// Create a notebook, then auto-create and select its first note.
pub fn notebook<S: PrefStore>(
    store: &mut S,
    tree: &mut TreeCache,
    name: Option<&str>,
) -> Result<CmdResult> {
    let name = match name {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => DEFAULT_NOTEBOOK_NAME.to_string(),
    };
    let parent = tree
        .selected()
        .and_then(|selected| tree.closest_notebook(&selected.id));

    let mut header = Header::notebook(name, parent);
    header.selected = true;

    registry::save(store, std::slice::from_ref(&header))?;
    registry::set_selected(store, &header.id)?;
    tree.add(header.clone());
    tree.select(&header.id)?;

    // A notebook always starts with a note inside it; with the notebook
    // selected, the nested call parents the note under it.
    let child = note(store, tree, None)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Notebook created: {}",
        header.display_name()
    )));
    let mut affected = vec![header];
    affected.extend(child.affected);
    Ok(result.with_affected(affected))
}
