use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotepadError, Result};
use crate::registry;
use crate::store::PrefStore;
use crate::tree::TreeCache;

/// Reparent a header. Cycle-producing moves are rejected by the tree cache
/// before anything is persisted, so the registry and the cache stay in step.
pub fn run<S: PrefStore>(
    store: &mut S,
    tree: &mut TreeCache,
    id: &str,
    new_parent: Option<&str>,
) -> Result<CmdResult> {
    tree.move_header(id, new_parent)?;

    let header = tree
        .get(id)
        .cloned()
        .ok_or_else(|| NotepadError::HeaderNotFound(id.to_string()))?;
    registry::save(store, std::slice::from_ref(&header))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(match new_parent {
        Some(parent) => format!("Moved {} under {}", header.display_name(), parent),
        None => format!("Moved {} to the root", header.display_name()),
    }));
    Ok(result.with_affected(vec![header]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn move_persists_new_parent() {
        let mut store = InMemoryStore::new();
        let mut tree = TreeCache::build(registry::list(&store).unwrap());
        let book = add::notebook(&mut store, &mut tree, Some("Work")).unwrap().affected[0]
            .id
            .clone();
        let note = add::note(&mut store, &mut tree, Some("loose")).unwrap().affected[0]
            .id
            .clone();

        run(&mut store, &mut tree, &note, None).unwrap();
        let stored = registry::list(&store).unwrap();
        assert_eq!(
            stored.iter().find(|h| h.id == note).unwrap().parent,
            None
        );

        run(&mut store, &mut tree, &note, Some(&book)).unwrap();
        let stored = registry::list(&store).unwrap();
        assert_eq!(
            stored.iter().find(|h| h.id == note).unwrap().parent.as_deref(),
            Some(book.as_str())
        );
    }

    #[test]
    fn rejected_move_leaves_registry_untouched() {
        let mut store = InMemoryStore::new();
        let mut tree = TreeCache::build(registry::list(&store).unwrap());
        let outer = add::notebook(&mut store, &mut tree, Some("Outer")).unwrap().affected[0]
            .id
            .clone();
        let inner = add::notebook(&mut store, &mut tree, Some("Inner")).unwrap().affected[0]
            .id
            .clone();

        let err = run(&mut store, &mut tree, &outer, Some(&inner));
        assert!(matches!(err, Err(NotepadError::InvalidMove { .. })));

        let stored = registry::list(&store).unwrap();
        assert_eq!(stored.iter().find(|h| h.id == outer).unwrap().parent, None);
    }
}
