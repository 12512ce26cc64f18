//! Tree Projection: the in-memory parent-indexed view of the registry.
//!
//! Built once when the sidebar opens and mutated incrementally afterwards.
//! It is a read-optimization layer only; the registry stays the source of
//! truth and the cache is never persisted.

use crate::error::{NotepadError, Result};
use crate::model::{Header, Kind};
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Default)]
pub struct TreeCache {
    cache: HashMap<String, Header>,
    /// Child ids per parent id; the `None` bucket holds the roots.
    children: HashMap<Option<String>, Vec<String>>,
}

impl TreeCache {
    /// Build the cache from the flat header list. Headers whose parent is
    /// not yet known are requeued so forward references resolve on a later
    /// pass; total visits are bounded by `3 × header count`, past which an
    /// unresolved parent is dropped and the header attaches at root. This
    /// terminates even for cyclic or dangling parent chains.
    pub fn build(headers: Vec<Header>) -> TreeCache {
        let mut tree = TreeCache::default();
        let max = headers.len() * 3;
        let mut queue: VecDeque<Header> = headers.into();
        let mut visits = 0;
        while let Some(mut header) = queue.pop_front() {
            visits += 1;
            if visits > max {
                header.parent = None;
            }
            match &header.parent {
                Some(parent) if !tree.cache.contains_key(parent) => queue.push_back(header),
                _ => tree.insert(header),
            }
        }
        tree
    }

    fn insert(&mut self, header: Header) {
        self.children
            .entry(header.parent.clone())
            .or_default()
            .push(header.id.clone());
        self.cache.insert(header.id.clone(), header);
    }

    /// Attach one header. An unknown parent is dropped to root, the same
    /// self-healing rule the bulk build applies.
    pub fn add(&mut self, mut header: Header) {
        if let Some(parent) = &header.parent {
            if !self.cache.contains_key(parent) {
                header.parent = None;
            }
        }
        self.insert(header);
    }

    pub fn get(&self, id: &str) -> Option<&Header> {
        self.cache.get(id)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cache.contains_key(id)
    }

    /// Child ids of a notebook, or the roots for `None`. Insertion order.
    pub fn children_of(&self, parent: Option<&str>) -> &[String] {
        self.children
            .get(&parent.map(str::to_string))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ids of the whole subtree below `id`, depth first, `id` excluded.
    pub fn descendants(&self, id: &str) -> Vec<String> {
        let mut found = Vec::new();
        let mut stack: Vec<String> = self.children_of(Some(id)).to_vec();
        while let Some(current) = stack.pop() {
            stack.extend(self.children_of(Some(&current)).iter().cloned());
            found.push(current);
        }
        found
    }

    /// Remove a header and its whole subtree from the cache. Returns the
    /// removed ids, the header itself first.
    pub fn remove(&mut self, id: &str) -> Vec<String> {
        let mut removed = vec![id.to_string()];
        removed.extend(self.descendants(id));
        for rid in &removed {
            if let Some(header) = self.cache.remove(rid) {
                self.detach(&header.parent, rid);
            }
            self.children.remove(&Some(rid.clone()));
        }
        removed
    }

    fn detach(&mut self, parent: &Option<String>, id: &str) {
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.retain(|s| s != id);
        }
    }

    /// Reparent `id` under `new_parent` (`None` for root). Moving a node
    /// under itself or one of its own descendants is rejected and the tree
    /// is left unchanged.
    pub fn move_header(&mut self, id: &str, new_parent: Option<&str>) -> Result<()> {
        if !self.cache.contains_key(id) {
            return Err(NotepadError::HeaderNotFound(id.to_string()));
        }
        if let Some(target) = new_parent {
            let header = self
                .cache
                .get(target)
                .ok_or_else(|| NotepadError::HeaderNotFound(target.to_string()))?;
            if header.kind() != Kind::Notebook {
                return Err(NotepadError::NotANotebook(target.to_string()));
            }
            if target == id || self.descendants(id).iter().any(|d| d == target) {
                return Err(NotepadError::InvalidMove {
                    id: id.to_string(),
                    target: target.to_string(),
                });
            }
        }
        let old_parent = self.cache[id].parent.clone();
        self.detach(&old_parent, id);
        let new_parent = new_parent.map(str::to_string);
        self.children
            .entry(new_parent.clone())
            .or_default()
            .push(id.to_string());
        if let Some(header) = self.cache.get_mut(id) {
            header.parent = new_parent;
        }
        Ok(())
    }

    /// Mark `id` selected and clear the previous selection.
    pub fn select(&mut self, id: &str) -> Result<()> {
        if !self.cache.contains_key(id) {
            return Err(NotepadError::HeaderNotFound(id.to_string()));
        }
        for header in self.cache.values_mut() {
            header.selected = header.id == id;
        }
        Ok(())
    }

    pub fn selected(&self) -> Option<&Header> {
        self.cache.values().find(|h| h.selected)
    }

    pub fn rename(&mut self, id: &str, name: &str) {
        if let Some(header) = self.cache.get_mut(id) {
            header.name = name.to_string();
        }
    }

    /// Closest notebook for new siblings: `id` itself when it is a
    /// notebook, otherwise its parent.
    pub fn closest_notebook(&self, id: &str) -> Option<String> {
        let header = self.cache.get(id)?;
        match header.kind() {
            Kind::Notebook => Some(header.id.clone()),
            Kind::Note => header.parent.clone(),
        }
    }
}
