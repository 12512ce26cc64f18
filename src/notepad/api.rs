//! # API Facade
//!
//! Thin entry point over the command layer for UI clients. It owns the
//! preference store and the tree cache, dispatches to `commands/*`, and
//! returns structured results; no business logic and no I/O concerns live
//! here.

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::model::Header;
use crate::registry;
use crate::store::PrefStore;
use crate::tree::TreeCache;

/// The main facade for sidebar-level operations.
///
/// Generic over [`PrefStore`] so production code runs on `FileStore` and
/// tests on `InMemoryStore`.
pub struct NotepadApi<S: PrefStore> {
    store: S,
    tree: TreeCache,
}

impl<S: PrefStore> NotepadApi<S> {
    /// Open the sidebar: list the registry (seeding on first use) and build
    /// the tree projection from it.
    pub fn open(store: S) -> Result<Self> {
        let tree = TreeCache::build(registry::list(&store)?);
        Ok(Self { store, tree })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tree(&self) -> &TreeCache {
        &self.tree
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn headers(&self) -> Result<Vec<Header>> {
        registry::list(&self.store)
    }

    pub fn ancestry(&self, id: &str) -> Result<Vec<Header>> {
        registry::ancestry(&self.store, id)
    }

    pub fn add_note(&mut self, name: Option<&str>) -> Result<CmdResult> {
        commands::add::note(&mut self.store, &mut self.tree, name)
    }

    pub fn add_notebook(&mut self, name: Option<&str>) -> Result<CmdResult> {
        commands::add::notebook(&mut self.store, &mut self.tree, name)
    }

    pub fn rename(&mut self, id: &str, name: &str) -> Result<CmdResult> {
        commands::rename::run(&mut self.store, &mut self.tree, id, name)
    }

    pub fn delete_note(&mut self, id: &str) -> Result<CmdResult> {
        commands::delete::note(&mut self.store, &mut self.tree, id)
    }

    pub fn delete_notebook(&mut self, id: &str) -> Result<CmdResult> {
        commands::delete::notebook(&mut self.store, &mut self.tree, id)
    }

    pub fn move_header(&mut self, id: &str, new_parent: Option<&str>) -> Result<CmdResult> {
        commands::move_header::run(&mut self.store, &mut self.tree, id, new_parent)
    }

    pub fn select(&mut self, id: &str) -> Result<CmdResult> {
        commands::select::run(&mut self.store, &mut self.tree, id)
    }

    pub fn export_json(&self) -> Result<String> {
        commands::export::run(&self.store)
    }

    /// Import and rebuild the projection, the extension-reload equivalent.
    pub fn import_json(&mut self, json: &str, max_bytes: u64) -> Result<CmdResult> {
        let result = commands::import::run(&mut self.store, json, max_bytes)?;
        self.tree = TreeCache::build(registry::list(&self.store)?);
        Ok(result)
    }
}
