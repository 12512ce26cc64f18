//! # Notepad Architecture
//!
//! Notepad is a **UI-agnostic note-keeping library**: the persistence,
//! tree, session, and routing core of a hierarchical notepad, with a CLI
//! client on the side.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, prints results, confirms destructive   │
//! │    operations — the only place that knows about a terminal  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) + Messaging Router (router.rs)          │
//! │  - NotepadApi: facade over sidebar commands                 │
//! │  - Background: context object dispatching cross-context     │
//! │    requests and owning the live-port registry               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain Layer (commands/, registry.rs, tree.rs, session.rs) │
//! │  - Pure logic over headers, the tree cache, and sessions    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract PrefStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data model
//!
//! All note/notebook metadata lives in one flat, ordered header list under
//! the `headers` key; hierarchy is expressed through parent pointers and
//! projected into [`tree::TreeCache`] for the sidebar. Note content and
//! cursor bookmarks are separate `<id>-content` / `<id>-bookmark` entries,
//! so listing never loads content.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade for sidebar-level operations
//! - [`commands`]: business logic for each operation
//! - [`registry`]: the persisted flat header list
//! - [`tree`]: the parent-indexed projection of the registry
//! - [`session`]: the debounced editor session state machine
//! - [`router`]: request dispatch and live editor connections
//! - [`store`]: storage abstraction and implementations
//! - [`model`]: core data types (`Header`, `Kind`)
//! - [`config`]: configuration management
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod router;
pub mod session;
pub mod store;
pub mod tree;
