//! User-level operations over the registry and the tree cache. Pure
//! business logic: commands take the store and the cache, return structured
//! results, and never touch a terminal. Confirmation of destructive
//! operations is the caller's job.

use crate::model::Header;

pub mod add;
pub mod append;
pub mod delete;
pub mod export;
pub mod import;
pub mod move_header;
pub mod rename;
pub mod select;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Headers created or modified by the command.
    pub affected: Vec<Header>,
    /// Ids removed by a delete, subtree included.
    pub removed: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, headers: Vec<Header>) -> Self {
        self.affected = headers;
        self
    }

    pub fn with_removed(mut self, ids: Vec<String>) -> Self {
        self.removed = ids;
        self
    }
}
