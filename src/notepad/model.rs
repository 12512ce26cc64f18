use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The sentinel note every fresh install starts with.
pub const DEFAULT_NOTE_ID: &str = "note--1";

pub const NOTE_PREFIX: &str = "note-";
pub const NOTEBOOK_PREFIX: &str = "notebook-";

/// Placeholder shown when a header is renamed to an empty string.
pub const UNNAMED: &str = "no name";

pub const DEFAULT_NOTE_NAME: &str = "new note";
pub const DEFAULT_NOTEBOOK_NAME: &str = "new notebook";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Note,
    Notebook,
}

impl Kind {
    /// The kind is encoded in the id prefix; anything that is not a
    /// notebook is treated as a note.
    pub fn of(id: &str) -> Kind {
        if id.starts_with(NOTEBOOK_PREFIX) {
            Kind::Notebook
        } else {
            Kind::Note
        }
    }
}

/// Metadata record for one note or notebook. The full set of headers is
/// persisted as a single ordered list under the `headers` key; note content
/// and cursor bookmarks live in sibling `<id>-content` / `<id>-bookmark`
/// entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Transient: true for at most one header, overridden on load by the
    /// stored `selected` key.
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl Header {
    pub fn note(name: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            id: format!("{}{}", NOTE_PREFIX, Uuid::new_v4()),
            name: name.into(),
            parent,
            selected: false,
        }
    }

    pub fn notebook(name: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            id: format!("{}{}", NOTEBOOK_PREFIX, Uuid::new_v4()),
            name: name.into(),
            parent,
            selected: false,
        }
    }

    /// Seed header applied when the registry key is absent.
    pub fn seed() -> Self {
        Self {
            id: DEFAULT_NOTE_ID.to_string(),
            name: "First note".to_string(),
            parent: None,
            selected: true,
        }
    }

    pub fn kind(&self) -> Kind {
        Kind::of(&self.id)
    }

    /// Display name, falling back to the placeholder for empty names.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            UNNAMED
        } else {
            &self.name
        }
    }
}

/// Storage key holding a note's rich-text markup.
pub fn content_key(id: &str) -> String {
    format!("{}-content", id)
}

/// Storage key holding a note's opaque cursor bookmark.
pub fn bookmark_key(id: &str) -> String {
    format!("{}-bookmark", id)
}
