//! Editor Session: tracks the note open in an editor page, loads and saves
//! its content and cursor bookmark, and debounces autosave.
//!
//! The session owns an explicit save deadline instead of an ambient timer:
//! edit events inside the quiet window collapse into one flush when the
//! deadline passes, and the deadline is cleared on every state transition.
//! Time is passed in by the caller so the debounce is testable.

use crate::error::Result;
use crate::model::{bookmark_key, content_key};
use crate::router::{Background, PortMessage, Request};
use crate::store::PrefStore;
use serde_json::Value;
use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Seam for the opaque rich-text widget: content, cursor bookmark, and the
/// widget's own dirty flag.
pub trait RichTextWidget {
    fn content(&self) -> String;
    fn set_content(&mut self, content: &str);
    fn insert_content(&mut self, content: &str);
    fn bookmark(&self) -> Option<Value>;
    fn move_to_bookmark(&mut self, bookmark: &Value);
    fn is_dirty(&self) -> bool;
    fn set_dirty(&mut self, dirty: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Loaded,
    Dirty,
    Saving,
}

/// What the embedding page should do after a delivered port message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Handled,
    /// Focus the window.
    Raise,
    /// Flush and close the page.
    Close,
}

pub struct EditorSession<W: RichTextWidget> {
    widget: W,
    id: Option<String>,
    state: SessionState,
    debounce: Duration,
    deadline: Option<Instant>,
    bookmark_pending: bool,
}

impl<W: RichTextWidget> EditorSession<W> {
    pub fn new(widget: W, debounce: Duration) -> Self {
        Self {
            widget,
            id: None,
            state: SessionState::Empty,
            debounce,
            deadline: None,
            bookmark_pending: false,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    /// Open a note: a dirty previous note is flushed first, then content and
    /// bookmark are applied and the widget's dirty flag is forced off.
    pub fn load<S: PrefStore>(&mut self, background: &mut Background<S>, id: &str) -> Result<()> {
        if self.state == SessionState::Dirty {
            self.flush(background)?;
        }
        let content = background.store().get_string(&content_key(id))?;
        let bookmark = background
            .store()
            .get(&bookmark_key(id))?
            .filter(|v| !v.is_null());

        self.widget.set_content(&content);
        if let Some(bookmark) = &bookmark {
            self.widget.move_to_bookmark(bookmark);
        }
        self.widget.set_dirty(false);

        self.id = Some(id.to_string());
        self.state = SessionState::Loaded;
        self.deadline = None;
        self.bookmark_pending = false;
        Ok(())
    }

    /// Edit event. The first event of a burst arms the deadline; the rest of
    /// the burst rides on it, so N events in the window mean one flush.
    pub fn mark_dirty(&mut self, now: Instant) {
        if self.id.is_none() {
            return;
        }
        self.state = SessionState::Dirty;
        if self.deadline.is_none() {
            self.deadline = Some(now + self.debounce);
        }
    }

    /// Selection moved without a content edit: only the bookmark needs
    /// saving, on the same debounced deadline.
    pub fn selection_changed(&mut self, now: Instant) {
        if self.id.is_none() {
            return;
        }
        self.bookmark_pending = true;
        if self.deadline.is_none() {
            self.deadline = Some(now + self.debounce);
        }
    }

    /// Drive the debounce. Returns true when a save was sent.
    pub fn poll<S: PrefStore>(
        &mut self,
        background: &mut Background<S>,
        now: Instant,
    ) -> Result<bool> {
        match self.deadline {
            Some(deadline) if now >= deadline => {}
            _ => return Ok(false),
        }
        if self.state == SessionState::Dirty {
            self.flush(background)?;
            return Ok(true);
        }
        if self.bookmark_pending {
            self.save_bookmark(background)?;
            return Ok(true);
        }
        self.deadline = None;
        Ok(false)
    }

    /// Serialize content and bookmark and send save-note. On failure the
    /// session stays Dirty; the next triggering event or the unload hook
    /// retries.
    pub fn flush<S: PrefStore>(&mut self, background: &mut Background<S>) -> Result<()> {
        let id = match &self.id {
            Some(id) => id.clone(),
            None => return Ok(()),
        };
        if self.state != SessionState::Dirty {
            return Ok(());
        }
        self.state = SessionState::Saving;
        self.deadline = None;
        let request = Request::SaveNote {
            id,
            content: self.widget.content(),
            bookmark: self.widget.bookmark(),
        };
        match background.dispatch(request) {
            Ok(_) => {
                self.state = SessionState::Loaded;
                self.bookmark_pending = false;
                self.widget.set_dirty(false);
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Dirty;
                Err(e)
            }
        }
    }

    fn save_bookmark<S: PrefStore>(&mut self, background: &mut Background<S>) -> Result<()> {
        self.deadline = None;
        let (id, bookmark) = match (&self.id, self.widget.bookmark()) {
            (Some(id), Some(bookmark)) => (id.clone(), bookmark),
            _ => {
                self.bookmark_pending = false;
                return Ok(());
            }
        };
        background.dispatch(Request::SaveBookmark { id, bookmark })?;
        self.bookmark_pending = false;
        Ok(())
    }

    /// Unload hook: the pending deadline is aborted and a dirty note is
    /// flushed best-effort before the page closes.
    pub fn unload<S: PrefStore>(&mut self, background: &mut Background<S>) -> Result<()> {
        self.deadline = None;
        if self.state == SessionState::Dirty {
            self.flush(background)?;
        }
        Ok(())
    }

    /// Handle a message from the background port.
    pub fn deliver(&mut self, message: PortMessage, now: Instant) -> Delivery {
        match message {
            PortMessage::AppendContent { content } => {
                self.widget.insert_content(&content);
                self.widget.set_dirty(true);
                self.mark_dirty(now);
                Delivery::Handled
            }
            PortMessage::Raise => Delivery::Raise,
            PortMessage::Close => Delivery::Close,
        }
    }

    /// Detach from the current note, e.g. after it was deleted.
    pub fn clear(&mut self) {
        self.id = None;
        self.state = SessionState::Empty;
        self.deadline = None;
        self.bookmark_pending = false;
    }
}
