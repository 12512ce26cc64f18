//! Messaging Router: request dispatch between the background context and
//! live editor pages.
//!
//! [`Background`] is the explicit process-wide context object: it owns the
//! preference store and the registry of connected ports, so nothing here is
//! ambient state. Requests are an enumerated union dispatched by a single
//! match; ports receive [`PortMessage`]s over an mpsc channel, the in-process
//! stand-in for the persistent connection a real editor page would hold.

use crate::error::Result;
use crate::model::{bookmark_key, content_key};
use crate::store::PrefStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Separator placed between existing note content and appended text.
pub const APPEND_SEPARATOR: &str = "<br><br>";

/// Cross-context request, tagged by the wire `method` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum Request {
    SaveNote {
        id: String,
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bookmark: Option<Value>,
    },
    SaveBookmark {
        id: String,
        bookmark: Value,
    },
    DeleteNote {
        id: String,
    },
    AppendContent {
        id: String,
        content: String,
    },
    BringToFront,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Ack,
    /// For append-content: true iff a live session handled it.
    Handled(bool),
    None,
}

/// Message delivered to a connected editor page.
#[derive(Debug, Clone, PartialEq)]
pub enum PortMessage {
    AppendContent { content: String },
    /// The page should focus its window.
    Raise,
    /// The page should flush and close (import/reset is about to reload).
    Close,
}

pub type PortId = usize;

struct PortRecord {
    port: PortId,
    /// Open note id, set by the identity handshake.
    note_id: Option<String>,
    sender: Sender<PortMessage>,
}

/// Background context: owns the store and the live-connection registry.
pub struct Background<S: PrefStore> {
    store: S,
    ports: Vec<PortRecord>,
    next_port: PortId,
}

impl<S: PrefStore> Background<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            ports: Vec::new(),
            next_port: 0,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Open a persistent connection. The page keeps the receiver and pumps
    /// its messages into its session.
    pub fn connect(&mut self) -> (PortId, Receiver<PortMessage>) {
        let (sender, receiver) = channel();
        let port = self.next_port;
        self.next_port += 1;
        self.ports.push(PortRecord {
            port,
            note_id: None,
            sender,
        });
        (port, receiver)
    }

    /// Identity handshake: bind a port to the note it has open.
    pub fn hello(&mut self, port: PortId, note_id: &str) {
        if let Some(record) = self.ports.iter_mut().find(|p| p.port == port) {
            record.note_id = Some(note_id.to_string());
        }
    }

    pub fn disconnect(&mut self, port: PortId) {
        self.ports.retain(|p| p.port != port);
    }

    /// Ask every connected page to close, before an import or reset.
    pub fn close_all(&mut self) {
        for record in &self.ports {
            let _ = record.sender.send(PortMessage::Close);
        }
        self.ports.clear();
    }

    /// Single dispatch point for every request kind.
    pub fn dispatch(&mut self, request: Request) -> Result<Response> {
        match request {
            Request::SaveNote {
                id,
                content,
                bookmark,
            } => {
                let mut entries = vec![(content_key(&id), Value::String(content))];
                if let Some(bookmark) = bookmark {
                    entries.push((bookmark_key(&id), bookmark));
                }
                self.store.set(entries)?;
                Ok(Response::Ack)
            }
            Request::SaveBookmark { id, bookmark } => {
                self.store.set(vec![(bookmark_key(&id), bookmark)])?;
                Ok(Response::Ack)
            }
            Request::DeleteNote { id } => {
                self.store.remove(&[content_key(&id), bookmark_key(&id)])?;
                Ok(Response::None)
            }
            Request::AppendContent { id, content } => self.append_content(&id, content),
            Request::BringToFront => {
                if let Some(record) = self.ports.first() {
                    let _ = record.sender.send(PortMessage::Raise);
                }
                Ok(Response::None)
            }
        }
    }

    /// A live session for the target id unconditionally wins; the store
    /// fallback only applies when no port acknowledges delivery.
    fn append_content(&mut self, id: &str, content: String) -> Result<Response> {
        if let Some(pos) = self
            .ports
            .iter()
            .position(|p| p.note_id.as_deref() == Some(id))
        {
            let delivered = self.ports[pos]
                .sender
                .send(PortMessage::AppendContent {
                    content: content.clone(),
                })
                .is_ok();
            if delivered {
                return Ok(Response::Handled(true));
            }
            // Delivery failure means the page is gone; drop the port and
            // fall back to the store path.
            self.ports.remove(pos);
        }
        let key = content_key(id);
        let existing = self.store.get_string(&key)?;
        let merged = format!("{}{}{}", existing, APPEND_SEPARATOR, content);
        self.store.set(vec![(key, Value::String(merged))])?;
        Ok(Response::Handled(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn save_note_writes_both_keys() {
        let mut bg = Background::new(InMemoryStore::new());
        let response = bg
            .dispatch(Request::SaveNote {
                id: "note-1".into(),
                content: "<p>hi</p>".into(),
                bookmark: Some(Value::String("bm".into())),
            })
            .unwrap();
        assert_eq!(response, Response::Ack);
        assert_eq!(
            bg.store().get_string(&content_key("note-1")).unwrap(),
            "<p>hi</p>"
        );
        assert_eq!(
            bg.store().get(&bookmark_key("note-1")).unwrap(),
            Some(Value::String("bm".into()))
        );
    }

    #[test]
    fn save_note_without_bookmark_leaves_bookmark_alone() {
        let mut bg = Background::new(InMemoryStore::new());
        bg.dispatch(Request::SaveBookmark {
            id: "note-1".into(),
            bookmark: Value::String("old".into()),
        })
        .unwrap();
        bg.dispatch(Request::SaveNote {
            id: "note-1".into(),
            content: "c".into(),
            bookmark: None,
        })
        .unwrap();
        assert_eq!(
            bg.store().get(&bookmark_key("note-1")).unwrap(),
            Some(Value::String("old".into()))
        );
    }

    #[test]
    fn delete_note_removes_content_entries() {
        let mut bg = Background::new(InMemoryStore::new());
        bg.dispatch(Request::SaveNote {
            id: "note-1".into(),
            content: "c".into(),
            bookmark: Some(Value::Bool(true)),
        })
        .unwrap();
        let response = bg
            .dispatch(Request::DeleteNote {
                id: "note-1".into(),
            })
            .unwrap();
        assert_eq!(response, Response::None);
        assert_eq!(bg.store().get(&content_key("note-1")).unwrap(), None);
        assert_eq!(bg.store().get(&bookmark_key("note-1")).unwrap(), None);
    }

    #[test]
    fn append_routes_to_live_port_without_touching_store() {
        let mut bg = Background::new(InMemoryStore::new());
        let (port, receiver) = bg.connect();
        bg.hello(port, "note-5");

        let response = bg
            .dispatch(Request::AppendContent {
                id: "note-5".into(),
                content: "clip".into(),
            })
            .unwrap();

        assert_eq!(response, Response::Handled(true));
        assert_eq!(
            receiver.try_recv().unwrap(),
            PortMessage::AppendContent {
                content: "clip".into()
            }
        );
        assert_eq!(bg.store().get(&content_key("note-5")).unwrap(), None);
    }

    #[test]
    fn append_falls_back_to_store_without_live_port() {
        let mut bg = Background::new(InMemoryStore::new());
        bg.store_mut()
            .set(vec![(content_key("note-5"), Value::String("old".into()))])
            .unwrap();

        let response = bg
            .dispatch(Request::AppendContent {
                id: "note-5".into(),
                content: "new".into(),
            })
            .unwrap();

        assert_eq!(response, Response::Handled(false));
        assert_eq!(
            bg.store().get_string(&content_key("note-5")).unwrap(),
            "old<br><br>new"
        );
    }

    #[test]
    fn append_to_dead_port_falls_back() {
        let mut bg = Background::new(InMemoryStore::new());
        let (port, receiver) = bg.connect();
        bg.hello(port, "note-5");
        drop(receiver);

        let response = bg
            .dispatch(Request::AppendContent {
                id: "note-5".into(),
                content: "text".into(),
            })
            .unwrap();

        // Delivery failed, so the store path applied and the port is gone.
        assert_eq!(response, Response::Handled(false));
        assert_eq!(
            bg.store().get_string(&content_key("note-5")).unwrap(),
            "<br><br>text"
        );
    }

    #[test]
    fn bring_to_front_raises_a_live_port() {
        let mut bg = Background::new(InMemoryStore::new());
        let (_port, receiver) = bg.connect();
        let response = bg.dispatch(Request::BringToFront).unwrap();
        assert_eq!(response, Response::None);
        assert_eq!(receiver.try_recv().unwrap(), PortMessage::Raise);
    }

    #[test]
    fn disconnect_unregisters_port() {
        let mut bg = Background::new(InMemoryStore::new());
        let (port, _receiver) = bg.connect();
        bg.hello(port, "note-1");
        bg.disconnect(port);

        let response = bg
            .dispatch(Request::AppendContent {
                id: "note-1".into(),
                content: "t".into(),
            })
            .unwrap();
        assert_eq!(response, Response::Handled(false));
    }

    #[test]
    fn requests_follow_the_wire_format() {
        let request: Request = serde_json::from_str(
            r#"{"method":"save-note","id":"note-1","content":"<p>x</p>","bookmark":"b"}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            Request::SaveNote {
                id: "note-1".into(),
                content: "<p>x</p>".into(),
                bookmark: Some(Value::String("b".into())),
            }
        );

        let json = serde_json::to_value(&Request::DeleteNote {
            id: "note-2".into(),
        })
        .unwrap();
        assert_eq!(json["method"], "delete-note");

        let json = serde_json::to_value(&Request::BringToFront).unwrap();
        assert_eq!(json["method"], "bring-to-front");
    }
}
