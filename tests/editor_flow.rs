//! End-to-end flow over the library: sidebar operations, a live editor
//! session fed through the background router, and an export/import round
//! trip.

use notepad::api::NotepadApi;
use notepad::model::content_key;
use notepad::registry;
use notepad::router::{Background, Request, Response};
use notepad::session::{Delivery, EditorSession, RichTextWidget, DEFAULT_DEBOUNCE};
use notepad::store::memory::InMemoryStore;
use notepad::store::PrefStore;
use serde_json::Value;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct FakeWidget {
    content: String,
    bookmark: Option<Value>,
    dirty: bool,
}

impl RichTextWidget for FakeWidget {
    fn content(&self) -> String {
        self.content.clone()
    }
    fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
    }
    fn insert_content(&mut self, content: &str) {
        self.content.push_str(content);
    }
    fn bookmark(&self) -> Option<Value> {
        self.bookmark.clone()
    }
    fn move_to_bookmark(&mut self, _bookmark: &Value) {}
    fn is_dirty(&self) -> bool {
        self.dirty
    }
    fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}

#[test]
fn sidebar_edit_append_and_round_trip() {
    // Sidebar: seed plus a notebook with its auto-created note.
    let mut api = NotepadApi::open(InMemoryStore::new()).unwrap();
    let created = api.add_notebook(Some("Work")).unwrap();
    let note_id = created.affected[1].id.clone();

    // The editor page opens the selected note over a live connection.
    let mut background = Background::new(api.into_store());
    let (port, receiver) = background.connect();
    background.hello(port, &note_id);

    let mut session = EditorSession::new(FakeWidget::default(), DEFAULT_DEBOUNCE);
    session.load(&mut background, &note_id).unwrap();

    // Typing: a burst of edits inside the window flushes once.
    let start = Instant::now();
    session.widget_mut().content = "<p>draft</p>".into();
    session.mark_dirty(start);
    session.mark_dirty(start + Duration::from_millis(200));
    assert!(session
        .poll(&mut background, start + Duration::from_millis(1200))
        .unwrap());
    assert_eq!(
        background
            .store()
            .get_string(&content_key(&note_id))
            .unwrap(),
        "<p>draft</p>"
    );

    // Context-menu append goes to the live session, not the store.
    let response = background
        .dispatch(Request::AppendContent {
            id: note_id.clone(),
            content: "clipped".into(),
        })
        .unwrap();
    assert_eq!(response, Response::Handled(true));

    let now = start + Duration::from_millis(2000);
    let message = receiver.try_recv().unwrap();
    assert_eq!(session.deliver(message, now), Delivery::Handled);
    assert_eq!(session.widget().content(), "<p>draft</p>clipped");

    // The stored content is still the flushed draft until the debounce runs.
    assert_eq!(
        background
            .store()
            .get_string(&content_key(&note_id))
            .unwrap(),
        "<p>draft</p>"
    );
    assert!(session
        .poll(&mut background, now + Duration::from_millis(1000))
        .unwrap());
    assert_eq!(
        background
            .store()
            .get_string(&content_key(&note_id))
            .unwrap(),
        "<p>draft</p>clipped"
    );

    // Page closes: the port goes away and later appends hit the store.
    session.unload(&mut background).unwrap();
    background.disconnect(port);
    let response = background
        .dispatch(Request::AppendContent {
            id: note_id.clone(),
            content: "later".into(),
        })
        .unwrap();
    assert_eq!(response, Response::Handled(false));
    assert_eq!(
        background
            .store()
            .get_string(&content_key(&note_id))
            .unwrap(),
        "<p>draft</p>clipped<br><br>later"
    );

    // Export, import into a fresh store, and compare.
    let source = background.into_store();
    let mut target = NotepadApi::open(InMemoryStore::new()).unwrap();
    let json = {
        let api = NotepadApi::open(source.clone()).unwrap();
        api.export_json().unwrap()
    };
    target.import_json(&json, u64::MAX).unwrap();

    assert_eq!(
        registry::stored(target.store()).unwrap(),
        registry::stored(&source).unwrap()
    );
    assert_eq!(
        target.store().get(&content_key(&note_id)).unwrap(),
        source.get(&content_key(&note_id)).unwrap()
    );
}

#[test]
fn deleting_the_open_note_clears_the_session() {
    let mut api = NotepadApi::open(InMemoryStore::new()).unwrap();
    let note_id = api.add_note(Some("scratch")).unwrap().affected[0].id.clone();
    api.select(&note_id).unwrap();
    api.delete_note(&note_id).unwrap();

    let mut background = Background::new(api.into_store());
    let mut session = EditorSession::new(FakeWidget::default(), DEFAULT_DEBOUNCE);
    session.load(&mut background, &note_id).unwrap();
    session.clear();
    assert_eq!(session.id(), None);

    // Events after the detach are ignored.
    session.mark_dirty(Instant::now());
    assert!(!session
        .poll(&mut background, Instant::now() + Duration::from_secs(5))
        .unwrap());
}
