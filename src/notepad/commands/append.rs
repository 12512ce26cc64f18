use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::router::{Background, Request, Response};
use crate::store::PrefStore;

/// Append text to a note, the context-menu path: routed to a live editor
/// session when one has the note open, otherwise merged into the stored
/// content.
pub fn run<S: PrefStore>(
    background: &mut Background<S>,
    id: &str,
    content: &str,
) -> Result<CmdResult> {
    let response = background.dispatch(Request::AppendContent {
        id: id.to_string(),
        content: content.to_string(),
    })?;

    let mut result = CmdResult::default();
    match response {
        Response::Handled(true) => {
            result.add_message(CmdMessage::info("Appended in the open editor"));
        }
        _ => {
            result.add_message(CmdMessage::success(format!("Appended to {}", id)));
        }
    }
    Ok(result)
}
