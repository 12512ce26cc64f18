use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotepadError {
    #[error("Header not found: {0}")]
    HeaderNotFound(String),

    #[error("Not a notebook: {0}")]
    NotANotebook(String),

    #[error("Cannot move {id} under {target}: the target is inside the moved subtree")]
    InvalidMove { id: String, target: String },

    #[error("Import is {size} bytes, limit is {limit}")]
    ImportTooLarge { size: u64, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, NotepadError>;
