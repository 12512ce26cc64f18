use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notepad")]
#[command(about = "Hierarchical note keeper", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes and notebooks as a tree
    #[command(alias = "ls")]
    List,

    /// Create a note under the selected notebook
    #[command(alias = "n")]
    Add {
        /// Name of the note (defaults to "new note")
        name: Option<String>,
    },

    /// Create a notebook with its first note inside
    #[command(alias = "nb")]
    AddNotebook {
        /// Name of the notebook (defaults to "new notebook")
        name: Option<String>,
    },

    /// Rename a note or notebook
    Rename { id: String, name: String },

    /// Move a header under a notebook, or to the root when no target is given
    #[command(alias = "mv")]
    Move {
        id: String,
        /// Target notebook id
        parent: Option<String>,
    },

    /// Select a note or notebook
    Select { id: String },

    /// Delete a note, or a notebook with all its children
    #[command(alias = "rm")]
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Append text to a note
    Append { id: String, text: String },

    /// Export all notes to a JSON file
    Export {
        /// Output file (defaults to a timestamped name)
        file: Option<PathBuf>,
    },

    /// Import notes from a JSON export
    Import { file: PathBuf },

    /// Get or set configuration
    Config {
        /// Configuration key (debounce-ms, max-import-bytes)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
