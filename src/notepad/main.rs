use chrono::Utc;
use clap::Parser;
use colored::*;
use console::Term;
use directories::ProjectDirs;
use notepad::api::NotepadApi;
use notepad::commands::{CmdMessage, MessageLevel};
use notepad::config::NotepadConfig;
use notepad::error::{NotepadError, Result};
use notepad::model::{Header, Kind};
use notepad::router::Background;
use notepad::store::fs::FileStore;
use notepad::tree::TreeCache;
use notepad::{commands, registry};
use std::fs;
use std::path::PathBuf;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    dir: PathBuf,
    config: NotepadConfig,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Add { name }) => handle_add(&ctx, name, false),
        Some(Commands::AddNotebook { name }) => handle_add(&ctx, name, true),
        Some(Commands::Rename { id, name }) => handle_rename(&ctx, id, name),
        Some(Commands::Move { id, parent }) => handle_move(&ctx, id, parent),
        Some(Commands::Select { id }) => handle_select(&ctx, id),
        Some(Commands::Delete { id, yes }) => handle_delete(&ctx, id, yes),
        Some(Commands::Append { id, text }) => handle_append(&ctx, id, text),
        Some(Commands::Export { file }) => handle_export(&ctx, file),
        Some(Commands::Import { file }) => handle_import(&ctx, file),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "notepad", "notepad")
            .ok_or_else(|| NotepadError::Store("Could not determine data dir".to_string()))?
            .data_dir()
            .to_path_buf(),
    };
    let config = NotepadConfig::load(&dir).unwrap_or_default();
    Ok(AppContext { dir, config })
}

fn open_api(ctx: &AppContext) -> Result<NotepadApi<FileStore>> {
    NotepadApi::open(FileStore::new(ctx.dir.clone()))
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let api = open_api(ctx)?;
    print_tree(api.tree(), None, 0);
    Ok(())
}

fn handle_add(ctx: &AppContext, name: Option<String>, notebook: bool) -> Result<()> {
    let mut api = open_api(ctx)?;
    let result = if notebook {
        api.add_notebook(name.as_deref())?
    } else {
        api.add_note(name.as_deref())?
    };
    for header in &result.affected {
        println!("{}", header.id);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_rename(ctx: &AppContext, id: String, name: String) -> Result<()> {
    let mut api = open_api(ctx)?;
    let result = api.rename(&id, &name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_move(ctx: &AppContext, id: String, parent: Option<String>) -> Result<()> {
    let mut api = open_api(ctx)?;
    let result = api.move_header(&id, parent.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_select(ctx: &AppContext, id: String) -> Result<()> {
    let mut api = open_api(ctx)?;
    let result = api.select(&id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &AppContext, id: String, yes: bool) -> Result<()> {
    let mut api = open_api(ctx)?;
    let header = api
        .tree()
        .get(&id)
        .cloned()
        .ok_or_else(|| NotepadError::HeaderNotFound(id.clone()))?;

    if !yes && !confirm_delete(&header)? {
        println!("Aborted.");
        return Ok(());
    }

    let result = match header.kind() {
        Kind::Note => api.delete_note(&id)?,
        Kind::Notebook => api.delete_notebook(&id)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn confirm_delete(header: &Header) -> Result<bool> {
    let prompt = match header.kind() {
        Kind::Note => format!(
            "Are you sure you want to delete \"{}\"? This action is irreversible.",
            header.display_name()
        ),
        Kind::Notebook => format!(
            "Are you sure you want to delete \"{}\" and all its child notes? This action is irreversible.",
            header.display_name()
        ),
    };
    let term = Term::stderr();
    term.write_str(&format!("{} [y/N] ", prompt))
        .map_err(NotepadError::Io)?;
    let answer = term.read_line().map_err(NotepadError::Io)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn handle_append(ctx: &AppContext, id: String, text: String) -> Result<()> {
    let mut background = Background::new(FileStore::new(ctx.dir.clone()));
    if registry::list(background.store())?
        .iter()
        .all(|h| h.id != id)
    {
        return Err(NotepadError::HeaderNotFound(id));
    }
    let result = commands::append::run(&mut background, &id, &text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, file: Option<PathBuf>) -> Result<()> {
    let api = open_api(ctx)?;
    let json = api.export_json()?;
    let file = file.unwrap_or_else(|| {
        PathBuf::from(format!(
            "notepad-{}.json",
            Utc::now().format("%Y-%m-%d_%H-%M-%S")
        ))
    });
    fs::write(&file, json).map_err(NotepadError::Io)?;
    println!("{}", format!("Exported to {}", file.display()).green());
    Ok(())
}

fn handle_import(ctx: &AppContext, file: PathBuf) -> Result<()> {
    let size = fs::metadata(&file).map_err(NotepadError::Io)?.len();
    if size > ctx.config.max_import_bytes {
        return Err(NotepadError::ImportTooLarge {
            size,
            limit: ctx.config.max_import_bytes,
        });
    }
    let json = fs::read_to_string(&file).map_err(NotepadError::Io)?;
    let mut api = open_api(ctx)?;
    let result = api.import_json(&json, ctx.config.max_import_bytes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = ctx.config.clone();
    match (key.as_deref(), value) {
        (None, _) => {
            println!("debounce-ms = {}", config.debounce_ms);
            println!("max-import-bytes = {}", config.max_import_bytes);
        }
        (Some("debounce-ms"), None) => println!("debounce-ms = {}", config.debounce_ms),
        (Some("max-import-bytes"), None) => {
            println!("max-import-bytes = {}", config.max_import_bytes)
        }
        (Some("debounce-ms"), Some(v)) => {
            config.debounce_ms = v
                .parse()
                .map_err(|_| NotepadError::Api(format!("Invalid value: {}", v)))?;
            config.save(&ctx.dir)?;
            println!("debounce-ms = {}", config.debounce_ms);
        }
        (Some("max-import-bytes"), Some(v)) => {
            config.max_import_bytes = v
                .parse()
                .map_err(|_| NotepadError::Api(format!("Invalid value: {}", v)))?;
            config.save(&ctx.dir)?;
            println!("max-import-bytes = {}", config.max_import_bytes);
        }
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
        }
    }
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_tree(tree: &TreeCache, parent: Option<&str>, depth: usize) {
    for id in tree.children_of(parent) {
        let header = match tree.get(id) {
            Some(header) => header,
            None => continue,
        };
        let marker = if header.selected { "*" } else { " " };
        let indent = "  ".repeat(depth);
        let line = format!("{}{} {}  [{}]", indent, marker, header.display_name(), id);
        match header.kind() {
            Kind::Notebook => println!("{}", line.bold()),
            Kind::Note => println!("{}", line),
        }
        print_tree(tree, Some(id.as_str()), depth + 1);
    }
}
