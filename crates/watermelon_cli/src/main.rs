//! Watermelon Notes command-line front end.
//!
//! # Responsibility
//! - Forward user intents (new, delete, dark mode) to core stores.
//! - Render store state as plain text.
//!
//! # Invariants
//! - Positions shown to users are 1-based; core receives 0-based positions.
//! - Notes are only created through `NoteService`, so empty titles are
//!   rejected before reaching storage.

mod config;
mod render;

use config::CliConfig;
use log::info;
use std::env;
use std::error::Error;
use watermelon_core::db::open_db;
use watermelon_core::{
    core_version, init_logging, KvStore, NoteService, NoteStore, SettingsStore, SqliteKvStore,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_help();
        return Ok(());
    }
    let cmd = args.remove(0);

    match cmd.as_str() {
        "help" | "-h" | "--help" => {
            print_help();
            return Ok(());
        }
        "version" | "--version" => {
            println!("watermelon {}", core_version());
            return Ok(());
        }
        _ => {}
    }

    let config = CliConfig::from_env()?;
    if let Err(err) = init_logging(&config.log_level, config.log_dir()) {
        eprintln!("warning: file logging disabled: {err}");
    }
    info!("event=cli_command module=cli status=start command={cmd}");

    let conn = open_db(config.db_path())?;
    let storage = || SqliteKvStore::new(&conn);

    match cmd.as_str() {
        "list" => {
            let store = NoteStore::open(storage());
            warn_on_issue(&store);
            print!("{}", render::render_list(store.notes()));
        }
        "view" => {
            let store = NoteStore::open(storage());
            warn_on_issue(&store);
            view_note(&args, store)?;
        }
        "new" => new_note(args, NoteService::open(storage()))?,
        "delete" => delete_notes(&args, NoteService::open(storage()))?,
        "settings" => {
            let settings = SettingsStore::new(storage());
            print!(
                "{}",
                render::render_settings(settings.appearance(), core_version())
            );
        }
        "dark-mode" => set_dark_mode(&args, SettingsStore::new(storage()))?,
        "path" => println!("{}", config.home.display()),
        other => {
            print_help();
            return Err(format!("unknown command: {other}").into());
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        "\
Watermelon Notes
Usage:
  watermelon list                       List notes in creation order
  watermelon view <n>                   Show note number n
  watermelon new <title> [content...]   Create a note (title must not be empty)
  watermelon delete <n>...              Delete one or more notes by number
  watermelon settings                   Show appearance and version
  watermelon dark-mode [on|off|toggle]  Change appearance (default: toggle)
  watermelon path                       Print the data directory
  watermelon version                    Print the version

Environment:
  WATERMELON_HOME       Data directory (default: $HOME/.watermelon)
  WATERMELON_LOG_LEVEL  trace|debug|info|warn|error"
    );
}

fn view_note<S: KvStore>(args: &[String], store: NoteStore<S>) -> Result<(), Box<dyn Error>> {
    let [arg] = args else {
        return Err("Provide exactly one note number, e.g. `watermelon view 1`".into());
    };
    let position = parse_position(arg)?;
    let note = store
        .get(position)
        .ok_or_else(|| format!("no note number {arg}; there are {} note(s)", store.len()))?;
    print!("{}", render::render_note(note));
    Ok(())
}

fn new_note<S: KvStore>(
    args: Vec<String>,
    mut service: NoteService<S>,
) -> Result<(), Box<dyn Error>> {
    warn_on_issue(service.store());
    let mut parts = args.into_iter();
    let title = parts
        .next()
        .ok_or("Provide a title, e.g. `watermelon new \"Groceries\" melon mint`")?;
    let content = parts.collect::<Vec<_>>().join(" ");

    service.create_note(title.clone(), content)?;
    warn_on_issue(service.store());
    println!("Created note {}: {}", service.store().len(), title);
    Ok(())
}

fn delete_notes<S: KvStore>(
    args: &[String],
    mut service: NoteService<S>,
) -> Result<(), Box<dyn Error>> {
    warn_on_issue(service.store());
    if args.is_empty() {
        return Err("Provide note numbers to delete, e.g. `watermelon delete 1 3`".into());
    }
    let positions = args
        .iter()
        .map(|arg| parse_position(arg))
        .collect::<Result<Vec<_>, _>>()?;

    let removed = service.delete_notes(positions)?;
    warn_on_issue(service.store());
    println!("Deleted {} note(s).", removed.len());
    for note in &removed {
        println!("  {}", note.title);
    }
    Ok(())
}

fn set_dark_mode<S: KvStore>(
    args: &[String],
    mut settings: SettingsStore<S>,
) -> Result<(), Box<dyn Error>> {
    let enabled = match args.first().map(String::as_str) {
        None | Some("toggle") => settings.toggle_dark_mode()?,
        Some("on") => {
            settings.set_dark_mode(true)?;
            true
        }
        Some("off") => {
            settings.set_dark_mode(false)?;
            false
        }
        Some(other) => {
            return Err(format!("expected on|off|toggle, got `{other}`").into());
        }
    };
    println!("Dark mode: {}", if enabled { "on" } else { "off" });
    Ok(())
}

/// Converts a user-facing 1-based number into a store position.
fn parse_position(arg: &str) -> Result<usize, String> {
    match arg.trim().parse::<usize>() {
        Ok(number) if number >= 1 => Ok(number - 1),
        _ => Err(format!("`{arg}` is not a note number (use 1, 2, ...)")),
    }
}

fn warn_on_issue<S: KvStore>(store: &NoteStore<S>) {
    if let Some(issue) = store.last_issue() {
        eprintln!("warning: {issue}");
    }
}
