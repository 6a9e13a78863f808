//! `adestra` command-line entry point.
//!
//! # Responsibility
//! - Resolve the data directory and start file logging.
//! - Open the SQLite-backed store and dispatch one subcommand.

mod args;
mod commands;

use adestra_core::db::open_db;
use adestra_core::{
    default_log_level, export_file_name, init_logging, LoadOutcome, LogLevel, SqliteStorage, Store,
};
use anyhow::{anyhow, Context, Result};
use args::{Cli, Command};
use chrono::Utc;
use clap::Parser;
use log::info;
use std::path::PathBuf;

const DB_FILE_NAME: &str = "adestra.sqlite3";

fn main() -> Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Command::Ping) {
        println!("adestra_core ping=pong");
        println!("adestra_core version={}", adestra_core::core_version());
        return Ok(());
    }

    let data_dir = absolute(resolve_data_dir(cli.data_dir)?)?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

    let level = match cli.log_level.as_deref() {
        Some(value) => LogLevel::parse(value).map_err(|err| anyhow!("{err}"))?,
        None => default_log_level(),
    };
    let log_dir = match cli.log_dir {
        Some(dir) => absolute(dir)?,
        None => data_dir.join("logs"),
    };
    if let Err(err) = init_logging(level, &log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let db_path = data_dir.join(DB_FILE_NAME);
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    let mut store = Store::open(SqliteStorage::try_new(&conn)?)?;
    if let LoadOutcome::Recovered { reason } = store.load_outcome() {
        eprintln!("warning: stored records were unreadable and have been reset ({reason})");
    }

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Ping => {}
        Command::Client(command) => commands::run_client(&mut store, command, &mut stdout)?,
        Command::Dog(command) => commands::run_dog(&mut store, command, &mut stdout)?,
        Command::Lesson(command) => commands::run_lesson(&mut store, command, &mut stdout)?,
        Command::Payment(command) => commands::run_payment(&mut store, command, &mut stdout)?,
        Command::Export { out } => {
            let path = out.unwrap_or_else(|| PathBuf::from(export_file_name(Utc::now())));
            commands::run_export(&store, &path, &mut stdout)?;
        }
        Command::Import { file, yes } => {
            commands::run_import(&mut store, &file, yes, &mut stdout)?;
        }
    }

    info!("event=cli_exit module=cli status=ok");
    Ok(())
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    let dirs = directories::ProjectDirs::from("", "", "adestra")
        .ok_or_else(|| anyhow!("could not determine a data directory; pass --data-dir"))?;
    Ok(dirs.data_dir().to_path_buf())
}

fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(cwd.join(path))
}
