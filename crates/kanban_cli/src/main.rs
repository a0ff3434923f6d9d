//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open a board file through `kanban_core` and print a summary.
//! - Keep output metadata-only: counts and ids, no user details.
//!
//! Usage: `kanban_cli <board.json> [--log-dir <abs path>] [--log-level <level>]`

use clap::Parser;
use kanban_core::{default_log_level, init_logging, Board, FileDataSource};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "kanban_cli", version, about = "Summarize a kanban board file")]
struct CliArgs {
    /// Board document to open
    board_path: PathBuf,

    /// Absolute directory for rolling log files; logging stays off without it
    #[arg(long)]
    log_dir: Option<String>,

    /// trace, debug, info, warn or error
    #[arg(long)]
    log_level: Option<String>,
}

fn run(args: CliArgs) -> Result<(), String> {
    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = args
            .log_level
            .unwrap_or_else(|| default_log_level().to_string());
        init_logging(&level, log_dir).map_err(|err| err.to_string())?;
    }

    let board =
        Board::open(FileDataSource::new(args.board_path)).map_err(|err| err.to_string())?;
    println!("kanban_core version={}", kanban_core::core_version());
    println!("users={}", board.users().len());
    println!("clients={}", board.clients().count());
    println!("projects={}", board.projects().count());
    let active: Vec<String> = board
        .active_project_ids()
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("active=[{}]", active.join(","));
    log::info!(
        "event=cli_summary module=cli status=ok projects={} active={}",
        board.projects().count(),
        active.len()
    );
    Ok(())
}

fn main() -> ExitCode {
    match run(CliArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("kanban_cli: {message}");
            ExitCode::FAILURE
        }
    }
}
