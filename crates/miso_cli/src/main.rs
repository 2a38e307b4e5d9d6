//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `miso_core` linkage.
//! - Optionally open a store and print the landing counters.
//!
//! Usage: `miso_cli [DB_PATH]`

use miso_core::{SqliteBoardRepository, SqliteTaskRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("miso_core ping={}", miso_core::ping());
    println!("miso_core version={}", miso_core::core_version());

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let conn = match miso_core::open_db(&path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open `{path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let tasks = SqliteTaskRepository::new(&conn);
    let board = SqliteBoardRepository::new(&conn);
    match miso_core::landing_stats(&tasks, &board) {
        Ok(stats) => {
            println!("tasks={} notes={}", stats.tasks, stats.notes);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to read stats: {err}");
            ExitCode::FAILURE
        }
    }
}
