//! Command-line interface for parlor.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parlor - stateless arbitration service for tic-tac-toe and chess
#[derive(Parser, Debug)]
#[command(name = "parlor")]
#[command(about = "Game arbitration service with a score leaderboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP arbitration server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Path to the database file (created if it doesn't exist)
        #[arg(long, default_value = "parlor.db")]
        db_path: String,

        /// Path to a UCI engine binary for chess move suggestions
        #[arg(long)]
        engine_path: Option<PathBuf>,

        /// Search depth in plies requested from the engine
        #[arg(long, default_value = "12")]
        engine_depth: u32,

        /// Wall-clock budget in seconds for one engine call
        #[arg(long, default_value = "10")]
        engine_timeout: u64,
    },
}
