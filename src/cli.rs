//! Command-line interface for ludo_lobby.

use clap::{Parser, Subcommand};

/// Ludo Lobby - game session server for multiplayer ludo
#[derive(Parser, Debug)]
#[command(name = "ludo_lobby")]
#[command(about = "Game session server for multiplayer ludo", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP lobby server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,
    },
}
