//! Deckhand CLI - Command-line front-end for the server console
//!
//! Provides commands for:
//! - Listing instances grouped by folder
//! - Moving instances between folders
//! - Creating, deleting and renaming folders
//!
//! Changes are applied optimistically and reconciled with the server;
//! the resulting notifications are printed as they are raised.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod session;

use commands::{folder::FolderCommand, list::ListCommand, move_instance::MoveCommand};
use output::OutputFormat;
use session::Session;

#[derive(Debug, Parser)]
#[command(name = "deckhand", version, about = "Organize game server instances into folders")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List instances grouped by folder
    List(ListCommand),
    /// Move an instance into a folder
    Move(MoveCommand),
    /// Manage folders
    #[command(subcommand)]
    Folder(FolderCommand),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = session::load_config(cli.config.as_deref())?;

    // Setup tracing; logs go to stderr so --json output stays parseable
    let filter = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let session = Session::open(&config, format, cli.quiet);

    match cli.command {
        Commands::List(cmd) => cmd.execute(&session).await,
        Commands::Move(cmd) => cmd.execute(&session).await,
        Commands::Folder(cmd) => cmd.execute(&session).await,
    }
}
