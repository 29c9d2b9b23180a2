//! Croft CLI
//!
//! Command-line tools for driving snapshot sync against a shared
//! network location.
//!
//! # Commands
//!
//! - `connect` - Probe a share path and set it as the sync endpoint
//! - `disconnect` - Clear the sync endpoint
//! - `status` - Show endpoint and last-sync state
//! - `sync` - Upload, then download (full cycle)
//! - `push` - Upload only
//! - `pull` - Download only

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Croft command-line sync tools.
#[derive(Parser)]
#[command(name = "croft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the local store directory
    #[arg(global = true, short, long)]
    store: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe a share path and set it as the sync endpoint
    Connect {
        /// Path to the snapshot blob on the mounted share
        path: String,
    },

    /// Clear the sync endpoint
    Disconnect,

    /// Show endpoint and last-sync state
    Status {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Upload the local snapshot, then download and reconcile
    Sync,

    /// Upload only
    Push,

    /// Download and reconcile only
    Pull,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store_path = || cli.store.clone().ok_or("Store path required (--store)");

    match &cli.command {
        Commands::Connect { path } => commands::connect::run(&store_path()?, path)?,
        Commands::Disconnect => commands::connect::disconnect(&store_path()?)?,
        Commands::Status { format } => commands::status::run(&store_path()?, format)?,
        Commands::Sync => commands::sync::run(&store_path()?, commands::sync::Mode::Full)?,
        Commands::Push => commands::sync::run(&store_path()?, commands::sync::Mode::Push)?,
        Commands::Pull => commands::sync::run(&store_path()?, commands::sync::Mode::Pull)?,
        Commands::Version => {
            println!("Croft CLI v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
