//! Tessera CLI — Command-line interface for the Tessera identity ledger.
//!
//! Subcommands: init, append, entries, cast, standing.

mod commands;
mod config;
mod store;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Tessera — append-only identity ledger with admission-controlled polling.
#[derive(Parser, Debug)]
#[command(name = "tessera", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize a ledger configuration and state file.
    Init(commands::init::InitArgs),
    /// Append a journal entry for an identity.
    Append(commands::append::AppendArgs),
    /// List journal entries for an identity.
    Entries(commands::entries::EntriesArgs),
    /// Cast a ballot for an identity.
    Cast(commands::cast::CastArgs),
    /// Show the poll standing: tally, leader, turnout, time remaining.
    Standing(commands::standing::StandingArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Quiet by default; RUST_LOG=debug surfaces ledger internals.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    match &cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Append(args) => commands::append::run(args),
        Commands::Entries(args) => commands::entries::run(args),
        Commands::Cast(args) => commands::cast::run(args),
        Commands::Standing(args) => commands::standing::run(args),
    }
}
