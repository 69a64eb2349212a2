//! `tessera append` — Append a journal entry for an identity.

use clap::Args;
use std::path::PathBuf;
use tessera_core::{Identity, Mood};
use tessera_ledger::IdentityLedger;

use crate::config::TesseraConfig;
use crate::store::StoredLedger;

#[derive(Args, Debug)]
pub struct AppendArgs {
    /// Identity the entry belongs to.
    #[arg(short, long)]
    pub identity: String,

    /// Entry title.
    #[arg(short, long)]
    pub title: String,

    /// Entry content.
    #[arg(short, long)]
    pub content: String,

    /// Mood tag: good, normal, or bad.
    #[arg(short, long, default_value = "normal")]
    pub mood: String,

    /// Path to the configuration file (TOML).
    #[arg(long, default_value = "tessera.toml")]
    pub config: PathBuf,
}

pub fn run(args: &AppendArgs) -> anyhow::Result<()> {
    let mood = match Mood::from_name(&args.mood) {
        Some(mood) => mood,
        None => anyhow::bail!("unknown mood '{}'; expected good, normal, or bad", args.mood),
    };

    let config = TesseraConfig::load(&args.config)?;
    let mut stored = StoredLedger::load(&config.storage.state_file)?;
    let ledger = IdentityLedger::restore(stored.snapshot.clone())?;

    let identity = Identity::new(args.identity.as_str());
    let position = ledger.append_entry(
        &identity,
        args.title.as_str(),
        args.content.as_str(),
        mood,
        super::now_ms(),
    );

    stored.snapshot = ledger.snapshot();
    stored.save(&config.storage.state_file)?;

    println!("Appended entry #{} for {}", position, identity);
    println!("  Title:    {}", args.title);
    println!("  Mood:     {}", mood);

    Ok(())
}
