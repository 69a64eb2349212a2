//! `tessera entries` — List journal entries for an identity.

use clap::Args;
use std::path::PathBuf;
use tessera_core::{Identity, Mood};
use tessera_ledger::IdentityLedger;

use crate::config::TesseraConfig;
use crate::store::StoredLedger;

#[derive(Args, Debug)]
pub struct EntriesArgs {
    /// Identity whose entries to list.
    #[arg(short, long)]
    pub identity: String,

    /// Only show entries with this mood tag (good, normal, or bad).
    #[arg(short, long)]
    pub mood: Option<String>,

    /// Path to the configuration file (TOML).
    #[arg(long, default_value = "tessera.toml")]
    pub config: PathBuf,
}

pub fn run(args: &EntriesArgs) -> anyhow::Result<()> {
    let config = TesseraConfig::load(&args.config)?;
    let stored = StoredLedger::load(&config.storage.state_file)?;
    let ledger = IdentityLedger::restore(stored.snapshot)?;

    let identity = Identity::new(args.identity.as_str());
    let entries = match &args.mood {
        Some(name) => {
            let mood = match Mood::from_name(name) {
                Some(mood) => mood,
                None => anyhow::bail!("unknown mood '{}'; expected good, normal, or bad", name),
            };
            ledger.entries_with_mood(&identity, mood)
        }
        None => ledger.entries(&identity),
    };

    if entries.is_empty() {
        println!("No entries for {}", identity);
        return Ok(());
    }

    println!("{} entries for {}:", entries.len(), identity);
    for entry in &entries {
        println!(
            "  [{:<6}] {}  {}",
            entry.mood,
            super::format_ms(entry.created_at_ms),
            entry.title
        );
        println!("           {}", entry.content);
    }

    Ok(())
}
