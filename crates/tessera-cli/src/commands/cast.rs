//! `tessera cast` — Cast a ballot for an identity.

use clap::Args;
use std::path::PathBuf;
use tessera_core::{Identity, LedgerError};
use tessera_ledger::IdentityLedger;

use crate::config::TesseraConfig;
use crate::store::StoredLedger;

#[derive(Args, Debug)]
pub struct CastArgs {
    /// Identity casting the ballot.
    #[arg(short, long)]
    pub identity: String,

    /// Choice index of the candidate to vote for.
    #[arg(short, long)]
    pub choice: u8,

    /// Path to the configuration file (TOML).
    #[arg(long, default_value = "tessera.toml")]
    pub config: PathBuf,
}

pub fn run(args: &CastArgs) -> anyhow::Result<()> {
    let config = TesseraConfig::load(&args.config)?;
    let mut stored = StoredLedger::load(&config.storage.state_file)?;
    let ledger = IdentityLedger::restore(stored.snapshot.clone())?;

    let identity = Identity::new(args.identity.as_str());
    let now_ms = super::now_ms();

    match ledger.cast_ballot(&identity, args.choice, now_ms) {
        Ok(ballot) => {
            stored.snapshot = ledger.snapshot();
            stored.save(&config.storage.state_file)?;

            let label = ledger.candidate_label(ballot.choice).unwrap_or("?");
            println!("Ballot recorded for {}", identity);
            println!("  Choice:   [{}] {}", ballot.choice, label);
            println!("  Cast at:  {}", super::format_ms(ballot.cast_at_ms));
            println!("  Turnout:  {} ballots", ledger.turnout());
            Ok(())
        }
        Err(err) => {
            match &err {
                LedgerError::NotYetOpen { opens_at_ms, .. } => {
                    println!(
                        "The admission window has not opened yet (opens {}).",
                        super::format_ms(*opens_at_ms)
                    );
                }
                LedgerError::WindowClosed { closes_at_ms, .. } => {
                    println!(
                        "The admission window closed at {}.",
                        super::format_ms(*closes_at_ms)
                    );
                }
                LedgerError::AlreadyActed { .. } => {
                    println!("{} has already cast a ballot; ballots are final.", identity);
                }
                LedgerError::InvalidChoice { candidate_count, .. } => {
                    if *candidate_count == 0 {
                        println!("The poll has no candidates.");
                    } else {
                        println!("Valid choices are 0 through {}.", candidate_count - 1);
                    }
                }
                LedgerError::InvalidWindow { .. } => {}
            }
            Err(err.into())
        }
    }
}
