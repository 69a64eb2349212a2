//! `tessera standing` — Show the poll standing.

use clap::Args;
use std::path::PathBuf;
use tessera_ledger::IdentityLedger;

use crate::config::TesseraConfig;
use crate::store::StoredLedger;

#[derive(Args, Debug)]
pub struct StandingArgs {
    /// Also list the identities that have cast, in cast order.
    #[arg(long)]
    pub voters: bool,

    /// Path to the configuration file (TOML).
    #[arg(long, default_value = "tessera.toml")]
    pub config: PathBuf,
}

pub fn run(args: &StandingArgs) -> anyhow::Result<()> {
    let config = TesseraConfig::load(&args.config)?;
    let stored = StoredLedger::load(&config.storage.state_file)?;
    let ledger = IdentityLedger::restore(stored.snapshot)?;

    let now_ms = super::now_ms();
    let window = ledger.window();

    println!("Poll standing");
    println!("  Ledger:   {}", stored.ledger_id);
    println!("  Opens:    {}", super::format_ms(window.opens_at_ms()));
    println!("  Closes:   {}", super::format_ms(window.closes_at_ms()));

    if !window.has_opened(now_ms) {
        let wait_secs = window.opens_at_ms().saturating_sub(now_ms) / 1_000;
        println!("  Status:   not yet open ({}s until it opens)", wait_secs);
    } else if window.has_closed(now_ms) {
        println!("  Status:   closed");
    } else {
        let left_secs = ledger.time_remaining_ms(now_ms) / 1_000;
        println!("  Status:   open ({}s remaining)", left_secs);
    }
    println!();

    let tally = ledger.tally();
    let (leading_choice, leading_votes) = ledger.leading_choice();
    let width = ledger
        .candidates()
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0);

    for (index, (label, votes)) in ledger.candidates().iter().zip(tally.iter()).enumerate() {
        let marker = if index == leading_choice as usize && *votes > 0 {
            "*"
        } else {
            " "
        };
        println!("  {} [{}] {:<width$}  {}", marker, index, label, votes);
    }
    println!();

    println!("  Turnout:  {} ballots", ledger.turnout());
    if leading_votes > 0 {
        let label = ledger.candidate_label(leading_choice).unwrap_or("?");
        println!(
            "  Leading:  [{}] {} with {} votes",
            leading_choice, label, leading_votes
        );
    }

    if args.voters {
        println!();
        println!("  Voters, in cast order:");
        for identity in ledger.voters() {
            println!("    {}", identity);
        }
    }

    Ok(())
}
