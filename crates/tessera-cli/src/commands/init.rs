//! `tessera init` — Initialize a ledger configuration and state file.

use clap::Args;
use std::path::PathBuf;
use tessera_core::AdmissionWindow;
use tessera_ledger::IdentityLedger;

use crate::config::TesseraConfig;
use crate::store::StoredLedger;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory).
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Candidate labels, comma separated (defaults to the built-in roster).
    #[arg(long, value_delimiter = ',')]
    pub candidates: Option<Vec<String>>,

    /// Seconds from now until the admission window opens.
    #[arg(long)]
    pub opens_in: Option<u64>,

    /// Seconds the admission window stays open.
    #[arg(long)]
    pub duration: Option<u64>,
}

pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    let config_path = args.dir.join("tessera.toml");

    if config_path.exists() {
        anyhow::bail!(
            "configuration file already exists at {}",
            config_path.display()
        );
    }

    std::fs::create_dir_all(&args.dir)?;

    let mut config = TesseraConfig::default();
    if let Some(ref candidates) = args.candidates {
        config.poll.candidates = candidates.clone();
    }
    if let Some(opens_in) = args.opens_in {
        config.poll.opens_in_secs = opens_in;
    }
    if let Some(duration) = args.duration {
        config.poll.duration_secs = duration;
    }

    // A ballot choice is a single byte.
    if config.poll.candidates.len() > 256 {
        anyhow::bail!(
            "at most 256 candidates are supported (got {})",
            config.poll.candidates.len()
        );
    }

    let state_path = args.dir.join(&config.storage.state_file);
    if state_path.exists() {
        anyhow::bail!("ledger state already exists at {}", state_path.display());
    }

    let now_ms = super::now_ms();
    let window = AdmissionWindow::from_delay(now_ms, config.opens_in_ms(), config.duration_ms())?;
    let ledger = IdentityLedger::new(config.poll.candidates.clone(), window);

    config.save(&config_path)?;
    StoredLedger::create(ledger.snapshot(), now_ms).save(&state_path)?;

    println!("Initialized Tessera ledger at {}", config_path.display());
    println!("  Candidates: {}", config.poll.candidates.join(", "));
    println!("  Opens:      {}", super::format_ms(window.opens_at_ms()));
    println!("  Closes:     {}", super::format_ms(window.closes_at_ms()));
    println!("Run 'tessera cast' to record a ballot.");

    Ok(())
}
