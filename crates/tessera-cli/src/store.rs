//! Ledger state file: a JSON-serialized snapshot plus identifying metadata.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tessera_ledger::LedgerSnapshot;
use uuid::Uuid;

/// On-disk form of a ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredLedger {
    /// Stable identifier assigned at initialization.
    pub ledger_id: Uuid,
    /// When the ledger was initialized, milliseconds since the UNIX epoch.
    pub created_at_ms: u64,
    /// The full ledger state.
    pub snapshot: LedgerSnapshot,
}

impl StoredLedger {
    /// Wrap a fresh snapshot with a newly minted identifier.
    pub fn create(snapshot: LedgerSnapshot, now_ms: u64) -> Self {
        Self {
            ledger_id: Uuid::now_v7(),
            created_at_ms: now_ms,
            snapshot,
        }
    }

    /// Load a stored ledger from a JSON state file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "no ledger state at {}; run 'tessera init' first",
                path.display()
            );
        }
        let contents = std::fs::read_to_string(path)?;
        let stored: StoredLedger = serde_json::from_str(&contents)?;
        Ok(stored)
    }

    /// Save the stored ledger to a JSON state file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        tracing::debug!(path = %path.display(), "ledger state written");
        Ok(())
    }
}
