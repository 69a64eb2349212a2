//! CLI configuration loading and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Full configuration for the Tessera CLI.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TesseraConfig {
    /// State file settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Poll settings applied when a ledger is initialized.
    #[serde(default)]
    pub poll: PollConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the ledger state file.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Candidate labels, in choice order.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,
    /// Seconds between initialization and the window opening.
    #[serde(default)]
    pub opens_in_secs: u64,
    /// Seconds the window stays open once it has opened.
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_state_file() -> PathBuf {
    PathBuf::from("./tessera-state.json")
}
fn default_candidates() -> Vec<String> {
    vec![
        "Alpha".to_string(),
        "Beta".to_string(),
        "Gamma".to_string(),
        "Delta".to_string(),
        "Epsilon".to_string(),
    ]
}
fn default_duration_secs() -> u64 {
    3_600
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
            opens_in_secs: 0,
            duration_secs: default_duration_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TesseraConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: TesseraConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Window open delay in milliseconds.
    pub fn opens_in_ms(&self) -> u64 {
        self.poll.opens_in_secs.saturating_mul(1_000)
    }

    /// Window duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.poll.duration_secs.saturating_mul(1_000)
    }
}
