//! CLI subcommand implementations.

pub mod append;
pub mod cast;
pub mod entries;
pub mod init;
pub mod standing;

/// Current wall-clock time in milliseconds since the UNIX epoch.
pub(crate) fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}

/// Render a millisecond timestamp as UTC, falling back to the raw value.
pub(crate) fn format_ms(ms: u64) -> String {
    match chrono::DateTime::from_timestamp_millis(ms as i64) {
        Some(instant) => instant.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("{}ms", ms),
    }
}
