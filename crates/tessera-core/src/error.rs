use crate::types::Identity;

/// Ledger precondition violations.
///
/// None of these are transient: each one is a caller error, and the rejected
/// mutation leaves no partial state change.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid admission window: closes_at {closes_at_ms} is not after opens_at {opens_at_ms}")]
    InvalidWindow { opens_at_ms: u64, closes_at_ms: u64 },

    #[error("poll not open yet: opens at {opens_at_ms}, now is {now_ms}")]
    NotYetOpen { opens_at_ms: u64, now_ms: u64 },

    #[error("poll closed: closed at {closes_at_ms}, now is {now_ms}")]
    WindowClosed { closes_at_ms: u64, now_ms: u64 },

    #[error("identity {identity} has already cast a ballot")]
    AlreadyActed { identity: Identity },

    #[error("choice {choice} is out of range for {candidate_count} candidates")]
    InvalidChoice { choice: u8, candidate_count: usize },
}
