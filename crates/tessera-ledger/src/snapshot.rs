//! Serializable snapshots of ledger state.
//!
//! A snapshot captures the candidate roster, the admission window, every
//! journal sequence, and every ballot in cast order. Tallies are not stored;
//! restore recomputes them from the ballots, so a stored tally can never
//! disagree with the ballots it came from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tessera_core::{Entry, Identity};
use thiserror::Error;

/// One recorded ballot, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotRecord {
    pub identity: Identity,
    pub choice: u8,
    pub cast_at_ms: u64,
}

/// Complete serializable image of a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Candidate labels, in choice order.
    pub candidates: Vec<String>,
    /// Window open instant, milliseconds since the UNIX epoch.
    pub opens_at_ms: u64,
    /// Window close instant, inclusive.
    pub closes_at_ms: u64,
    /// Journal sequences keyed by identity, each in append order.
    pub entries: BTreeMap<Identity, Vec<Entry>>,
    /// Ballots in the order they were cast.
    pub ballots: Vec<BallotRecord>,
}

/// Why a snapshot was rejected on restore.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The stored window bounds do not form a valid window.
    #[error("snapshot window is invalid: closes_at {closes_at_ms}ms is not after opens_at {opens_at_ms}ms")]
    InvalidWindow { opens_at_ms: u64, closes_at_ms: u64 },

    /// A ballot names a choice outside the stored roster.
    #[error("ballot for {identity} names choice {choice}, but the roster has {candidate_count} candidates")]
    ChoiceOutOfRange {
        identity: Identity,
        choice: u8,
        candidate_count: usize,
    },

    /// A ballot claims a cast time outside the stored window.
    #[error("ballot for {identity} was cast at {cast_at_ms}ms, outside the admission window")]
    BallotOutsideWindow { identity: Identity, cast_at_ms: u64 },

    /// Two ballots name the same identity.
    #[error("snapshot holds more than one ballot for {identity}")]
    DuplicateBallot { identity: Identity },
}
