//! Tessera Ledger — The embeddable ledger component: per-identity journal,
//! admission-controlled poll, ballot notifications, and state snapshots.

pub mod events;
pub mod journal;
pub mod ledger;
pub mod poll;
pub mod snapshot;

pub use events::{BallotCast, BroadcastObserver, PollObserver};
pub use journal::Journal;
pub use ledger::IdentityLedger;
pub use poll::Poll;
pub use snapshot::{BallotRecord, LedgerSnapshot, SnapshotError};
