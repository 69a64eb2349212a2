//! Tessera Core — Fundamental types and errors for the Tessera ledger.
//!
//! Everything here is plain data: opaque identities, journal entries with a
//! mood tag, one-shot ballots, and the admission window that gates when
//! ballots may be cast. Time is caller-supplied milliseconds throughout;
//! nothing in this crate reads a clock.

pub mod error;
pub mod types;
pub mod window;

pub use error::LedgerError;
pub use types::{Ballot, Entry, Identity, Mood};
pub use window::AdmissionWindow;
