//! Single-action poll with a time-bounded admission window.
//!
//! Every identity may cast exactly one ballot while the window is open.
//! Ballots are final: there is no update and no retraction. The candidate
//! roster and window are fixed at construction.

use std::collections::HashMap;
use std::sync::RwLock;

use tessera_core::{AdmissionWindow, Ballot, Identity, LedgerError};

use crate::events::{BallotCast, ObserverSet, PollObserver};
use crate::snapshot::{BallotRecord, SnapshotError};

/// Mutable poll state, guarded as one unit so a cast commits atomically.
struct PollState {
    ballots: HashMap<Identity, Ballot>,
    tally: Vec<u64>,
    voters: Vec<Identity>,
}

/// Admission-controlled, one-ballot-per-identity poll.
///
/// Thread-safe: a single `RwLock` covers ballots, tally, and the voter roll,
/// so concurrent casts serialize and every reader sees a consistent view.
pub struct Poll {
    candidates: Vec<String>,
    window: AdmissionWindow,
    state: RwLock<PollState>,
    observers: ObserverSet,
}

impl Poll {
    /// Create a poll over the given candidate labels and admission window.
    ///
    /// Choices index into `candidates`, so at most 256 candidates are
    /// addressable. The roster may be empty, in which case every cast
    /// fails with an out-of-range choice.
    pub fn new(candidates: Vec<String>, window: AdmissionWindow) -> Self {
        let tally = vec![0; candidates.len()];
        Self {
            candidates,
            window,
            state: RwLock::new(PollState {
                ballots: HashMap::new(),
                tally,
                voters: Vec::new(),
            }),
            observers: ObserverSet::default(),
        }
    }

    /// Record a ballot for `identity` at time `now_ms`.
    ///
    /// Admission is checked in a fixed order: window not yet open, window
    /// closed, identity already acted, choice out of range. The first
    /// failing check decides the error.
    pub fn cast(
        &self,
        identity: &Identity,
        choice: u8,
        now_ms: u64,
    ) -> Result<Ballot, LedgerError> {
        let mut state = self.state.write().unwrap();

        if !self.window.has_opened(now_ms) {
            return Err(LedgerError::NotYetOpen {
                opens_at_ms: self.window.opens_at_ms(),
                now_ms,
            });
        }

        if self.window.has_closed(now_ms) {
            return Err(LedgerError::WindowClosed {
                closes_at_ms: self.window.closes_at_ms(),
                now_ms,
            });
        }

        if state.ballots.contains_key(identity) {
            return Err(LedgerError::AlreadyActed {
                identity: identity.clone(),
            });
        }

        if (choice as usize) >= self.candidates.len() {
            return Err(LedgerError::InvalidChoice {
                choice,
                candidate_count: self.candidates.len(),
            });
        }

        let ballot = Ballot {
            choice,
            cast_at_ms: now_ms,
        };
        state.ballots.insert(identity.clone(), ballot);
        state.tally[choice as usize] += 1;
        state.voters.push(identity.clone());

        tracing::info!(identity = %identity, choice, "ballot cast");

        // Observers run while the lock is held: delivery order is commit order.
        self.observers.notify(&BallotCast {
            identity: identity.clone(),
            choice,
            cast_at_ms: now_ms,
        });

        Ok(ballot)
    }

    /// Current leader as `(choice, votes)`.
    ///
    /// Ties go to the lowest choice index. With no ballots (or an empty
    /// roster) this is `(0, 0)`.
    pub fn leading(&self) -> (u8, u64) {
        let state = self.state.read().unwrap();
        let mut leading_choice = 0u8;
        let mut leading_votes = 0u64;
        for (index, &votes) in state.tally.iter().enumerate() {
            // Strictly greater: an equal count never displaces an earlier leader.
            if votes > leading_votes {
                leading_choice = index as u8;
                leading_votes = votes;
            }
        }
        (leading_choice, leading_votes)
    }

    /// Register an observer for future casts.
    pub fn subscribe(&self, observer: Box<dyn PollObserver>) {
        self.observers.register(observer);
    }

    /// Vote counts per candidate, indexed by choice.
    pub fn tally(&self) -> Vec<u64> {
        self.state.read().unwrap().tally.clone()
    }

    /// Votes recorded for one choice, or `None` if the choice is out of range.
    pub fn votes_for(&self, choice: u8) -> Option<u64> {
        self.state
            .read()
            .unwrap()
            .tally
            .get(choice as usize)
            .copied()
    }

    /// The ballot an identity cast, if any.
    pub fn ballot_of(&self, identity: &Identity) -> Option<Ballot> {
        self.state.read().unwrap().ballots.get(identity).copied()
    }

    /// Whether an identity has already cast a ballot.
    pub fn has_acted(&self, identity: &Identity) -> bool {
        self.state.read().unwrap().ballots.contains_key(identity)
    }

    /// Identities that have cast, in cast order.
    pub fn voters(&self) -> Vec<Identity> {
        self.state.read().unwrap().voters.clone()
    }

    /// Number of ballots recorded so far.
    pub fn turnout(&self) -> usize {
        self.state.read().unwrap().ballots.len()
    }

    /// The candidate labels, in choice order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Label for one choice, or `None` if the choice is out of range.
    pub fn candidate_label(&self, choice: u8) -> Option<&str> {
        self.candidates.get(choice as usize).map(String::as_str)
    }

    /// Number of candidates on the roster.
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// The poll's admission window.
    pub fn window(&self) -> AdmissionWindow {
        self.window
    }

    /// Milliseconds until the window closes; zero once it has.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.window.remaining_ms(now_ms)
    }

    /// Whether a cast at `now_ms` would pass the window checks.
    pub fn is_open(&self, now_ms: u64) -> bool {
        self.window.contains(now_ms)
    }

    /// Recorded ballots in cast order, for snapshotting.
    pub(crate) fn export(&self) -> Vec<BallotRecord> {
        let state = self.state.read().unwrap();
        state
            .voters
            .iter()
            .map(|identity| {
                let ballot = state.ballots[identity];
                BallotRecord {
                    identity: identity.clone(),
                    choice: ballot.choice,
                    cast_at_ms: ballot.cast_at_ms,
                }
            })
            .collect()
    }

    /// Replay exported ballots into a freshly constructed poll.
    ///
    /// Validates each record against the roster, the window, and the
    /// one-ballot rule, and rebuilds the tally and voter roll. Observers
    /// are not notified for replayed ballots.
    pub(crate) fn restore(&self, records: &[BallotRecord]) -> Result<(), SnapshotError> {
        let mut state = self.state.write().unwrap();

        for record in records {
            if (record.choice as usize) >= self.candidates.len() {
                return Err(SnapshotError::ChoiceOutOfRange {
                    identity: record.identity.clone(),
                    choice: record.choice,
                    candidate_count: self.candidates.len(),
                });
            }
            if !self.window.contains(record.cast_at_ms) {
                return Err(SnapshotError::BallotOutsideWindow {
                    identity: record.identity.clone(),
                    cast_at_ms: record.cast_at_ms,
                });
            }
            if state.ballots.contains_key(&record.identity) {
                return Err(SnapshotError::DuplicateBallot {
                    identity: record.identity.clone(),
                });
            }

            state.ballots.insert(
                record.identity.clone(),
                Ballot {
                    choice: record.choice,
                    cast_at_ms: record.cast_at_ms,
                },
            );
            state.tally[record.choice as usize] += 1;
            state.voters.push(record.identity.clone());
        }

        Ok(())
    }
}
