//! The combined ledger: journal plus poll behind one handle.

use tessera_core::{AdmissionWindow, Ballot, Entry, Identity, LedgerError, Mood};

use crate::events::PollObserver;
use crate::journal::Journal;
use crate::poll::Poll;
use crate::snapshot::{LedgerSnapshot, SnapshotError};

/// Append-only per-identity ledger with an admission-controlled poll.
///
/// One instance owns all state. All methods take `&self` and are safe to
/// call from multiple threads. The embedding application supplies every
/// timestamp; the ledger itself never reads a clock.
pub struct IdentityLedger {
    journal: Journal,
    poll: Poll,
}

impl IdentityLedger {
    /// Create a ledger over the given candidate roster and admission window.
    pub fn new(candidates: Vec<String>, window: AdmissionWindow) -> Self {
        Self {
            journal: Journal::new(),
            poll: Poll::new(candidates, window),
        }
    }

    // ---- journal ----

    /// Append a journal entry for `identity`. Returns the entry's position
    /// in that identity's sequence, starting at 0.
    pub fn append_entry(
        &self,
        identity: &Identity,
        title: impl Into<String>,
        content: impl Into<String>,
        mood: Mood,
        now_ms: u64,
    ) -> u64 {
        self.journal.append(identity, title, content, mood, now_ms)
    }

    /// All journal entries for an identity, oldest first.
    pub fn entries(&self, identity: &Identity) -> Vec<Entry> {
        self.journal.entries(identity)
    }

    /// Journal entries for an identity carrying the given mood, oldest first.
    pub fn entries_with_mood(&self, identity: &Identity, mood: Mood) -> Vec<Entry> {
        self.journal.entries_with_mood(identity, mood)
    }

    /// Number of journal entries recorded for an identity.
    pub fn entry_count(&self, identity: &Identity) -> usize {
        self.journal.entry_count(identity)
    }

    /// Number of identities with at least one journal entry.
    pub fn journal_identity_count(&self) -> usize {
        self.journal.identity_count()
    }

    // ---- poll ----

    /// Cast a ballot for `identity` at time `now_ms`.
    pub fn cast_ballot(
        &self,
        identity: &Identity,
        choice: u8,
        now_ms: u64,
    ) -> Result<Ballot, LedgerError> {
        self.poll.cast(identity, choice, now_ms)
    }

    /// Current leader as `(choice, votes)`; ties go to the lowest index.
    pub fn leading_choice(&self) -> (u8, u64) {
        self.poll.leading()
    }

    /// Milliseconds until the window closes; zero once it has.
    pub fn time_remaining_ms(&self, now_ms: u64) -> u64 {
        self.poll.remaining_ms(now_ms)
    }

    /// Identities that have cast a ballot, in cast order.
    pub fn voters(&self) -> Vec<Identity> {
        self.poll.voters()
    }

    /// Whether an identity has already cast a ballot.
    pub fn has_acted(&self, identity: &Identity) -> bool {
        self.poll.has_acted(identity)
    }

    /// The ballot an identity cast, if any.
    pub fn ballot_of(&self, identity: &Identity) -> Option<Ballot> {
        self.poll.ballot_of(identity)
    }

    /// Vote counts per candidate, indexed by choice.
    pub fn tally(&self) -> Vec<u64> {
        self.poll.tally()
    }

    /// Votes recorded for one choice, or `None` if out of range.
    pub fn votes_for(&self, choice: u8) -> Option<u64> {
        self.poll.votes_for(choice)
    }

    /// Number of ballots recorded so far.
    pub fn turnout(&self) -> usize {
        self.poll.turnout()
    }

    /// The candidate labels, in choice order.
    pub fn candidates(&self) -> &[String] {
        self.poll.candidates()
    }

    /// Label for one choice, or `None` if out of range.
    pub fn candidate_label(&self, choice: u8) -> Option<&str> {
        self.poll.candidate_label(choice)
    }

    /// Number of candidates on the roster.
    pub fn candidate_count(&self) -> usize {
        self.poll.candidate_count()
    }

    /// The poll's admission window.
    pub fn window(&self) -> AdmissionWindow {
        self.poll.window()
    }

    /// Whether a ballot cast at `now_ms` would pass the window checks.
    pub fn is_open(&self, now_ms: u64) -> bool {
        self.poll.is_open(now_ms)
    }

    /// Whether the window has opened at `now_ms`.
    pub fn has_opened(&self, now_ms: u64) -> bool {
        self.poll.window().has_opened(now_ms)
    }

    /// Whether the window has closed at `now_ms`.
    pub fn has_closed(&self, now_ms: u64) -> bool {
        self.poll.window().has_closed(now_ms)
    }

    // ---- observation ----

    /// Register an observer for future ballot casts.
    pub fn subscribe(&self, observer: Box<dyn PollObserver>) {
        self.poll.subscribe(observer);
    }

    // ---- snapshots ----

    /// Capture the full ledger state as a serializable snapshot.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let window = self.poll.window();
        LedgerSnapshot {
            candidates: self.poll.candidates().to_vec(),
            opens_at_ms: window.opens_at_ms(),
            closes_at_ms: window.closes_at_ms(),
            entries: self.journal.export(),
            ballots: self.poll.export(),
        }
    }

    /// Rebuild a ledger from a snapshot.
    ///
    /// The stored window, every ballot's choice and cast time, and the
    /// one-ballot-per-identity rule are all revalidated; tallies and the
    /// voter roll are recomputed from the ballots.
    pub fn restore(snapshot: LedgerSnapshot) -> Result<Self, SnapshotError> {
        let window = AdmissionWindow::new(snapshot.opens_at_ms, snapshot.closes_at_ms).map_err(
            |_| SnapshotError::InvalidWindow {
                opens_at_ms: snapshot.opens_at_ms,
                closes_at_ms: snapshot.closes_at_ms,
            },
        )?;

        let poll = Poll::new(snapshot.candidates, window);
        poll.restore(&snapshot.ballots)?;

        let ledger = Self {
            journal: Journal::from_export(snapshot.entries),
            poll,
        };

        tracing::debug!(
            identities = ledger.journal_identity_count(),
            ballots = ledger.turnout(),
            "ledger restored from snapshot"
        );
        Ok(ledger)
    }
}
