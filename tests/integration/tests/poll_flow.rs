//! Integration test: admission-controlled polling over a full ledger lifecycle.
//!
//! Drives the poll through open, cast, reject, and close phases, checks the
//! leaderboard rules, and follows ballots through observers and snapshots.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tessera_core::{AdmissionWindow, Identity, LedgerError};
use tessera_ledger::{BallotCast, IdentityLedger, PollObserver};

/// Helper: five named candidates, window open over [100, 200] inclusive.
fn five_way_ledger() -> IdentityLedger {
    IdentityLedger::new(
        vec![
            "Alpha".to_string(),
            "Beta".to_string(),
            "Gamma".to_string(),
            "Delta".to_string(),
            "Epsilon".to_string(),
        ],
        AdmissionWindow::new(100, 200).unwrap(),
    )
}

// =========================================================================
// Admission scenario: one window, several identities
// =========================================================================

#[test]
fn test_single_window_admission_scenario() {
    let ledger = five_way_ledger();
    let a = Identity::new("identity-a");
    let b = Identity::new("identity-b");

    // A casts at the opening instant.
    let ballot = ledger.cast_ballot(&a, 2, 100).unwrap();
    assert_eq!(ballot.choice, 2);
    assert_eq!(ballot.cast_at_ms, 100);

    // A tries to re-vote mid-window.
    let result = ledger.cast_ballot(&a, 1, 150);
    assert!(matches!(result, Err(LedgerError::AlreadyActed { .. })));

    // B names a choice beyond the five candidates.
    let result = ledger.cast_ballot(&b, 9, 150);
    assert!(matches!(
        result,
        Err(LedgerError::InvalidChoice {
            choice: 9,
            candidate_count: 5
        })
    ));

    // After the close, no time remains.
    assert_eq!(ledger.time_remaining_ms(250), 0);

    // Only A's original ballot survives.
    assert!(ledger.has_acted(&a));
    assert!(!ledger.has_acted(&b));
    assert_eq!(ledger.voters(), vec![a.clone()]);
    assert_eq!(ledger.tally(), vec![0, 0, 1, 0, 0]);
    assert_eq!(ledger.ballot_of(&a).unwrap().choice, 2);
}

#[test]
fn test_window_bounds_are_inclusive() {
    let ledger = five_way_ledger();

    let before = ledger.cast_ballot(&Identity::new("early"), 0, 99);
    assert!(matches!(before, Err(LedgerError::NotYetOpen { .. })));

    ledger.cast_ballot(&Identity::new("at-open"), 0, 100).unwrap();
    ledger.cast_ballot(&Identity::new("at-close"), 1, 200).unwrap();

    let after = ledger.cast_ballot(&Identity::new("late"), 0, 201);
    assert!(matches!(after, Err(LedgerError::WindowClosed { .. })));

    assert_eq!(ledger.turnout(), 2);
}

#[test]
fn test_time_remaining_counts_down_to_zero() {
    let ledger = five_way_ledger();
    assert_eq!(ledger.time_remaining_ms(100), 100);
    assert_eq!(ledger.time_remaining_ms(150), 50);
    assert_eq!(ledger.time_remaining_ms(200), 0);
    assert_eq!(ledger.time_remaining_ms(900), 0);
}

#[test]
fn test_rejected_casts_never_change_state() {
    let ledger = five_way_ledger();
    let a = Identity::new("identity-a");
    ledger.cast_ballot(&a, 4, 120).unwrap();

    ledger.cast_ballot(&a, 0, 130).unwrap_err();
    ledger.cast_ballot(&Identity::new("b"), 200, 140).unwrap_err();
    ledger.cast_ballot(&Identity::new("c"), 0, 300).unwrap_err();
    ledger.cast_ballot(&Identity::new("d"), 0, 5).unwrap_err();

    assert_eq!(ledger.turnout(), 1);
    assert_eq!(ledger.tally(), vec![0, 0, 0, 0, 1]);
    let total: u64 = ledger.tally().iter().sum();
    assert_eq!(total, ledger.voters().len() as u64);
}

// =========================================================================
// Leaderboard rules
// =========================================================================

#[test]
fn test_leaderboard_tie_goes_to_lowest_index() {
    let ledger = five_way_ledger();

    // Tally ends up [5, 5, 3, 0, 0].
    for n in 0..5 {
        let voter = Identity::new(format!("alpha-voter-{}", n));
        ledger.cast_ballot(&voter, 0, 150).unwrap();
    }
    for n in 0..5 {
        let voter = Identity::new(format!("beta-voter-{}", n));
        ledger.cast_ballot(&voter, 1, 150).unwrap();
    }
    for n in 0..3 {
        let voter = Identity::new(format!("gamma-voter-{}", n));
        ledger.cast_ballot(&voter, 2, 150).unwrap();
    }

    assert_eq!(ledger.tally(), vec![5, 5, 3, 0, 0]);
    assert_eq!(ledger.leading_choice(), (0, 5));
}

#[test]
fn test_leaderboard_with_no_ballots() {
    let ledger = five_way_ledger();
    assert_eq!(ledger.leading_choice(), (0, 0));
}

#[test]
fn test_leaderboard_follows_an_overtake() {
    let ledger = five_way_ledger();

    ledger.cast_ballot(&Identity::new("one"), 3, 110).unwrap();
    assert_eq!(ledger.leading_choice(), (3, 1));

    // A tie at one vote each keeps the earlier index in front.
    ledger.cast_ballot(&Identity::new("two"), 1, 120).unwrap();
    assert_eq!(ledger.leading_choice(), (1, 1));

    ledger.cast_ballot(&Identity::new("three"), 3, 130).unwrap();
    assert_eq!(ledger.leading_choice(), (3, 2));
}

// =========================================================================
// Observers: in-process and broadcast delivery
// =========================================================================

struct CountingObserver {
    seen: Arc<AtomicUsize>,
}

impl PollObserver for CountingObserver {
    fn on_ballot_cast(&self, _event: &BallotCast) {
        self.seen.fetch_add(1, Ordering::SeqCst);
    }
}

struct RecordingObserver {
    log: Arc<Mutex<Vec<BallotCast>>>,
}

impl PollObserver for RecordingObserver {
    fn on_ballot_cast(&self, event: &BallotCast) {
        self.log.lock().unwrap().push(event.clone());
    }
}

#[test]
fn test_observer_sees_only_successful_casts() {
    let ledger = five_way_ledger();
    let seen = Arc::new(AtomicUsize::new(0));
    ledger.subscribe(Box::new(CountingObserver { seen: seen.clone() }));

    ledger.cast_ballot(&Identity::new("a"), 0, 110).unwrap();
    ledger.cast_ballot(&Identity::new("a"), 1, 120).unwrap_err();
    ledger.cast_ballot(&Identity::new("b"), 9, 130).unwrap_err();
    ledger.cast_ballot(&Identity::new("c"), 0, 50).unwrap_err();
    ledger.cast_ballot(&Identity::new("d"), 2, 140).unwrap();

    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

#[test]
fn test_observer_delivery_matches_commit_order() {
    let ledger = five_way_ledger();
    let log = Arc::new(Mutex::new(Vec::new()));
    ledger.subscribe(Box::new(RecordingObserver { log: log.clone() }));

    ledger.cast_ballot(&Identity::new("first"), 1, 110).unwrap();
    ledger.cast_ballot(&Identity::new("second"), 4, 120).unwrap();
    ledger.cast_ballot(&Identity::new("third"), 1, 130).unwrap();

    let seen = log.lock().unwrap();
    let order: Vec<&str> = seen.iter().map(|event| event.identity.as_str()).collect();
    assert_eq!(order, vec!["first", "second", "third"]);
    assert_eq!(seen[1].choice, 4);
    assert_eq!(seen[2].cast_at_ms, 130);
}

#[tokio::test]
async fn test_broadcast_observer_feeds_async_consumers() {
    let ledger = five_way_ledger();
    let broadcast = tessera_ledger::BroadcastObserver::new(16);
    let mut receiver = broadcast.subscribe();
    ledger.subscribe(Box::new(broadcast.clone()));

    ledger.cast_ballot(&Identity::new("a"), 2, 110).unwrap();

    // A receiver that joins late only sees ballots cast after it subscribed.
    let mut late_receiver = broadcast.subscribe();
    ledger.cast_ballot(&Identity::new("b"), 0, 120).unwrap();

    let first = receiver.recv().await.unwrap();
    assert_eq!(first.identity, Identity::new("a"));
    assert_eq!(first.choice, 2);

    let second = receiver.recv().await.unwrap();
    assert_eq!(second.identity, Identity::new("b"));
    assert_eq!(second.cast_at_ms, 120);

    let only = late_receiver.recv().await.unwrap();
    assert_eq!(only.identity, Identity::new("b"));
    assert!(late_receiver.try_recv().is_err());
}

// =========================================================================
// Concurrency: one ballot per identity, no lost counts
// =========================================================================

#[test]
fn test_racing_casts_by_one_identity_admit_exactly_one() {
    let ledger = Arc::new(five_way_ledger());
    let mut handles = Vec::new();

    for attempt in 0..8 {
        let ledger = ledger.clone();
        handles.push(std::thread::spawn(move || {
            let choice = (attempt % 5) as u8;
            ledger
                .cast_ballot(&Identity::new("contended"), choice, 150)
                .is_ok()
        }));
    }

    let admitted = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|admitted| *admitted)
        .count();

    assert_eq!(admitted, 1);
    assert_eq!(ledger.turnout(), 1);
    let total: u64 = ledger.tally().iter().sum();
    assert_eq!(total, 1);
}

#[test]
fn test_parallel_casts_by_distinct_identities_all_land() {
    let ledger = Arc::new(five_way_ledger());
    let mut handles = Vec::new();

    for n in 0..20 {
        let ledger = ledger.clone();
        handles.push(std::thread::spawn(move || {
            let voter = Identity::new(format!("voter-{}", n));
            ledger.cast_ballot(&voter, (n % 5) as u8, 150).unwrap();
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(ledger.turnout(), 20);
    assert_eq!(ledger.tally(), vec![4, 4, 4, 4, 4]);
    assert_eq!(ledger.voters().len(), 20);
}

// =========================================================================
// Snapshots: ballots survive a save and reload
// =========================================================================

#[test]
fn test_poll_state_survives_snapshot_and_restore() {
    let ledger = five_way_ledger();
    ledger.cast_ballot(&Identity::new("a"), 2, 110).unwrap();
    ledger.cast_ballot(&Identity::new("b"), 2, 120).unwrap();
    ledger.cast_ballot(&Identity::new("c"), 0, 130).unwrap();

    let json = serde_json::to_string(&ledger.snapshot()).unwrap();
    let restored = IdentityLedger::restore(serde_json::from_str(&json).unwrap()).unwrap();

    assert_eq!(restored.tally(), vec![1, 0, 2, 0, 0]);
    assert_eq!(restored.leading_choice(), (2, 2));
    assert_eq!(
        restored.voters(),
        vec![Identity::new("a"), Identity::new("b"), Identity::new("c")]
    );

    // The restored poll keeps enforcing the one-ballot rule and the window.
    let result = restored.cast_ballot(&Identity::new("a"), 1, 140);
    assert!(matches!(result, Err(LedgerError::AlreadyActed { .. })));
    restored.cast_ballot(&Identity::new("d"), 4, 150).unwrap();
    assert_eq!(restored.turnout(), 4);
}
