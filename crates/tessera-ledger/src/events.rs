//! Ballot notifications.
//!
//! Observers are invoked synchronously inside the cast's critical section,
//! in registration order. Delivery order therefore equals commit order.
//! Implementations must return quickly and must not call back into the poll.

use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tessera_core::Identity;
use tokio::sync::broadcast;

/// Emitted once for every successfully recorded ballot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotCast {
    pub identity: Identity,
    pub choice: u8,
    pub cast_at_ms: u64,
}

/// Receives ballot notifications.
pub trait PollObserver: Send + Sync {
    fn on_ballot_cast(&self, event: &BallotCast);
}

/// Registered observers, notified in registration order.
#[derive(Default)]
pub(crate) struct ObserverSet {
    observers: RwLock<Vec<Box<dyn PollObserver>>>,
}

impl ObserverSet {
    pub(crate) fn register(&self, observer: Box<dyn PollObserver>) {
        self.observers.write().unwrap().push(observer);
    }

    pub(crate) fn notify(&self, event: &BallotCast) {
        for observer in self.observers.read().unwrap().iter() {
            observer.on_ballot_cast(event);
        }
    }
}

/// Observer that forwards every notification into a tokio broadcast channel.
///
/// Clones share the underlying channel, so an embedding can keep one handle
/// for [`BroadcastObserver::subscribe`] and register another with the ledger.
/// Receivers only see ballots cast after they subscribed.
#[derive(Clone)]
pub struct BroadcastObserver {
    sender: broadcast::Sender<BallotCast>,
}

impl BroadcastObserver {
    /// Create an observer whose channel buffers up to `capacity` events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Open a new receiver on the channel.
    pub fn subscribe(&self) -> broadcast::Receiver<BallotCast> {
        self.sender.subscribe()
    }
}

impl PollObserver for BroadcastObserver {
    fn on_ballot_cast(&self, event: &BallotCast) {
        // A send error only means no receiver is currently subscribed.
        let _ = self.sender.send(event.clone());
    }
}
