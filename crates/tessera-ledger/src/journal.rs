//! Per-identity journal: append-only sequences of entries.
//!
//! Each identity owns an independent sequence. Entries are assigned
//! zero-based positions in append order and are never rewritten or removed.

use dashmap::DashMap;
use tessera_core::{Entry, Identity, Mood};

/// Concurrent append-only store of per-identity entry sequences.
pub struct Journal {
    entries: DashMap<Identity, Vec<Entry>>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Append an entry to the identity's sequence and return its position.
    ///
    /// The first entry for an identity lands at position 0.
    pub fn append(
        &self,
        identity: &Identity,
        title: impl Into<String>,
        content: impl Into<String>,
        mood: Mood,
        now_ms: u64,
    ) -> u64 {
        let entry = Entry::new(title, content, mood, now_ms);
        let mut sequence = self
            .entries
            .entry(identity.clone())
            .or_insert_with(Vec::new);
        sequence.push(entry);
        let position = (sequence.len() - 1) as u64;

        tracing::debug!(identity = %identity, position, mood = %mood, "journal entry appended");
        position
    }

    /// All entries for an identity, oldest first. Empty for unknown identities.
    pub fn entries(&self, identity: &Identity) -> Vec<Entry> {
        self.entries
            .get(identity)
            .map(|sequence| sequence.clone())
            .unwrap_or_default()
    }

    /// Entries for an identity carrying the given mood, oldest first.
    pub fn entries_with_mood(&self, identity: &Identity, mood: Mood) -> Vec<Entry> {
        self.entries
            .get(identity)
            .map(|sequence| {
                sequence
                    .iter()
                    .filter(|entry| entry.mood == mood)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of entries recorded for an identity.
    pub fn entry_count(&self, identity: &Identity) -> usize {
        self.entries
            .get(identity)
            .map(|sequence| sequence.len())
            .unwrap_or(0)
    }

    /// Number of identities that have appended at least one entry.
    pub fn identity_count(&self) -> usize {
        self.entries.len()
    }

    /// True when no identity has appended anything yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy out every sequence, keyed by identity, for snapshotting.
    pub(crate) fn export(&self) -> std::collections::BTreeMap<Identity, Vec<Entry>> {
        self.entries
            .iter()
            .map(|item| (item.key().clone(), item.value().clone()))
            .collect()
    }

    /// Rebuild a journal from exported sequences.
    pub(crate) fn from_export(
        exported: std::collections::BTreeMap<Identity, Vec<Entry>>,
    ) -> Self {
        let journal = Self::new();
        for (identity, sequence) in exported {
            journal.entries.insert(identity, sequence);
        }
        journal
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}
