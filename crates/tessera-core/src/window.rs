use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// The inclusive `[opens_at, closes_at]` time range during which ballots are
/// admitted.
///
/// Fixed once at construction; `closes_at_ms > opens_at_ms` is enforced there
/// and holds for the lifetime of the window. All times are caller-supplied
/// milliseconds since the UNIX epoch; the window never reads a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionWindow {
    opens_at_ms: u64,
    closes_at_ms: u64,
}

impl AdmissionWindow {
    /// Create a window from absolute open/close times.
    pub fn new(opens_at_ms: u64, closes_at_ms: u64) -> Result<Self, LedgerError> {
        if closes_at_ms <= opens_at_ms {
            return Err(LedgerError::InvalidWindow {
                opens_at_ms,
                closes_at_ms,
            });
        }
        Ok(Self {
            opens_at_ms,
            closes_at_ms,
        })
    }

    /// Create a window that opens `delay_ms` after `now_ms` and stays open
    /// for `duration_ms`.
    pub fn from_delay(now_ms: u64, delay_ms: u64, duration_ms: u64) -> Result<Self, LedgerError> {
        let opens_at_ms = now_ms.saturating_add(delay_ms);
        Self::new(opens_at_ms, opens_at_ms.saturating_add(duration_ms))
    }

    /// When the window opens (inclusive).
    pub fn opens_at_ms(&self) -> u64 {
        self.opens_at_ms
    }

    /// When the window closes (inclusive).
    pub fn closes_at_ms(&self) -> u64 {
        self.closes_at_ms
    }

    /// Total length of the window.
    pub fn duration_ms(&self) -> u64 {
        self.closes_at_ms - self.opens_at_ms
    }

    /// Whether the window has opened at `now_ms`.
    pub fn has_opened(&self, now_ms: u64) -> bool {
        now_ms >= self.opens_at_ms
    }

    /// Whether the window has closed at `now_ms`. The closing instant itself
    /// is still inside the window.
    pub fn has_closed(&self, now_ms: u64) -> bool {
        now_ms > self.closes_at_ms
    }

    /// Whether `now_ms` falls inside the window, both bounds inclusive.
    pub fn contains(&self, now_ms: u64) -> bool {
        self.has_opened(now_ms) && !self.has_closed(now_ms)
    }

    /// Milliseconds until the window closes. Zero once closed, never
    /// negative.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.closes_at_ms.saturating_sub(now_ms)
    }
}
