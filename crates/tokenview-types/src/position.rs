use std::fmt;

use serde::{Deserialize, Serialize};

/// Position in the transfer-event stream.
///
/// Monotonically increasing: every event the ingestion pipeline applies
/// (deploy, mint, transfer inscribe, transfer send) advances it by one. Used
/// only as a freshness key, never as ledger data.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventPosition(u64);

impl EventPosition {
    /// Position of an empty ledger.
    pub const GENESIS: Self = Self(0);

    pub const fn new(seq: u64) -> Self {
        Self(seq)
    }

    pub const fn seq(&self) -> u64 {
        self.0
    }

    /// The position after one more applied event.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns `true` if a value recorded at `self` is still fresh against
    /// the `current` watermark.
    pub fn covers(&self, current: &Self) -> bool {
        self >= current
    }
}

impl fmt::Debug for EventPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventPosition({})", self.0)
    }
}

impl fmt::Display for EventPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
