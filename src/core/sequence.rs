//! Invocation tickets used to discard stale resolutions.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic tag handed to each invocation at call time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues tickets and remembers the latest one.
#[derive(Debug, Default)]
pub struct Sequencer {
    latest: AtomicU64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket. The first ticket is 1.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// True when no ticket has been issued after `ticket`.
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    pub fn latest(&self) -> Option<Ticket> {
        match self.latest.load(Ordering::Acquire) {
            0 => None,
            n => Some(Ticket(n)),
        }
    }
}

/// How a container treats resolutions of overlapping invocations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RacePolicy {
    /// Only the most recently issued invocation may write the record
    #[default]
    LatestWins,

    /// Every resolution writes; whichever lands last overwrites the rest
    LastSettledWins,
}
