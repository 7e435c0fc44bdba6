#![forbid(unsafe_code)]

//! Post-commit timers.
//!
//! The engine never reads the clock. Timers are scheduled against the `now`
//! passed with the commit and fire when a later `now` reaches their deadline.
//! Each kind has at most one pending instance; rescheduling replaces it.
//! Every schedule bumps a generation counter so a fired timer can be tied
//! back to the commit that armed it.

use web_time::{Duration, Instant};

use crate::session::SettleTimerKind;

/// A timer that reached its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub kind: SettleTimerKind,
    pub generation: u64,
    pub deadline: Instant,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    kind: SettleTimerKind,
    deadline: Instant,
    generation: u64,
}

/// Pending settle timers.
#[derive(Debug, Clone, Default)]
pub struct SettleTimers {
    pending: Vec<Scheduled>,
    generation: u64,
}

impl SettleTimers {
    /// Create an empty timer set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire `after` from `now`, replacing any pending
    /// instance of the same kind. Returns the new generation.
    pub fn schedule(&mut self, kind: SettleTimerKind, now: Instant, after: Duration) -> u64 {
        self.cancel(kind);
        self.generation = self.generation.wrapping_add(1);
        self.pending.push(Scheduled {
            kind,
            deadline: now + after,
            generation: self.generation,
        });
        self.generation
    }

    /// Cancel a pending timer. Returns whether one was pending.
    pub fn cancel(&mut self, kind: SettleTimerKind) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.kind != kind);
        self.pending.len() != before
    }

    /// Cancel everything. Returns how many timers were pending.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    /// Whether `kind` is pending.
    #[must_use]
    pub fn is_pending(&self, kind: SettleTimerKind) -> bool {
        self.pending.iter().any(|t| t.kind == kind)
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline, for hosts that schedule a wakeup.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|t| t.deadline).min()
    }

    /// Remove and return every timer whose deadline is at or before `now`,
    /// earliest first. Ties keep scheduling order.
    pub fn due(&mut self, now: Instant) -> Vec<FiredTimer> {
        let mut fired: Vec<FiredTimer> = Vec::new();
        self.pending.retain(|t| {
            if t.deadline <= now {
                fired.push(FiredTimer {
                    kind: t.kind,
                    generation: t.generation,
                    deadline: t.deadline,
                });
                false
            } else {
                true
            }
        });
        fired.sort_by_key(|t| (t.deadline, t.generation));
        fired
    }
}
