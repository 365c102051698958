//! Success/failure ledger read by trip policies.

use serde::{Deserialize, Serialize};

/// Outcome statistics accumulated since the last reset.
///
/// At most one of the two consecutive streaks is non-zero at a time: every
/// outcome zeroes the opposite streak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// Successes since the last reset.
    pub total_successes: u32,
    /// Failures since the last reset.
    pub total_failures: u32,
    /// Successes since the last failure.
    pub consecutive_successes: u32,
    /// Failures since the last success.
    pub consecutive_failures: u32,
}

impl Counts {
    /// Total outcomes recorded since the last reset.
    pub fn requests(&self) -> u32 {
        self.total_successes.saturating_add(self.total_failures)
    }

    /// Fraction of recorded outcomes that failed, `0.0` when nothing was recorded.
    pub fn failure_ratio(&self) -> f64 {
        match self.requests() {
            0 => 0.0,
            n => f64::from(self.total_failures) / f64::from(n),
        }
    }

    pub(crate) fn on_success(&mut self) {
        self.total_successes = self.total_successes.saturating_add(1);
        self.consecutive_successes = self.consecutive_successes.saturating_add(1);
        self.consecutive_failures = 0;
    }

    pub(crate) fn on_failure(&mut self) {
        self.total_failures = self.total_failures.saturating_add(1);
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.consecutive_successes = 0;
    }

    pub(crate) fn clear(&mut self) {
        *self = Counts::default();
    }
}
