//! Trip policies.
//!
//! # Responsibilities
//! - Decide, from a Counts snapshot, whether a closed breaker should open
//!
//! # Design Decisions
//! - Policies are pure: they read Counts and never touch breaker state
//! - Evaluated only while Closed, before the attempt is admitted
//! - Any `Fn(&Counts) -> bool` closure is a policy

use crate::resilience::counts::Counts;

/// Default consecutive failure threshold.
pub const DEFAULT_CONSECUTIVE_FAILURES: u32 = 5;

/// Decides whether accumulated counts justify opening the circuit.
pub trait TripPolicy: Send + Sync {
    fn should_trip(&self, counts: &Counts) -> bool;
}

impl<F> TripPolicy for F
where
    F: Fn(&Counts) -> bool + Send + Sync,
{
    fn should_trip(&self, counts: &Counts) -> bool {
        self(counts)
    }
}

/// Trip after a run of consecutive failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsecutiveFailures {
    threshold: u32,
}

impl ConsecutiveFailures {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl Default for ConsecutiveFailures {
    fn default() -> Self {
        Self::new(DEFAULT_CONSECUTIVE_FAILURES)
    }
}

impl TripPolicy for ConsecutiveFailures {
    fn should_trip(&self, counts: &Counts) -> bool {
        counts.consecutive_failures >= self.threshold
    }
}

/// Trip when the failure ratio exceeds `threshold`, once at least
/// `minimum_samples` outcomes have been recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FailureRate {
    threshold: f64,
    minimum_samples: u32,
}

impl FailureRate {
    /// `threshold` is a ratio in `[0.0, 1.0)`.
    pub fn new(threshold: f64, minimum_samples: u32) -> Self {
        Self {
            threshold,
            minimum_samples,
        }
    }
}

impl TripPolicy for FailureRate {
    fn should_trip(&self, counts: &Counts) -> bool {
        counts.requests() >= self.minimum_samples && counts.failure_ratio() > self.threshold
    }
}
