//! Breaker state.
//!
//! # States
//! - Closed: operation permitted, failures accumulate toward a trip
//! - Half-Open: operation permitted as a recovery probe
//! - Open: operation rejected until the cooldown elapses
//!
//! # State Transitions
//! ```text
//! Closed → Open: trip policy returns true (evaluated before admission)
//! Closed → Closed: reset interval elapsed (counts cleared)
//! Open → Half-Open: timeout elapsed since last failure
//! Half-Open → Closed: probe succeeds (counts cleared)
//! Half-Open → Open: probe fails (cooldown restarts)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Current position of a breaker in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum State {
    /// Attempts flow through.
    Closed,
    /// Limited probes are admitted to test recovery.
    HalfOpen,
    /// Attempts are rejected without running.
    Open,
}

impl State {
    /// Label used in logs, metrics and the admin API.
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Closed => "closed",
            State::HalfOpen => "half-open",
            State::Open => "open",
        }
    }

    /// Numeric encoding for the `breaker_state` gauge.
    pub fn as_gauge(&self) -> f64 {
        match self {
            State::Closed => 0.0,
            State::HalfOpen => 1.0,
            State::Open => 2.0,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(State::Closed.to_string(), "closed");
        assert_eq!(State::HalfOpen.to_string(), "half-open");
        assert_eq!(State::Open.to_string(), "open");
    }

    #[test]
    fn test_serde_matches_display() {
        let json = serde_json::to_string(&State::HalfOpen).unwrap();
        assert_eq!(json, "\"half-open\"");
        let state: State = serde_json::from_str("\"open\"").unwrap();
        assert_eq!(state, State::Open);
    }
}
