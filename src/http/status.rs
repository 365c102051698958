//! HTTP status failure detection.
//!
//! # Design Decisions
//! - Only the configured statuses count as failures
//! - 4xx are NOT failures by default (client error, not the resource)
//! - An empty set never fails automatically; handlers report manually

use std::collections::HashSet;

use axum::http::StatusCode;

use crate::config::DEFAULT_FAILURE_STATUSES;
use crate::resilience::{FailureDetector, Outcome};

/// Classifies response statuses by membership in a failure set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDetector {
    failures: HashSet<u16>,
}

impl StatusDetector {
    pub fn new(statuses: impl IntoIterator<Item = u16>) -> Self {
        Self {
            failures: statuses.into_iter().collect(),
        }
    }

    /// A detector that never reports a failure.
    pub fn never() -> Self {
        Self::new([])
    }

    pub fn is_failure(&self, status: StatusCode) -> bool {
        self.failures.contains(&status.as_u16())
    }
}

impl Default for StatusDetector {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_STATUSES)
    }
}

impl FailureDetector<StatusCode> for StatusDetector {
    fn classify(&self, status: &StatusCode) -> Outcome {
        if self.is_failure(*status) {
            Outcome::Failure
        } else {
            Outcome::Success
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_server_errors() {
        let detector = StatusDetector::default();
        assert_eq!(detector.classify(&StatusCode::INTERNAL_SERVER_ERROR), Outcome::Failure);
        assert_eq!(detector.classify(&StatusCode::GATEWAY_TIMEOUT), Outcome::Failure);
        assert_eq!(detector.classify(&StatusCode::INSUFFICIENT_STORAGE), Outcome::Failure);
        assert_eq!(detector.classify(&StatusCode::NOT_IMPLEMENTED), Outcome::Success);
        assert_eq!(detector.classify(&StatusCode::NOT_FOUND), Outcome::Success);
        assert_eq!(detector.classify(&StatusCode::OK), Outcome::Success);
    }

    #[test]
    fn test_never() {
        let detector = StatusDetector::never();
        assert_eq!(detector.classify(&StatusCode::SERVICE_UNAVAILABLE), Outcome::Success);
    }

    #[test]
    fn test_custom_set() {
        let detector = StatusDetector::new([429]);
        assert!(detector.is_failure(StatusCode::TOO_MANY_REQUESTS));
        assert!(!detector.is_failure(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
