//! Breaker errors.

use thiserror::Error;

/// Why an attempt was not admitted. The guarded operation did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejected {
    /// The circuit is open.
    #[error("breaker: the circuit breaker is open")]
    Open,
    /// Half-open and every probe slot is taken.
    #[error("breaker: too many requests")]
    TooManyProbes,
}

impl Rejected {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejected::Open => "open",
            Rejected::TooManyProbes => "too_many_probes",
        }
    }
}

/// Result error of [`Breaker::guard`](crate::resilience::Breaker::guard).
#[derive(Debug, Error)]
pub enum BreakerError<E> {
    /// Rejected before running the operation.
    #[error(transparent)]
    Rejected(#[from] Rejected),
    /// The operation ran and returned this error, unchanged.
    #[error("{0}")]
    Inner(E),
}

impl<E> BreakerError<E> {
    pub fn is_rejected(&self) -> bool {
        matches!(self, BreakerError::Rejected(_))
    }

    /// The operation's own error, if it ran.
    pub fn into_inner(self) -> Option<E> {
        match self {
            BreakerError::Inner(e) => Some(e),
            BreakerError::Rejected(_) => None,
        }
    }
}
