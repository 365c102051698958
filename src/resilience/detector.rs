//! Failure detection.
//!
//! Maps an observed outcome (a `Result`, a status code, any value) to a
//! success/failure signal. The breaker only sees the signal.

/// Classified outcome of one admitted attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
        }
    }
}

/// Classifies an observed outcome of type `O`.
pub trait FailureDetector<O: ?Sized>: Send + Sync {
    fn classify(&self, outcome: &O) -> Outcome;
}

impl<O: ?Sized, F> FailureDetector<O> for F
where
    F: Fn(&O) -> Outcome + Send + Sync,
{
    fn classify(&self, outcome: &O) -> Outcome {
        self(outcome)
    }
}

/// Treats every `Err` as a failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorDetector;

impl<T, E> FailureDetector<Result<T, E>> for ErrorDetector {
    fn classify(&self, outcome: &Result<T, E>) -> Outcome {
        match outcome {
            Ok(_) => Outcome::Success,
            Err(_) => Outcome::Failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detector() {
        let ok: Result<u8, &str> = Ok(1);
        let err: Result<u8, &str> = Err("boom");
        assert_eq!(ErrorDetector.classify(&ok), Outcome::Success);
        assert_eq!(ErrorDetector.classify(&err), Outcome::Failure);
    }

    #[test]
    fn test_closure_detector() {
        let detector = |v: &i32| if *v < 0 { Outcome::Failure } else { Outcome::Success };
        assert_eq!(detector.classify(&-1i32), Outcome::Failure);
        assert_eq!(detector.classify(&3i32), Outcome::Success);
    }
}
