//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Attempt on a protected resource:
//!     → registry.rs (find the breaker for the resource)
//!     → circuit_breaker.rs (recover by time, evaluate policy.rs, admit or reject)
//!     → operation runs outside the breaker lock
//!     → detector.rs (classify the outcome)
//!     → circuit_breaker.rs (update counts.rs, apply state.rs transitions)
//! ```
//!
//! # Design Decisions
//! - The breaker never retries and never times the operation out
//! - No background tasks; every timer is a timestamp comparison
//! - Rejections are distinct from the operation's own errors

pub mod circuit_breaker;
pub mod clock;
pub mod counts;
pub mod detector;
pub mod error;
pub mod policy;
pub mod registry;
pub mod state;

pub use circuit_breaker::{Breaker, BreakerBuilder, Permit, Snapshot, StateObserver};
pub use clock::{Clock, ManualClock, SystemClock};
pub use counts::Counts;
pub use detector::{ErrorDetector, FailureDetector, Outcome};
pub use error::{BreakerError, Rejected};
pub use policy::{ConsecutiveFailures, FailureRate, TripPolicy};
pub use registry::BreakerRegistry;
pub use state::State;
