//! HTTP integration subsystem.
//!
//! # Data Flow
//! ```text
//! Request
//!     → middleware.rs (breaker admits or answers 503)
//!     → handler (may read the breaker from extensions)
//!     → status.rs (response status → success/failure)
//!     → breaker records the outcome
//! ```

pub mod middleware;
pub mod server;
pub mod status;

pub use middleware::{breaker_middleware, BreakerLayerState};
pub use server::{build_app, HttpServer};
pub use status::StatusDetector;
