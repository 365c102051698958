//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Breakers produce:
//!     → logging.rs (structured transition and rejection events)
//!     → metrics.rs (counters and a state gauge per breaker)
//!
//! Consumers:
//!     → stdout log stream
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
