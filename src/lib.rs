//! Circuit breaker library.
//!
//! A transport-agnostic request-path guard: stops invoking an operation once
//! it has shown a pattern of failure and probes for recovery after a cooldown.
//!
//! ```
//! use circuit_breaker::resilience::{Breaker, BreakerError};
//!
//! let breaker = Breaker::builder().name("inventory").build().unwrap();
//! let result: Result<u32, BreakerError<&str>> = breaker.guard(|| Ok(7));
//! assert_eq!(result.unwrap(), 7);
//! ```

pub mod admin;
pub mod config;
pub mod http;
pub mod observability;
pub mod resilience;

pub use config::AppConfig;
pub use http::HttpServer;
pub use resilience::{Breaker, BreakerError, Counts, Rejected, State};
