//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → BreakerConfig handed to Breaker::from_config / BreakerRegistry
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a breaker never sees a config change
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AdminConfig, AppConfig, BreakerConfig, ObservabilityConfig, ServerConfig, TripConfig,
    DEFAULT_FAILURE_STATUSES,
};
pub use validation::{validate_breaker, validate_config, ValidationError};
