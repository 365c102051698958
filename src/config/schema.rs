//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files. Every
//! field has a default so a minimal (even empty) file is valid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Status codes counted as failures unless configured otherwise.
pub const DEFAULT_FAILURE_STATUSES: [u16; 6] = [
    500, // Internal Server Error
    502, // Bad Gateway
    503, // Service Unavailable
    504, // Gateway Timeout
    506, // Variant Also Negotiates
    507, // Insufficient Storage
];

/// Root configuration for the breaker service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Breaker settings; also the template for registry-created breakers.
    pub breaker: BreakerConfig,

    /// HTTP listener settings.
    pub server: ServerConfig,

    /// Admin API settings.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Circuit breaker configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BreakerConfig {
    /// Identifying label.
    pub name: String,

    /// Closed-state reset period in seconds.
    pub interval_secs: u64,

    /// Open-state cooldown in seconds before probing.
    pub timeout_secs: u64,

    /// Simultaneous probes admitted while half-open.
    pub max_concurrent_probes: u32,

    /// HTTP statuses recorded as failures. Empty disables automatic detection.
    pub failure_statuses: Vec<u16>,

    /// Policy deciding when a closed breaker opens.
    pub trip: TripConfig,
}

impl BreakerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            name: "CircuitBreaker".to_string(),
            interval_secs: 60,
            timeout_secs: 60,
            max_concurrent_probes: 1,
            failure_statuses: DEFAULT_FAILURE_STATUSES.to_vec(),
            trip: TripConfig::default(),
        }
    }
}

/// Built-in trip policies.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TripConfig {
    /// Open after `threshold` failures in a row.
    ConsecutiveFailures { threshold: u32 },

    /// Open once the failure ratio exceeds `threshold` (0.0-1.0) over at
    /// least `minimum_samples` outcomes.
    FailureRate { threshold: f64, minimum_samples: u32 },
}

impl Default for TripConfig {
    fn default() -> Self {
        TripConfig::ConsecutiveFailures { threshold: 5 }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Mount the admin routes.
    pub enabled: bool,

    /// Bearer token required by the admin routes. Empty disables auth.
    pub api_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: String::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
