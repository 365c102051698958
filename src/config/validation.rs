//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (durations > 0, probe bound >= 1, HTTP statuses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before any breaker is constructed

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{AppConfig, BreakerConfig, TripConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate the whole service configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = breaker_errors(&config.breaker);

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "server.bind_address",
            format!("'{}' is not a socket address", config.server.bind_address),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate one breaker configuration.
pub fn validate_breaker(config: &BreakerConfig) -> Result<(), Vec<ValidationError>> {
    let errors = breaker_errors(config);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn breaker_errors(config: &BreakerConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.name.trim().is_empty() {
        errors.push(ValidationError::new("breaker.name", "must not be empty"));
    }
    if config.interval_secs == 0 {
        errors.push(ValidationError::new("breaker.interval_secs", "must be greater than 0"));
    }
    if config.timeout_secs == 0 {
        errors.push(ValidationError::new("breaker.timeout_secs", "must be greater than 0"));
    }
    if config.max_concurrent_probes == 0 {
        errors.push(ValidationError::new(
            "breaker.max_concurrent_probes",
            "must be at least 1",
        ));
    }
    for status in &config.failure_statuses {
        if !(100..=599).contains(status) {
            errors.push(ValidationError::new(
                "breaker.failure_statuses",
                format!("{status} is not an HTTP status code"),
            ));
        }
    }

    match config.trip {
        TripConfig::ConsecutiveFailures { threshold } => {
            if threshold == 0 {
                errors.push(ValidationError::new(
                    "breaker.trip.threshold",
                    "must be at least 1",
                ));
            }
        }
        TripConfig::FailureRate {
            threshold,
            minimum_samples,
        } => {
            if !(0.0..1.0).contains(&threshold) {
                errors.push(ValidationError::new(
                    "breaker.trip.threshold",
                    format!("{threshold} is outside [0.0, 1.0)"),
                ));
            }
            if minimum_samples == 0 {
                errors.push(ValidationError::new(
                    "breaker.trip.minimum_samples",
                    "must be at least 1",
                ));
            }
        }
    }

    errors
}
