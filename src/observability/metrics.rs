//! Metrics collection and exposition.
//!
//! # Metrics
//! - `breaker_transitions_total` (counter): state changes by breaker, from, to
//! - `breaker_rejections_total` (counter): rejected attempts by breaker, reason
//! - `breaker_outcomes_total` (counter): recorded outcomes by breaker, outcome
//! - `breaker_state` (gauge): 0=closed, 1=half-open, 2=open
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; free when no recorder is installed
//! - Prometheus exporter is opt-in via configuration

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::resilience::{Outcome, Rejected, State};

/// Install the Prometheus recorder and its scrape endpoint.
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_transition(name: &str, from: State, to: State) {
    metrics::counter!(
        "breaker_transitions_total",
        "breaker" => name.to_string(),
        "from" => from.as_str(),
        "to" => to.as_str()
    )
    .increment(1);
    record_state(name, to);
}

pub fn record_state(name: &str, state: State) {
    metrics::gauge!("breaker_state", "breaker" => name.to_string()).set(state.as_gauge());
}

pub fn record_rejection(name: &str, reason: Rejected) {
    metrics::counter!(
        "breaker_rejections_total",
        "breaker" => name.to_string(),
        "reason" => reason.as_str()
    )
    .increment(1);
}

pub fn record_outcome(name: &str, outcome: Outcome) {
    metrics::counter!(
        "breaker_outcomes_total",
        "breaker" => name.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}
