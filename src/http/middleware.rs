//! Breaker middleware for axum routes.
//!
//! # Responsibilities
//! - Admit or reject each request through the route's breaker
//! - Expose the breaker to handlers via request extensions
//! - Classify the response status and record the outcome
//!
//! # Design Decisions
//! - Rejected requests get 503 without reaching the handler
//! - Handlers may still call `record_failure` for failures the status hides

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::status::StatusDetector;
use crate::resilience::{Breaker, FailureDetector};

/// State for [`breaker_middleware`].
#[derive(Debug, Clone)]
pub struct BreakerLayerState {
    pub breaker: Arc<Breaker>,
    pub detector: Arc<StatusDetector>,
}

impl BreakerLayerState {
    pub fn new(breaker: Arc<Breaker>, detector: StatusDetector) -> Self {
        Self {
            breaker,
            detector: Arc::new(detector),
        }
    }
}

/// Middleware function guarding a route with a circuit breaker.
pub async fn breaker_middleware(
    State(state): State<BreakerLayerState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let breaker = state.breaker.as_ref();
    let permit = match breaker.try_acquire() {
        Ok(permit) => permit,
        Err(rejected) => {
            tracing::warn!(
                breaker = %breaker.name(),
                path = %request.uri().path(),
                reason = %rejected,
                "Request rejected by circuit breaker"
            );
            return (StatusCode::SERVICE_UNAVAILABLE, rejected.to_string()).into_response();
        }
    };

    request.extensions_mut().insert(state.breaker.clone());
    let response = next.run(request).await;

    permit.record(state.detector.classify(&response.status()));
    response
}
