//! Admin API for inspecting and overriding breakers.
//!
//! Manual open/close is meant for maintenance windows and test harnesses.

pub mod auth;
pub mod handlers;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::resilience::BreakerRegistry;

#[derive(Clone)]
pub struct AdminState {
    pub registry: Arc<BreakerRegistry>,
    pub api_key: Arc<str>,
}

pub fn setup_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/breakers", get(get_breakers))
        .route("/admin/breakers/{name}", get(get_breaker))
        .route("/admin/breakers/{name}/open", post(open_breaker))
        .route("/admin/breakers/{name}/close", post(close_breaker))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ))
        .with_state(state)
}
