//! Demo HTTP server.
//!
//! # Responsibilities
//! - Create Axum Router with the demo handlers
//! - Guard `/fail` and `/success` with one shared breaker
//! - Mount the admin API next to them (unguarded)
//! - Serve until Ctrl+C

use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Extension, Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::admin::{setup_admin_router, AdminState};
use crate::config::{AppConfig, ConfigError};
use crate::http::middleware::{breaker_middleware, BreakerLayerState};
use crate::http::status::StatusDetector;
use crate::resilience::{Breaker, BreakerRegistry};

/// Build the demo application around an existing registry.
///
/// The guarded routes use the breaker named by `config.breaker.name`.
pub fn build_app(config: &AppConfig, registry: Arc<BreakerRegistry>) -> Result<Router, ConfigError> {
    let breaker = registry.get_or_create(&config.breaker.name)?;
    let layer_state = BreakerLayerState::new(
        breaker,
        StatusDetector::new(config.breaker.failure_statuses.iter().copied()),
    );

    let guarded = Router::new()
        .route("/fail", get(fail_handler))
        .route("/success", get(success_handler))
        .route_layer(middleware::from_fn_with_state(layer_state, breaker_middleware));

    let mut app = Router::new().merge(guarded);
    if config.admin.enabled {
        app = app.merge(setup_admin_router(AdminState {
            registry,
            api_key: Arc::from(config.admin.api_key.as_str()),
        }));
    }

    Ok(app.layer(TraceLayer::new_for_http()))
}

async fn fail_handler(Extension(breaker): Extension<Arc<Breaker>>) -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, describe(&breaker))
}

async fn success_handler(Extension(breaker): Extension<Arc<Breaker>>) -> impl IntoResponse {
    (StatusCode::OK, describe(&breaker))
}

fn describe(breaker: &Breaker) -> String {
    format!("{:?}, {}", breaker.counts(), breaker.state())
}

/// HTTP server for the demo application.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let registry = Arc::new(BreakerRegistry::new(config.breaker.clone())?);
        let router = build_app(&config, registry)?;
        Ok(Self { router, config })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            breaker = %self.config.breaker.name,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
