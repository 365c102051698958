use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::admin::AdminState;
use crate::resilience::Snapshot;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub breakers: usize,
}

pub async fn get_status(State(state): State<AdminState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        breakers: state.registry.len(),
    })
}

pub async fn get_breakers(State(state): State<AdminState>) -> Json<Vec<Snapshot>> {
    Json(state.registry.snapshots())
}

pub async fn get_breaker(
    State(state): State<AdminState>,
    Path(name): Path<String>,
) -> Result<Json<Snapshot>, StatusCode> {
    let breaker = state.registry.get(&name).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(breaker.snapshot()))
}

pub async fn open_breaker(
    State(state): State<AdminState>,
    Path(name): Path<String>,
) -> Result<Json<Snapshot>, StatusCode> {
    let breaker = state.registry.get(&name).ok_or(StatusCode::NOT_FOUND)?;
    breaker.open();
    Ok(Json(breaker.snapshot()))
}

pub async fn close_breaker(
    State(state): State<AdminState>,
    Path(name): Path<String>,
) -> Result<Json<Snapshot>, StatusCode> {
    let breaker = state.registry.get(&name).ok_or(StatusCode::NOT_FOUND)?;
    breaker.close();
    Ok(Json(breaker.snapshot()))
}
