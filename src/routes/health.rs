//! Health check endpoint for container orchestration.
//!
//! Reports a fixed "healthy" status plus uptime; used by Docker HEALTHCHECK,
//! Kubernetes probes, and load balancers to verify the service is alive.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;
use crate::stats;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub uptime: String,
    pub timestamp: DateTime<Utc>,
}

/// `GET /health` handler.
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "healthy",
        uptime: stats::format_uptime(state.uptime()),
        timestamp: Utc::now(),
    })
}
