//! Runtime metrics endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;
use crate::stats::{self, MemoryStats};

#[derive(Debug, Serialize)]
pub struct Metrics {
    pub uptime_seconds: f64,
    /// Tasks currently alive on the async runtime. Serialized under the
    /// original service's field name for wire compatibility.
    #[serde(rename = "goroutines")]
    pub tasks: usize,
    pub memory: MemoryStats,
    pub cpu_count: usize,
}

/// `GET /metrics` handler.
pub async fn metrics(State(state): State<AppState>) -> Json<Metrics> {
    Json(Metrics {
        uptime_seconds: state.uptime().as_secs_f64(),
        tasks: stats::alive_tasks(),
        memory: stats::memory_stats(),
        cpu_count: stats::cpu_count(),
    })
}
