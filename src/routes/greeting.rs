//! Greeting endpoint returning process and runtime metadata.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::GREETING_MESSAGE;
use crate::state::AppState;

/// Toolchain version baked in by the build script.
const RUSTC_VERSION: &str = env!("RUSTC_VERSION");

#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: &'static str,
    pub hostname: String,
    pub version: String,
    pub rustc_version: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// `GET /` handler.
pub async fn index(State(state): State<AppState>) -> Json<Greeting> {
    Json(Greeting {
        message: GREETING_MESSAGE,
        hostname: hostname(),
        version: state.config.app_version.clone(),
        rustc_version: RUSTC_VERSION,
        timestamp: Utc::now(),
    })
}

/// Container hostname, or empty when it cannot be resolved.
///
/// Docker and Kubernetes set HOSTNAME; /etc/hostname covers shells that
/// don't export it.
fn hostname() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .filter(|name| !name.is_empty())
        .or_else(|| {
            std::fs::read_to_string("/etc/hostname")
                .ok()
                .map(|raw| raw.trim().to_string())
        })
        .unwrap_or_default()
}
