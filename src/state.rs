//! Shared application state for request handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::AppConfig;

/// Shared application state, cloneable across handlers.
///
/// Holds the configuration and the process start instant. The start instant
/// is captured once in `main` and injected here; it is never mutated, so the
/// health and metrics handlers can read it without coordination.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    started: Instant,
}

impl AppState {
    /// Creates application state from the given configuration and the
    /// instant the process started.
    pub fn new(config: AppConfig, started: Instant) -> Self {
        Self {
            config: Arc::new(config),
            started,
        }
    }

    /// Elapsed time since process start.
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}
