//! HTTP route handlers.
//!
//! Three fixed JSON endpoints, all stateless: every handler rebuilds its
//! response from the shared state and the current instant, ignoring the
//! request entirely. Unknown paths and methods fall through to the framework
//! defaults.
//!
//! Request tracing is enabled via middleware that generates a unique request
//! ID for each incoming request.

pub mod greeting;
pub mod health;
pub mod metrics;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::http::HttpTimeouts;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes.
///
/// Responses are marked uncacheable: monitoring probes must always see fresh
/// data. The timeout layer applies the write bound (response production);
/// the read bound is enforced by the connection loop in `http`.
pub fn create_router(state: AppState, timeouts: HttpTimeouts) -> Router {
    Router::new()
        .route("/", get(greeting::index))
        .route("/health", get(health::health))
        .route("/metrics", get(metrics::metrics))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TimeoutLayer::new(timeouts.write))
        .with_state(state)
        .layer(middleware::from_fn(request_id_layer))
}
