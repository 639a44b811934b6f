//! HTTP server module.
//!
//! Owns the listener lifecycle: bind, accept loop on its own task, immediate
//! close when the shutdown signal arrives. Per-connection read timeouts are
//! enforced here; response-side timeouts live as a router layer.

mod server;
mod shutdown;

pub use server::{
    serve_with_shutdown, start_server, HttpServer, HttpTimeouts, ServerError, ServerHandle,
};
pub use shutdown::shutdown_signal;
