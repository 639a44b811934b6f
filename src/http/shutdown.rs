//! Termination signal handling.
//!
//! SIGINT and SIGTERM are equivalent: either resolves the returned future
//! and triggers the same immediate shutdown.

/// Completes when the process receives a termination request.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("received SIGINT");
        }
        _ = terminate => {
            tracing::debug!("received SIGTERM");
        }
    }
}
