//! HTTP server startup and lifecycle.
//!
//! The lifecycle is deliberately simple: bind (fatal on failure), run the
//! accept loop on a spawned task, and block the caller on the termination
//! signal. Shutdown is an immediate close of the listening socket; in-flight
//! connections are not drained. A close error is reported but never blocks
//! process exit.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::config::{HTTP_READ_TIMEOUT_SECS, HTTP_WRITE_TIMEOUT_SECS};

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind listener: {0}")]
    Bind(#[from] std::io::Error),
}

/// Fixed per-request time bounds.
///
/// `read` bounds delivery of the request head; `write` bounds response
/// production and is applied by the router's timeout layer. Both default to
/// the fixed 10 second limits; tests shrink them.
#[derive(Debug, Clone, Copy)]
pub struct HttpTimeouts {
    pub read: Duration,
    pub write: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            read: Duration::from_secs(HTTP_READ_TIMEOUT_SECS),
            write: Duration::from_secs(HTTP_WRITE_TIMEOUT_SECS),
        }
    }
}

/// A bound listener that has not started accepting yet.
pub struct HttpServer {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl HttpServer {
    /// Bind the listening socket. Failure here is fatal to startup.
    pub async fn bind(addr: SocketAddr) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// The address actually bound; differs from the requested address when
    /// port 0 was asked for.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Launch the accept loop on its own task and hand back the controls.
    ///
    /// The returned handle owns the close channel; both an explicit
    /// [`ServerHandle::shutdown`] and dropping the handle close the
    /// listener, but only `shutdown` waits for the loop to finish.
    pub fn spawn(self, app: Router, timeouts: HttpTimeouts) -> ServerHandle {
        let (close_tx, close_rx) = oneshot::channel();
        let task = tokio::spawn(accept_loop(self.listener, app, timeouts, close_rx));
        ServerHandle { close_tx, task }
    }
}

/// Controls for a running server: one close channel, one task handle.
pub struct ServerHandle {
    close_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    /// Close the listening socket immediately and wait for the accept loop
    /// to finish. In-flight connections are not drained. Errors are
    /// reported, not returned: shutdown always completes.
    pub async fn shutdown(self) {
        let _ = self.close_tx.send(());
        if let Err(err) = self.task.await {
            tracing::warn!(error = %err, "server close error");
        }
    }
}

/// Accepts connections until told to close, serving each on its own task.
///
/// Breaking out of the loop drops the listener, which closes the socket at
/// once; connection tasks already in flight are left to the runtime.
async fn accept_loop(
    listener: TcpListener,
    app: Router,
    timeouts: HttpTimeouts,
    mut close_rx: oneshot::Receiver<()>,
) {
    loop {
        let accepted = tokio::select! {
            _ = &mut close_rx => break,
            accepted = listener.accept() => accepted,
        };

        let (stream, peer) = match accepted {
            Ok(conn) => conn,
            Err(err) => {
                tracing::warn!(error = %err, "failed to accept connection");
                continue;
            }
        };

        let service = TowerToHyperService::new(app.clone());
        let read_timeout = timeouts.read;

        tokio::spawn(async move {
            let mut builder = http1::Builder::new();
            builder
                .timer(TokioTimer::new())
                .header_read_timeout(read_timeout);

            if let Err(err) = builder
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                // Slow-client timeouts and mid-request disconnects land here
                tracing::debug!(peer = %peer, error = %err, "connection closed with error");
            }
        });
    }
}

/// Run the full server lifecycle. Blocks until a termination signal arrives.
///
/// The calling task's only job after launch is to wait for the signal; the
/// accept loop runs concurrently on its own task.
pub async fn start_server(
    app: Router,
    addr: SocketAddr,
    timeouts: HttpTimeouts,
) -> Result<(), ServerError> {
    serve_with_shutdown(app, addr, timeouts, shutdown::shutdown_signal()).await
}

/// Lifecycle body with an injectable termination trigger.
///
/// `start_server` passes the process signal future; tests pass their own so
/// the signal → close → exit sequence can be driven without raising signals.
pub async fn serve_with_shutdown<F>(
    app: Router,
    addr: SocketAddr,
    timeouts: HttpTimeouts,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: std::future::Future<Output = ()>,
{
    let server = HttpServer::bind(addr).await?;
    tracing::info!(addr = %server.local_addr(), "server listening");

    let handle = server.spawn(app, timeouts);

    shutdown.await;
    tracing::info!("shutdown signal received, stopping server");

    handle.shutdown().await;
    tracing::info!("server stopped");

    Ok(())
}
