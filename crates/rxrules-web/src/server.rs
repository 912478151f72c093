//! Server lifecycle: bind, spawn, shut down.
//!
//! `start` binds the configured address, spawns `axum::serve` on a background
//! task, and returns a `RunningServer` handle. The caller decides when to stop
//! (the CLI waits for Ctrl-C) and then calls `shutdown` followed by `join`.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use rxrules_contracts::error::{RxError, RxResult};
use rxrules_engine::Recommender;

use crate::config::ServerConfig;
use crate::router::app_router;

/// Handle to a running HTTP server.
pub struct RunningServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<RxResult<()>>,
}

impl RunningServer {
    /// The bound address. With `port = 0` this carries the OS-chosen port.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Ask the server to stop accepting connections and drain in-flight ones.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!(addr = %self.addr, "server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish.
    pub async fn join(self) -> RxResult<()> {
        self.task.await.map_err(|e| RxError::ServerError {
            reason: format!("server task panicked or was cancelled: {e}"),
        })?
    }
}

/// Bind `config`'s address and start serving `recommender`.
pub async fn start(config: &ServerConfig, recommender: Arc<dyn Recommender>) -> RxResult<RunningServer> {
    let bind_addr = config.socket_addr()?;

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| RxError::ServerError {
            reason: format!("failed to bind {bind_addr}: {e}"),
        })?;

    let addr = listener.local_addr().map_err(|e| RxError::ServerError {
        reason: format!("failed to read bound address: {e}"),
    })?;

    let app = app_router(recommender);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| {
                tracing::error!("server error: {e}");
                RxError::ServerError {
                    reason: e.to_string(),
                }
            })
    });

    tracing::info!(%addr, "rxrules server listening");

    Ok(RunningServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}
