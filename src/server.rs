//! Trigger server
//!
//! Turns inbound HTTP requests into background fetch cycles. `GET /` starts a
//! cycle and answers `202 Accepted` at once; `GET /status` reports counters.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::orchestrator::Orchestrator;
use crate::state::StatusSnapshot;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

pub struct TriggerServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

/// Routes: `GET /` dispatches a cycle, `GET /status` reports counters.
pub fn router(orchestrator: Arc<Orchestrator>) -> Router {
    Router::new()
        .route("/", get(trigger_handler))
        .route("/status", get(status_handler))
        .with_state(orchestrator)
}

impl TriggerServer {
    /// Bind `addr` (port 0 picks a free port) and serve in the background.
    pub async fn start(
        addr: SocketAddr,
        orchestrator: Arc<Orchestrator>,
    ) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = router(orchestrator);

        let handle = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = served {
                error!(error = %e, "trigger server stopped");
            }
        });

        info!(%addr, "trigger server listening");
        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// URL that dispatches a cycle.
    pub fn trigger_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// URL of the status report.
    pub fn status_url(&self) -> String {
        format!("http://{}/status", self.addr)
    }

    /// Stop accepting requests and wait for in-flight ones to finish.
    pub async fn shutdown(self) {
        if let Some(tx) = self.shutdown_tx {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

async fn trigger_handler(State(orchestrator): State<Arc<Orchestrator>>) -> impl IntoResponse {
    debug!("trigger received");
    // The response never waits on the cycle.
    orchestrator.trigger();
    (StatusCode::ACCEPTED, "Cycle dispatched\n")
}

async fn status_handler(State(orchestrator): State<Arc<Orchestrator>>) -> Json<StatusSnapshot> {
    Json(orchestrator.status())
}
