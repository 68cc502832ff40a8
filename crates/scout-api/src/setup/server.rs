//! Server startup and graceful shutdown
//!
//! [`HttpWorker`] owns the listener and serves the router until its
//! [`CancellationToken`] is cancelled. In-flight requests then get at most the
//! configured grace period before the server task is aborted.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use scout_core::Config;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;

/// Lifecycle of an [`HttpWorker`], published on a watch channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Initializing,
    Listening,
    ShuttingDown,
    Stopped,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("failed to listen on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serve http server: {0}")]
    Serve(#[source] std::io::Error),

    #[error("failed to stop server in graceful shutdown: grace period of {0:?} elapsed")]
    ShutdownTimeout(Duration),

    #[error("server task failed: {0}")]
    Join(#[source] JoinError),
}

pub struct HttpWorker {
    name: String,
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Router,
    grace: Duration,
    state_tx: watch::Sender<WorkerState>,
}

impl HttpWorker {
    /// Bind the TCP listener. Nothing is served until [`HttpWorker::run`].
    pub async fn bind(
        name: impl Into<String>,
        addr: &str,
        router: Router,
        grace: Duration,
    ) -> Result<Self, WorkerError> {
        let bind_err = |source| WorkerError::Bind {
            addr: addr.to_string(),
            source,
        };
        let listener = TcpListener::bind(addr).await.map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;
        let (state_tx, _) = watch::channel(WorkerState::Initializing);

        Ok(Self {
            name: name.into(),
            listener,
            local_addr,
            router,
            grace,
            state_tx,
        })
    }

    /// Address actually bound; differs from the requested one when port 0 was asked for.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn state(&self) -> watch::Receiver<WorkerState> {
        self.state_tx.subscribe()
    }

    /// Serve until `shutdown` is cancelled, then drain for at most the grace period.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), WorkerError> {
        let HttpWorker {
            name,
            listener,
            local_addr,
            router,
            grace,
            state_tx,
        } = self;

        let signal = shutdown.clone();
        // Connection tasks spawned by `serve` are not cancelled by `abort`; they end
        // when the runtime shuts down.
        let mut server = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(signal.cancelled_owned())
                .await
        });

        state_tx.send_replace(WorkerState::Listening);
        tracing::info!(service = %name, addr = %local_addr, "Server ready and accepting connections");

        // Cancellation wins over a server task that has already drained.
        let ended_early = tokio::select! {
            biased;
            _ = shutdown.cancelled() => None,
            res = &mut server => Some(res),
        };

        let outcome = match ended_early {
            // Server ended without being asked to.
            Some(res) => flatten(res),
            None => {
                state_tx.send_replace(WorkerState::ShuttingDown);
                tracing::info!(service = %name, grace = ?grace, "Graceful shutdown started");

                match tokio::time::timeout(grace, &mut server).await {
                    Ok(res) => flatten(res),
                    Err(_) => {
                        server.abort();
                        Err(WorkerError::ShutdownTimeout(grace))
                    }
                }
            }
        };

        state_tx.send_replace(WorkerState::Stopped);
        match &outcome {
            Ok(()) => tracing::info!(service = %name, "Stopped server gracefully"),
            Err(e) => tracing::error!(service = %name, error = %e, "Server stopped with error"),
        }
        outcome
    }
}

fn flatten(res: Result<std::io::Result<()>, JoinError>) -> Result<(), WorkerError> {
    match res {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(WorkerError::Serve(e)),
        Err(e) => Err(WorkerError::Join(e)),
    }
}

/// Cancel `token` on SIGINT (Ctrl+C), SIGTERM or SIGQUIT.
///
/// Returns early, without cancelling again, if the token is cancelled elsewhere.
pub async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = wait_for_signal(tokio::signal::unix::SignalKind::terminate(), "SIGTERM");
    #[cfg(unix)]
    let quit = wait_for_signal(tokio::signal::unix::SignalKind::quit(), "SIGQUIT");

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    #[cfg(not(unix))]
    let quit = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal");
        },
        _ = quit => {
            tracing::info!("Received quit signal");
        },
        _ = token.cancelled() => return,
    }

    token.cancel();
}

#[cfg(unix)]
async fn wait_for_signal(kind: tokio::signal::unix::SignalKind, name: &'static str) {
    match tokio::signal::unix::signal(kind) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            tracing::error!(error = %e, signal = name, "Failed to install signal handler");
            std::future::pending::<()>().await;
        }
    }
}

/// Bind, serve and wait for a termination signal.
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = config.bind_address();
    tracing::info!(addr = %addr, "Starting server");

    let worker = HttpWorker::bind(config.service_name(), &addr, app, config.graceful_shutdown())
        .await
        .context("Failed to bind HTTP listener")?;

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_signal(shutdown.clone()));

    let outcome = worker.run(shutdown).await;
    crate::telemetry::shutdown_telemetry();
    outcome.context("HTTP worker stopped with error")?;

    Ok(())
}
