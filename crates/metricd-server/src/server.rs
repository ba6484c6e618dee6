//! Server lifecycle: bind, serve, bounded graceful shutdown.
//!
//! On shutdown the state is marked draining, the listener is dropped, and
//! every open connection is asked to finish its current request. Connections
//! still open after `server.shutdown_timeout_ms` are aborted.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{extract::ConnectInfo, Router};
use hyper::{body::Incoming, server::conn::http1, service::service_fn, Request};
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tower::ServiceExt;

use metricd_core::error::{CollectorError, Result};

use crate::{app_state::AppState, router};

pub struct Server {
    listener: TcpListener,
    state: AppState,
}

impl Server {
    /// Bind the configured listen address.
    pub async fn bind(state: AppState) -> Result<Self> {
        let listen = state.cfg().server.listen_addr()?;
        let listener = TcpListener::bind(listen)
            .await
            .map_err(|e| CollectorError::Internal(format!("bind {listen} failed: {e}")))?;
        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .map_err(|e| CollectorError::Internal(format!("local_addr failed: {e}")))
    }

    /// Serve until `shutdown` resolves, then drain.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let Server { listener, state } = self;
        let drain = Duration::from_millis(state.cfg().server.shutdown_timeout_ms);
        let app = router::build_router(state.clone());

        let (stop_tx, stop_rx) = watch::channel(false);
        let mut conns = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        conns.spawn(serve_connection(stream, peer, app.clone(), stop_rx.clone()));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "accept failed");
                        tokio::time::sleep(Duration::from_millis(100)).await;
                    }
                },
                Some(_) = conns.join_next(), if !conns.is_empty() => {}
            }
        }

        drop(listener);
        tracing::info!(
            drain_ms = drain.as_millis() as u64,
            open = conns.len(),
            "shutdown requested, draining"
        );
        state.set_draining();
        stop_tx.send_replace(true);

        let drained = tokio::time::timeout(drain, async {
            while conns.join_next().await.is_some() {}
        })
        .await;

        match drained {
            Ok(()) => tracing::info!("server stopped"),
            Err(_) => {
                tracing::warn!(
                    open = conns.len(),
                    "drain timeout elapsed, dropping in-flight connections"
                );
                conns.abort_all();
                while conns.join_next().await.is_some() {}
            }
        }
        Ok(())
    }
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    app: Router,
    mut stop: watch::Receiver<bool>,
) {
    let service = service_fn(move |mut req: Request<Incoming>| {
        req.extensions_mut().insert(ConnectInfo(peer));
        app.clone().oneshot(req)
    });
    let conn = http1::Builder::new().serve_connection(TokioIo::new(stream), service);
    tokio::pin!(conn);

    let res = tokio::select! {
        res = conn.as_mut() => res,
        _ = stop.changed() => {
            conn.as_mut().graceful_shutdown();
            conn.await
        }
    };
    if let Err(e) = res {
        tracing::debug!(%peer, error = %e, "connection closed with error");
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
