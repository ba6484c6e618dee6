//! metricd server
//!
//! - Ingestion endpoint: POST /update/<type>/<name>/<value>
//! - Debug listing: GET /list
//! - Ops: /healthz, /readyz, /metrics
//! - Bounded graceful shutdown on Ctrl+C / SIGTERM
//!
//! Config path: first argument, else `METRICD_CONFIG`, else `metricd.yaml`.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use metricd_core::{Result, Storage};
use metricd_server::{app_state::AppState, config, server};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "metricd-server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("METRICD_CONFIG").ok());
    let cfg = config::load(path.as_deref())?;

    let state = AppState::new(cfg, Arc::new(Storage::new()));
    let server = server::Server::bind(state).await?;

    tracing::info!(listen = %server.local_addr()?, "metricd-server starting");
    server.run(server::shutdown_signal()).await
}
