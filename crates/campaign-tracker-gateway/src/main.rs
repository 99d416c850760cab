//! Campaign Tracker gateway.
//!
//! Serves read-only progress and chart endpoints for campaigns stored in
//! Firestore (or an in-memory store for local runs).
//!
//! Usage: `campaign-tracker-gateway [config.yaml]`

use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use campaign_tracker_core::error::{Result, TrackerError};
use campaign_tracker_gateway::{app_state::AppState, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "campaign-tracker-gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;
    let grace = Duration::from_millis(cfg.server.shutdown_grace_ms);

    let state = AppState::new(cfg)?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, config = %path, "campaign-tracker-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| TrackerError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state, grace))
        .await
        .map_err(|e| TrackerError::Internal(format!("server failed: {e}")))?;

    tracing::info!("campaign-tracker-gateway stopped");
    Ok(())
}

/// Wait for Ctrl-C, flip readiness to draining, then give load balancers
/// `grace` to notice before the server stops accepting.
async fn shutdown_signal(state: AppState, grace: Duration) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    state.set_draining();
    tracing::warn!(grace_ms = grace.as_millis() as u64, "shutdown requested, draining");
    tokio::time::sleep(grace).await;
}
