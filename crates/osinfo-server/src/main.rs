//! osinfo server
//!
//! - Host telemetry routes (info, uptime, mem, cpu, disk, env)
//! - Request statistics collected by the observation middleware
//! - Dashboard page polling the JSON routes
//!
//! Config path comes from `OSINFO_CONFIG` (default `osinfo.yaml`); a missing
//! file means defaults. Log filtering follows `RUST_LOG`.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use osinfo_core::error::{OsInfoError, Result};
use osinfo_server::{app_state, config, router};

const DEFAULT_CONFIG_PATH: &str = "osinfo.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "osinfo-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::var("OSINFO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let cfg = config::load_or_default(&path)?;
    let listen = cfg.server.listen_addr()?;
    let prefix = cfg.server.prefix.clone();

    let state = app_state::AppState::new(cfg)?;
    let aggregator = state.aggregator();
    let app = router::build_router(state);

    tracing::info!(%listen, %prefix, "osinfo-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| OsInfoError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| OsInfoError::Internal(format!("server failed: {e}")))?;

    let snap = aggregator.snapshot();
    tracing::info!(
        total_requests = snap.total_requests,
        avg_response_time_ms = snap.average_ms,
        uptime_secs = snap.uptime_secs(),
        "osinfo-server stopped"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable, running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested, draining connections");
}
