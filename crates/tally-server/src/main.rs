//! tally server
//!
//! - `/inc`: one counter step against the in-memory store
//! - `/healthz`: liveness
//! - Config from `$TALLY_CONFIG` (default `tally.yaml`), defaults when the
//!   default file is absent
//! - Graceful shutdown on Ctrl+C / SIGTERM

use std::path::Path;

use tracing_subscriber::{fmt, EnvFilter};

use tally_core::error::{Result, TallyError};
use tally_server::{app_state, config, router};

const DEFAULT_CONFIG_PATH: &str = "tally.yaml";

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "tally-server exited with error");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = load_config()?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state);

    tracing::info!(%listen, "tally-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| TallyError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TallyError::Internal(format!("server failed: {e}")))
}

fn load_config() -> Result<config::ServerConfig> {
    match std::env::var("TALLY_CONFIG") {
        Ok(path) => config::load_from_file(&path),
        Err(_) if !Path::new(DEFAULT_CONFIG_PATH).exists() => {
            tracing::info!(path = DEFAULT_CONFIG_PATH, "no config file, using defaults");
            Ok(config::ServerConfig::default())
        }
        Err(_) => config::load_from_file(DEFAULT_CONFIG_PATH),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
