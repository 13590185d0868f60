//! voxgate - REST gateway for a Puppet/OpenVox certificate authority.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use voxgate::{build_router, AppState};
use voxgate_config::Config;

/// voxgate - certificate lifecycle gateway for Puppet/OpenVox CA
#[derive(Parser, Debug)]
#[command(name = "voxgate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML or JSON)
    #[arg(short = 'c', long = "config", env = "VOXGATE_CONFIG")]
    config: Option<PathBuf>,

    /// Test configuration and exit
    #[arg(short = 't', long = "test")]
    test: bool,

    /// Enable verbose logging (debug level)
    #[arg(long = "verbose")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "info,voxgate=debug,voxgate_ca=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => {
            warn!("No configuration file given, using defaults (CA integration disabled)");
            Config::default()
        }
    };

    if cli.test {
        info!("Configuration OK");
        return Ok(());
    }

    let state = AppState::from_config(&config).context("Failed to construct CA client")?;
    if !state.ca_enabled() {
        warn!("CA integration is disabled; lifecycle endpoints will answer 503");
    }

    let app = build_router(state);

    let addr: SocketAddr = config
        .server
        .listen
        .parse()
        .context("Invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(version = env!("CARGO_PKG_VERSION"), %addr, "voxgate listening");

    let drain = Duration::from_secs(config.server.graceful_shutdown_timeout_secs);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let mut server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(shutdown_tx))
            .into_future(),
    );

    tokio::select! {
        result = &mut server => {
            result.context("Server task panicked")??;
        }
        _ = shutdown_rx => {
            // Signal observed: give in-flight requests a bounded drain window.
            match tokio::time::timeout(drain, &mut server).await {
                Ok(result) => result.context("Server task panicked")??,
                Err(_) => {
                    warn!(timeout_secs = drain.as_secs(), "Graceful shutdown timed out, aborting");
                    server.abort();
                }
            }
        }
    }

    info!("voxgate stopped");
    Ok(())
}

/// Resolves when SIGINT or SIGTERM is received, notifying the drain timer.
async fn shutdown_signal(notify: tokio::sync::oneshot::Sender<()>) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
    let _ = notify.send(());
}
