//! Climate API Server
//!
//! Read-only HTTP API over historical station precipitation and
//! temperature observations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use climate_api::build_router;
use climate_api::config::{ConfigOverrides, ServiceConfig};
use climate_api::state::AppState;

/// Climate API Server
#[derive(Parser, Debug)]
#[command(name = "climate-api")]
#[command(about = "Read-only HTTP API for station precipitation and temperature observations")]
struct Args {
    /// Station database (sqlite:// url or file path)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Listen address
    #[arg(short, long, env = "CLIMATE_LISTEN_ADDR")]
    listen: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "CLIMATE_DB_MAX_CONNECTIONS")]
    max_connections: Option<u32>,

    /// Optional YAML configuration file
    #[arg(short, long, env = "CLIMATE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "CLIMATE_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = match runtime_builder.build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("climate-api: failed to create Tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run_server(args)) {
        tracing::error!(error = %format!("{:#}", e), "Climate API failed to start");
        eprintln!("climate-api: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting climate API server");

    let config = ServiceConfig::load(args.config.as_deref())?.with_overrides(ConfigOverrides {
        database_url: args.database_url,
        listen: args.listen,
        max_connections: args.max_connections,
    });
    config.validate()?;

    // Initialize Prometheus metrics exporter
    let prometheus = match metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()
    {
        Ok(handle) => {
            info!("Prometheus metrics exporter initialized");
            Some(handle)
        }
        Err(e) => {
            warn!(error = %e, "Prometheus recorder unavailable, /metrics disabled");
            None
        }
    };

    // Initialize application state; a missing table stops the process here
    let state = Arc::new(AppState::new(&config, prometheus).await?);
    let store = state.store.clone();

    let app = build_router(state);

    let addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Climate API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    store.close().await;
    info!("Climate API stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received");
}
