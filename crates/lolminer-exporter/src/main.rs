//! lolMiner Prometheus exporter
//!
//! - Scrape endpoint: /metrics?target=<host:port>
//! - One upstream fetch and one fresh registry per request
//! - Config: optional YAML file, `--debug` / `--endpoint` overrides

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use lolminer_core::error::{ExporterError, Result};
use lolminer_exporter::{app_state, config, router, APP_NAME, APP_VERSION};

#[derive(Debug, Parser)]
#[command(name = "lolminer-exporter", version, about = "Prometheus exporter for lolMiner")]
struct Cli {
    /// YAML config file.
    #[arg(long)]
    config: Option<String>,

    /// Show debug messages.
    #[arg(long)]
    debug: bool,

    /// The address-port endpoint to bind to (e.g. ":8080").
    #[arg(long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let cfg = match load_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cfg.exporter.debug);
    tracing::info!(app = APP_NAME, version = APP_VERSION, "starting");
    tracing::debug!("debug mode enabled");

    match run(cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "exporter stopped");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<config::ExporterConfig> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_from_file(path)?,
        None => config::ExporterConfig::default(),
    };
    if cli.debug {
        cfg.exporter.debug = true;
    }
    if let Some(endpoint) = &cli.endpoint {
        cfg.exporter.listen = endpoint.clone();
    }
    cfg.validate()?;
    Ok(cfg)
}

/// `RUST_LOG` wins; otherwise the debug toggle picks the level.
fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    fmt().with_env_filter(filter).init();
}

async fn run(cfg: config::ExporterConfig) -> Result<()> {
    let listen = cfg.exporter.listen_addr()?;
    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ExporterError::Config(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ExporterError::Config(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
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
