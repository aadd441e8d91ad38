//! chirp-web - HTTP server for the Chirp front end

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::Request;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};

use chirp_web::{router, AppState};
use libchirp::logging::{LogFormat, LoggingConfig};
use libchirp::service::ChirpService;
use libchirp::Config;

const RATE_LIMIT_PRUNE_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[derive(Parser, Debug)]
#[command(name = "chirp-web")]
#[command(version)]
#[command(about = "Server-rendered web front end for Chirp")]
#[command(long_about = "\
chirp-web - Server-rendered web front end for Chirp

DESCRIPTION:
    Serves the home feed, profile pages and the create-post form.
    Sign-in is handled by an upstream auth proxy, which passes the
    signed-in user id in a trusted request header (auth.user_header).

CONFIGURATION:
    Configuration file: ~/.config/chirp/config.toml (or $CHIRP_CONFIG)
    Database location:  ~/.local/share/chirp/chirp.db

SIGNALS:
    SIGTERM, SIGINT - Graceful shutdown (finishes in-flight requests)
")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address to listen on (overrides web.bind_addr)
    #[arg(long, env = "CHIRP_BIND", value_name = "ADDR")]
    bind: Option<String>,

    /// Log format: text, json or pretty
    #[arg(long, env = "CHIRP_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Log level when RUST_LOG is unset
    #[arg(long, env = "CHIRP_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    LoggingConfig::new(cli.log_format, cli.log_level.clone(), cli.verbose).init();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };
    let bind_addr = cli.bind.clone().unwrap_or_else(|| config.web.bind_addr.clone());

    let service = Arc::new(
        ChirpService::from_config(config.clone())
            .await
            .context("opening database")?,
    );
    tokio::spawn(prune_rate_limits(Arc::clone(&service)));
    let state = AppState::new(service, config)?;

    let app = router(state).layer(TraceLayer::new_for_http().make_span_with(
        |request: &Request<_>| {
            tracing::span!(
                Level::INFO,
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
            )
        },
    ));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {}", bind_addr))?;
    info!(addr = %bind_addr, "chirp-web listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("chirp-web stopped");
    Ok(())
}

/// Periodically drop rate-limit windows that have closed
async fn prune_rate_limits(service: Arc<ChirpService>) {
    let mut ticker = tokio::time::interval(RATE_LIMIT_PRUNE_INTERVAL);
    loop {
        ticker.tick().await;
        let now = chrono::Utc::now().timestamp();
        if let Err(e) = service.posts().prune_rate_limits(now).await {
            tracing::warn!(error = %e, "failed to prune rate limit windows");
        }
    }
}

/// Resolves on SIGINT or SIGTERM
#[cfg(unix)]
async fn shutdown_signal() {
    use futures::stream::StreamExt;
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook_tokio::Signals;

    let mut signals = match Signals::new([SIGINT, SIGTERM]) {
        Ok(signals) => signals,
        Err(e) => {
            tracing::error!(error = %e, "signal setup failed, falling back to ctrl-c");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    if let Some(signal) = signals.next().await {
        info!(signal, "received shutdown signal, stopping gracefully");
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received ctrl-c, stopping gracefully");
    }
}
