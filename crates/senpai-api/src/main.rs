//! senpai chat relay entry point.
//!
//! Binary name: `senpai`
//!
//! Parses CLI arguments, loads provider configuration from the
//! environment, then starts the REST API server.

mod http;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use senpai_infra::config::RelayConfig;
use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "senpai", about = "Persona chat relay over the Gemini API")]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1", env = "SENPAI_HOST")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 3000, env = "SENPAI_PORT")]
    port: u16,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,senpai=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let config = RelayConfig::from_env()?;
    tracing::info!(model = %config.model, "relay configuration loaded");

    let state = AppState::init(config);
    let router = http::router::build_router(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "senpai relay listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
