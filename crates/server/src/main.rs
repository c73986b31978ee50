mod api;
mod jobs;
mod router;
mod state;

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

/// HTTP service that parses program-definition PDFs into curriculum JSON.
#[derive(Debug, Parser)]
#[command(name = "pdparse-server", version)]
struct Args {
    /// Bind address, overriding `HOST`.
    #[arg(long)]
    host: Option<String>,
    /// Listen port, overriding `PORT`.
    #[arg(long)]
    port: Option<u16>,
}

fn load_config(args: Args) -> pdparse_core::Config {
    pdparse_core::config::load_dotenv();
    let mut config = pdparse_core::Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(args);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    config.log_summary();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config));
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    info!("API docs at http://{}/docs", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
