//! coda-mcp: exposes the Coda API as MCP tools over stdio.
//!
//! ENVIRONMENT:
//!   CODA_API_TOKEN            API token (required)
//!   CODA_API_BASE_URL         API base URL (default https://coda.io/apis/v1)
//!   CODA_HTTP_TIMEOUT_SECS    Per-request timeout (default 30)
//!   LOG_LEVEL                 error|warn|info|debug|trace (default info)

use std::sync::Arc;

use anyhow::Context;
use coda_mcp::{McpServer, ServerConfig, ToolRegistry};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("coda-mcp: {e}");
            std::process::exit(1);
        }
    };

    // stdout carries the protocol, so logs go to stderr.
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    let client = config
        .client_builder()
        .build()
        .context("failed to build Coda client")?;
    let registry = ToolRegistry::new(Arc::new(client)).context("failed to register tools")?;
    let server = Arc::new(McpServer::new(Arc::new(registry)));

    info!(
        base_url = %config.base_url,
        version = env!("CARGO_PKG_VERSION"),
        "coda-mcp starting"
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        res = server.serve(stdin, stdout) => res.context("stdio transport failed")?,
        _ = shutdown_signal() => info!("shutdown signal received"),
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
