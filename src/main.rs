mod auth;
mod config;
mod error;
mod executor;
mod graph;
mod normalize;
mod paginate;
mod query;
mod request;
mod sanitize;
mod server;
mod tools;

use anyhow::Context;
use config::Config;
use executor::DraftsExecutor;
use graph::GraphClient;
use server::DraftsMcp;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout belongs to the MCP transport, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("Invalid configuration")?;
    let credential = auth::find_token()
        .context("Provide a Microsoft Graph access token with Mail.Read scope")?;

    let executor = Arc::new(DraftsExecutor::new(GraphClient::with_base_url(
        config.graph_base_url.clone(),
    )));
    let handler = DraftsMcp {
        executor,
        credential,
        call_timeout: config.call_timeout,
    };

    tracing::info!(
        graph = %config.graph_base_url,
        timeout_secs = config.call_timeout.as_secs(),
        "starting drafts MCP server on stdio"
    );

    let service = rmcp::serve_server(handler, rmcp::transport::stdio())
        .await
        .context("Failed to start MCP server")?;

    // Wait for the client to disconnect (EOF on stdin)
    service.waiting().await?;

    Ok(())
}
