// ABOUTME: Server binary wiring config, logging, stores, and the HTTP listener
// ABOUTME: Runs until ctrl-c, then drains in-flight requests before exiting
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # fittrack server binary
//!
//! Loads configuration from the environment, initializes logging, wires
//! the in-memory store backends, and serves the REST API.

use std::sync::Arc;

use anyhow::Result;
use fittrack::config::ServerConfig;
use fittrack::context::ServerResources;
use fittrack::logging;
use fittrack::routes;
use fittrack::store::MemoryDocumentStore;
use fittrack::tsdb::MemoryTimeSeriesStore;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env()?;
    logging::init_from_env()?;

    info!(
        environment = ?config.environment,
        port = config.http_port,
        "starting fittrack server"
    );

    let resources = Arc::new(ServerResources::new(
        config.clone(),
        Arc::new(MemoryDocumentStore::new()),
        Arc::new(MemoryTimeSeriesStore::new()),
    ));

    let app = routes::router(resources);
    let addr = format!("{}:{}", config.host, config.http_port);
    let listener = TcpListener::bind(&addr).await?;
    info!(address = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
        return;
    }
    info!("shutdown signal received");
}
