//! venture-match HTTP server.
//!
//! Loads [`AppConfig`], wires the services to in-memory repositories and
//! serves the REST API until Ctrl-C.

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use venture_match::api::rest::{AppState, create_router};
use venture_match::application::config::{AppConfig, LogConfig};
use venture_match::application::services::{ComplianceService, MatchingService};
use venture_match::domain::services::SECTION_42_INVESTOR_LIMIT;
use venture_match::infrastructure::persistence::in_memory::{
    InMemoryDealRepository, InMemoryInvestorRepository, InMemoryStartupRepository,
};

fn init_tracing(cfg: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));
    if cfg.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.logging);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        investor_limit = SECTION_42_INVESTOR_LIMIT,
        cache_scores = config.matching.cache_scores,
        "starting venture-match"
    );

    let matching = MatchingService::new(
        Arc::new(InMemoryStartupRepository::new()),
        Arc::new(InMemoryInvestorRepository::new()),
        config.matching,
    );
    let compliance = ComplianceService::new(
        Arc::new(InMemoryDealRepository::new()),
        config.compliance,
    );
    let state = AppState {
        matching: Arc::new(matching),
        compliance: Arc::new(compliance),
    };

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    Ok(())
}
