//! Campus Market server binary.

use anyhow::Context;
use campus_market_store::{
    MemoryListingStore, MemoryReviewStore, MemorySessionStore, MemoryUserStore,
};
use campus_market_web::{AppConfig, AppState, app_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(
        MemoryUserStore::new(),
        MemoryListingStore::new(),
        MemoryReviewStore::new(),
        MemorySessionStore::new(),
        config,
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "campus market listening");
    axum::serve(listener, app_router(state))
        .await
        .context("server error")?;
    Ok(())
}
