mod config;
mod model;
mod odds_api;
mod server;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::odds_api::{OddsApiClient, ResponseCache, SystemClock};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let cache = ResponseCache::new(config.cache_ttl_secs, Arc::new(SystemClock));
    let client = OddsApiClient::new(
        &config.odds_api_url,
        config.odds_api_key.clone(),
        cache.clone(),
    )?;

    // Expired entries are invisible to readers immediately; this just keeps
    // the map from growing unbounded.
    let purge_cache = cache.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            let removed = purge_cache.purge_expired().await;
            if removed > 0 {
                debug!("Purged {} expired upstream responses", removed);
            }
        }
    });

    let state = server::AppState {
        client,
        model: config.model(),
    };
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!("valuescout listening on {}", config.listen_addr);
    axum::serve(listener, server::router(state)).await?;

    Ok(())
}
