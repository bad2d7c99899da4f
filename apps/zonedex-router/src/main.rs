//! zonedex router - zone resolution service
//!
//! Builds the zone index once at startup and resolves `/{category}` and
//! `/{category}/{path}` requests against it. The index is never rebuilt
//! once it has been cached.

mod config;
mod dto;
mod export;
mod handlers;
mod routes;

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use zonedex_domain::zones::ZoneIndexService;
use zonedex_http::{FeedConfig, HttpZoneFeed};

use crate::config::RouterConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub zones: Arc<ZoneIndexService<HttpZoneFeed>>,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables before reading any configuration
    dotenvy::dotenv().ok();

    let config = RouterConfig::from_env()?;
    init_tracing(config.json_logs);

    info!("Starting zonedex router");

    let feed_config = FeedConfig::from_env()?;
    info!(
        endpoint = %feed_config.endpoint,
        user_agent = %feed_config.user_agent,
        timeout_secs = feed_config.timeout.as_secs(),
        "Initializing zone feed"
    );

    let service = Arc::new(ZoneIndexService::new(HttpZoneFeed::new(feed_config)?));

    // Warm the cache so the first request does not pay for the fetch
    match service.get_zone_index().await {
        Ok(index) => {
            let stats = index.stats();
            info!(
                zones = stats.zones,
                identifiers = stats.identifiers,
                categories = ?index.categories(),
                "Zone index ready"
            );

            if let Some(path) = &config.export_path {
                export::write_asset(&index, path).await?;
            }
        }
        Err(err) if config.require_index => return Err(err.into()),
        Err(err) => {
            warn!(error = %err, "Serving without a zone index, requests will retry the build");
        }
    }

    let state = AppState { zones: service };

    // Build HTTP router
    let app = routes::create_router(state);

    let addr = config.bind_addr();
    info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
