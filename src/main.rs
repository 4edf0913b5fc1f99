// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

use cratedigger::config::settings::Settings;
use cratedigger::domain::search::source::MarketplaceSource;
use cratedigger::domain::services::search_service::SearchService;
use cratedigger::infrastructure::net::rate_limiter::RateLimiter;
use cratedigger::infrastructure::search::aggregator::ListingAggregator;
use cratedigger::infrastructure::search::discogs::{self, DiscogsSource};
use cratedigger::infrastructure::search::ebay::{EbayCredentials, EbaySource};
use cratedigger::infrastructure::search::weblinks::WebLinkSource;
use cratedigger::infrastructure::snapshot_store::SnapshotStore;
use cratedigger::presentation::routes;
use cratedigger::utils::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting cratedigger...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Build marketplace sources
    let discogs_limiter = Arc::new(RateLimiter::new(Duration::from_millis(
        discogs::MIN_REQUEST_INTERVAL_MS,
    )));
    let discogs = Arc::new(DiscogsSource::new(
        settings.sources.discogs_token.clone(),
        discogs_limiter,
    ));

    let ebay_credentials = match (
        settings.sources.ebay_client_id.clone(),
        settings.sources.ebay_client_secret.clone(),
    ) {
        (Some(client_id), Some(client_secret)) => Some(EbayCredentials {
            client_id,
            client_secret,
        }),
        _ => None,
    };
    let ebay = Arc::new(EbaySource::new(
        ebay_credentials,
        &settings.sources.ebay_environment,
    ));

    let weblinks = Arc::new(WebLinkSource::new());

    let sources: Vec<Arc<dyn MarketplaceSource>> = vec![discogs, ebay, weblinks];
    info!("Initialized {} marketplace sources", sources.len());

    // 4. Wire the aggregation core
    let aggregator = Arc::new(ListingAggregator::new(
        sources,
        Duration::from_millis(settings.aggregation.artist_delay_ms),
    ));
    let store = Arc::new(SnapshotStore::new(&settings.storage.snapshot_path));
    let service = Arc::new(SearchService::new(aggregator, store));

    // 5. Start HTTP server
    let app = routes::routes(service);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
