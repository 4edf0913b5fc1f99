// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::models::listing::ListingRecord;
use crate::domain::search::source::{MarketplaceSource, SearchOutcome};

/// Default pause between artists in a batch. Layered on top of each
/// source's own rate limiting to bound the aggregate request rate.
pub const DEFAULT_ARTIST_DELAY_MS: u64 = 500;

/// Fans one artist out to every marketplace source, strictly sequentially,
/// and concatenates the outputs in invocation order. Source order only
/// affects display grouping. The sequential invocation pattern is what
/// keeps each source's last-timestamp rate limiter honest.
pub struct ListingAggregator {
    sources: Vec<Arc<dyn MarketplaceSource>>,
    artist_delay: Duration,
}

impl ListingAggregator {
    pub fn new(sources: Vec<Arc<dyn MarketplaceSource>>, artist_delay: Duration) -> Self {
        Self {
            sources,
            artist_delay,
        }
    }

    /// Run every source for one artist and concatenate their records.
    pub async fn aggregate_for_artist(&self, artist: &str) -> Vec<ListingRecord> {
        let mut records = Vec::new();
        for source in &self.sources {
            let outcome = source.search(artist).await;
            match &outcome {
                SearchOutcome::Listings(found) => {
                    debug!("Source {} resolved {} listings", source.name(), found.len());
                }
                SearchOutcome::Fallback(links) => {
                    warn!(
                        "Source {} degraded to {} search link(s)",
                        source.name(),
                        links.len()
                    );
                }
                SearchOutcome::Empty => {
                    debug!("Source {} had nothing for {}", source.name(), artist);
                }
            }
            records.extend(outcome.into_records());
        }
        records
    }

    /// Aggregate a whole batch, honoring the inter-artist pacing delay
    /// between consecutive artists.
    pub async fn aggregate(&self, artists: &[String]) -> Vec<ListingRecord> {
        let mut records = Vec::new();
        for (index, artist) in artists.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.artist_delay).await;
            }
            info!("Aggregating listings for {}", artist);
            records.extend(self.aggregate_for_artist(artist).await);
        }
        records
    }
}
