// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::models::listing::ListingRecord;
use crate::domain::search::source::{MarketplaceSource, SearchOutcome, SourceError};
use crate::infrastructure::net::rate_limiter::RateLimiter;

/// Observed spacing the Discogs API tolerates for token-authenticated
/// clients (60 requests per minute).
pub const MIN_REQUEST_INTERVAL_MS: u64 = 1100;

/// How long to back off after a 429 before retrying the identical request.
const THROTTLE_COOLDOWN: Duration = Duration::from_secs(60);
/// Total attempts per request, including the first one.
const MAX_THROTTLE_ATTEMPTS: u32 = 3;

/// Vinyl releases per search page.
const SEARCH_PAGE_SIZE: u32 = 15;
/// Release-detail lookups per artist; each one costs a rate-limited call.
const DETAIL_FETCH_LIMIT: usize = 8;

const USER_AGENT: &str = "cratedigger/0.1 +https://github.com/Kirky-X/cratedigger";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: u64,
    title: String,
    year: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReleaseDetail {
    year: Option<u32>,
    num_for_sale: Option<u32>,
    lowest_price: Option<f64>,
}

/// Discogs catalog source: release search plus per-release marketplace
/// stats (`num_for_sale` / `lowest_price`).
///
/// Without an access token it degrades to a single search-link record; with
/// one it issues rate-limited API calls and emits one record per candidate
/// release.
pub struct DiscogsSource {
    client: reqwest::Client,
    token: Option<String>,
    api_base: String,
    web_base: String,
    rate_limiter: Arc<RateLimiter>,
    throttle_cooldown: Duration,
}

impl DiscogsSource {
    pub fn new(token: Option<String>, rate_limiter: Arc<RateLimiter>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            api_base: "https://api.discogs.com".to_string(),
            web_base: "https://www.discogs.com".to_string(),
            rate_limiter,
            throttle_cooldown: THROTTLE_COOLDOWN,
        }
    }

    /// Point the client at a different API host. Used by tests.
    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base;
        self
    }

    pub fn with_throttle_cooldown(mut self, cooldown: Duration) -> Self {
        self.throttle_cooldown = cooldown;
        self
    }

    /// Rate-limited GET with bounded cooldown-and-retry on upstream 429s.
    /// The retried request is identical to the original.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, SourceError> {
        for attempt in 1..=MAX_THROTTLE_ATTEMPTS {
            self.rate_limiter.throttle().await;

            let response = self
                .client
                .get(url)
                .query(query)
                .header(reqwest::header::USER_AGENT, USER_AGENT)
                .send()
                .await
                .map_err(|e| SourceError::Upstream(e.to_string()))?;

            let status = response.status();
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                if attempt < MAX_THROTTLE_ATTEMPTS {
                    warn!(
                        "Discogs throttled request (attempt {}), cooling down for {:?}",
                        attempt, self.throttle_cooldown
                    );
                    tokio::time::sleep(self.throttle_cooldown).await;
                    continue;
                }
                return Err(SourceError::Throttled);
            }
            if !status.is_success() {
                return Err(SourceError::Upstream(format!("HTTP {}", status)));
            }

            return response
                .json::<T>()
                .await
                .map_err(|e| SourceError::MalformedPayload(e.to_string()));
        }

        Err(SourceError::Throttled)
    }

    async fn search_releases(&self, artist: &str, token: &str) -> Result<Vec<SearchResult>, SourceError> {
        let url = format!("{}/database/search", self.api_base);
        let per_page = SEARCH_PAGE_SIZE.to_string();
        let query = [
            ("artist", artist),
            ("format", "Vinyl"),
            ("type", "release"),
            ("per_page", per_page.as_str()),
            ("token", token),
        ];
        let response: SearchResponse = self.get_json(&url, &query).await?;
        Ok(response.results)
    }

    async fn fetch_release_detail(&self, id: u64, token: &str) -> Result<ReleaseDetail, SourceError> {
        let url = format!("{}/releases/{}", self.api_base, id);
        self.get_json(&url, &[("token", token)]).await
    }

    fn search_link_record(&self, artist: &str) -> ListingRecord {
        let link = format!(
            "{}/search/?q={}&format_exact=Vinyl&type=release",
            self.web_base,
            urlencoding::encode(artist)
        );
        ListingRecord::search_link(artist, self.name(), link)
    }

    /// Candidate titles come back as `"Artist - Album"`. Split on the first
    /// `" - "`; titles without the separator keep the query artist and use
    /// the whole title as the album.
    fn split_title(query_artist: &str, title: &str) -> (String, String) {
        match title.split_once(" - ") {
            Some((artist, album)) => (artist.to_string(), album.to_string()),
            None => (query_artist.to_string(), title.to_string()),
        }
    }

    fn record_for_release(
        &self,
        artist: String,
        album: String,
        id: u64,
        detail: &ReleaseDetail,
    ) -> ListingRecord {
        let year = detail.year.map(|y| y.to_string()).unwrap_or_default();
        let for_sale = detail.num_for_sale.unwrap_or(0);

        if for_sale > 0 {
            let price = match detail.lowest_price {
                Some(lowest) => format!("From ${:.2}", lowest),
                None => format!("{} for sale", for_sale),
            };
            ListingRecord {
                artist,
                album,
                year,
                price,
                shipping: None,
                condition: "Various".to_string(),
                country: "Various".to_string(),
                source: self.name().to_string(),
                link: format!("{}/sell/release/{}", self.web_base, id),
                is_search: false,
            }
        } else {
            ListingRecord {
                artist,
                album,
                year,
                price: "No listings".to_string(),
                shipping: None,
                condition: "N/A".to_string(),
                country: "N/A".to_string(),
                source: self.name().to_string(),
                link: format!("{}/release/{}", self.web_base, id),
                is_search: false,
            }
        }
    }

    /// Emitted when the release was found by search but its detail lookup
    /// failed; the release stays in the batch with degraded fields.
    fn degraded_release_record(
        &self,
        artist: String,
        album: String,
        year: String,
        id: u64,
    ) -> ListingRecord {
        ListingRecord {
            artist,
            album,
            year,
            price: "See listings".to_string(),
            shipping: None,
            condition: "Various".to_string(),
            country: "Various".to_string(),
            source: self.name().to_string(),
            link: format!("{}/sell/release/{}", self.web_base, id),
            is_search: false,
        }
    }
}

#[async_trait]
impl MarketplaceSource for DiscogsSource {
    async fn search(&self, artist: &str) -> SearchOutcome {
        let token = match self.token.as_deref() {
            Some(token) => token,
            None => {
                debug!("No Discogs token configured, returning search link");
                return SearchOutcome::Fallback(vec![self.search_link_record(artist)]);
            }
        };

        let candidates = match self.search_releases(artist, token).await {
            Ok(results) => results,
            Err(e) => {
                warn!("Discogs search failed for {}: {}", artist, e);
                return SearchOutcome::Empty;
            }
        };
        if candidates.is_empty() {
            return SearchOutcome::Empty;
        }

        let mut records = Vec::new();
        for candidate in candidates.into_iter().take(DETAIL_FETCH_LIMIT) {
            let (rec_artist, album) = Self::split_title(artist, &candidate.title);
            match self.fetch_release_detail(candidate.id, token).await {
                Ok(detail) => {
                    records.push(self.record_for_release(rec_artist, album, candidate.id, &detail));
                }
                Err(e) => {
                    // Partial failure keeps the release, degraded, rather
                    // than dropping it or aborting the batch.
                    warn!(
                        "Discogs detail fetch failed for release {}: {}",
                        candidate.id, e
                    );
                    records.push(self.degraded_release_record(
                        rec_artist,
                        album,
                        candidate.year.unwrap_or_default(),
                        candidate.id,
                    ));
                }
            }
        }

        info!("Discogs returned {} records for {}", records.len(), artist);
        SearchOutcome::Listings(records)
    }

    fn name(&self) -> &'static str {
        "Discogs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_without_token() -> DiscogsSource {
        DiscogsSource::new(
            None,
            Arc::new(RateLimiter::new(Duration::from_millis(MIN_REQUEST_INTERVAL_MS))),
        )
    }

    #[test]
    fn splits_artist_album_title_on_first_separator() {
        let (artist, album) = DiscogsSource::split_title("Pink Floyd", "Pink Floyd - The Wall");
        assert_eq!(artist, "Pink Floyd");
        assert_eq!(album, "The Wall");
    }

    #[test]
    fn title_without_separator_keeps_query_artist() {
        let (artist, album) = DiscogsSource::split_title("Pink Floyd", "Animals");
        assert_eq!(artist, "Pink Floyd");
        assert_eq!(album, "Animals");
    }

    #[test]
    fn split_only_happens_on_the_first_separator() {
        let (artist, album) =
            DiscogsSource::split_title("Various", "Some Artist - Album - Deluxe Edition");
        assert_eq!(artist, "Some Artist");
        assert_eq!(album, "Album - Deluxe Edition");
    }

    #[tokio::test]
    async fn missing_token_degrades_to_one_search_link() {
        let source = source_without_token();
        let outcome = source.search("Led Zeppelin").await;

        let records = match outcome {
            SearchOutcome::Fallback(records) => records,
            other => panic!("expected fallback, got {:?}", other),
        };
        assert_eq!(records.len(), 1);
        assert!(records[0].is_search);
        assert!(records[0].link.contains("Led%20Zeppelin"));
        assert!(records[0].link.contains("format_exact=Vinyl"));
        assert_eq!(records[0].source, "Discogs");
    }
}
