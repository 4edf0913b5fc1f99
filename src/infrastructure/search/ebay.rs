// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::models::listing::ListingRecord;
use crate::domain::search::source::{MarketplaceSource, SearchOutcome, SourceError};
use crate::infrastructure::net::token_cache::TokenCache;

/// Browse API category for vinyl records.
const VINYL_CATEGORY_ID: &str = "176985";
/// Items per search request.
const SEARCH_LIMIT: &str = "10";

const OAUTH_SCOPE: &str = "https://api.ebay.com/oauth/api_scope";
const MARKETPLACE_ID: &str = "EBAY_US";

/// Title tokens that add no album information: media words plus condition
/// adjectives sellers pad listings with.
const TITLE_NOISE_WORDS: &[&str] = &[
    "vinyl", "record", "lp", "album", "new", "sealed", "rare", "original", "pressing",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrowseResponse {
    item_summaries: Option<Vec<ItemSummary>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemSummary {
    title: String,
    price: Option<Money>,
    condition: Option<String>,
    item_web_url: Option<String>,
    item_location: Option<ItemLocation>,
    shipping_options: Option<Vec<ShippingOption>>,
}

#[derive(Debug, Deserialize)]
struct Money {
    value: String,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct ItemLocation {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShippingOption {
    shipping_cost: Option<Money>,
}

pub struct EbayCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// eBay listings source backed by the Browse API.
///
/// Without a configured client id it degrades to a search-link record. In
/// full mode any failure at any stage (token exchange, search call, payload
/// parse) degrades to the same single search-link record; only a reachable
/// marketplace with zero hits yields an empty outcome.
pub struct EbaySource {
    client: reqwest::Client,
    token_cache: Option<TokenCache>,
    api_host: String,
}

impl EbaySource {
    pub fn new(credentials: Option<EbayCredentials>, environment: &str) -> Self {
        let api_host = match environment {
            "sandbox" => "https://api.sandbox.ebay.com".to_string(),
            _ => "https://api.ebay.com".to_string(),
        };
        Self::with_api_host(credentials, api_host)
    }

    /// Build against an explicit API host. Used by tests and by `new`.
    pub fn with_api_host(credentials: Option<EbayCredentials>, api_host: String) -> Self {
        let client = reqwest::Client::new();
        let token_cache = credentials.map(|creds| {
            TokenCache::new(
                client.clone(),
                format!("{}/identity/v1/oauth2/token", api_host),
                creds.client_id,
                creds.client_secret,
                OAUTH_SCOPE.to_string(),
            )
        });
        Self {
            client,
            token_cache,
            api_host,
        }
    }

    fn search_link_record(&self, artist: &str) -> ListingRecord {
        let link = format!(
            "https://www.ebay.com/sch/i.html?_nkw={}+vinyl",
            urlencoding::encode(artist)
        );
        ListingRecord::search_link(artist, self.name(), link)
    }

    async fn fetch_listings(
        &self,
        artist: &str,
        token_cache: &TokenCache,
    ) -> Result<Vec<ListingRecord>, SourceError> {
        let token = token_cache.access_token().await?;

        let url = format!("{}/buy/browse/v1/item_summary/search", self.api_host);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", artist),
                ("category_ids", VINYL_CATEGORY_ID),
                ("limit", SEARCH_LIMIT),
                ("fieldgroups", "EXTENDED"),
            ])
            .bearer_auth(&token)
            .header("X-EBAY-C-MARKETPLACE-ID", MARKETPLACE_ID)
            .send()
            .await
            .map_err(|e| SourceError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Upstream(format!("HTTP {}", status)));
        }

        let body: BrowseResponse = response
            .json()
            .await
            .map_err(|e| SourceError::MalformedPayload(e.to_string()))?;

        let items = body.item_summaries.unwrap_or_default();
        Ok(items
            .into_iter()
            .filter_map(|item| self.record_for_item(artist, item))
            .collect())
    }

    fn record_for_item(&self, artist: &str, item: ItemSummary) -> Option<ListingRecord> {
        // A record without a link is useless downstream.
        let link = item.item_web_url?;

        let price = item
            .price
            .map(format_money)
            .unwrap_or_else(|| "See listing".to_string());
        let shipping = item
            .shipping_options
            .and_then(|options| options.into_iter().next())
            .and_then(|option| option.shipping_cost)
            .map(format_money);
        let country = item
            .item_location
            .and_then(|location| location.country)
            .unwrap_or_else(|| "N/A".to_string());

        Some(ListingRecord {
            artist: artist.to_string(),
            album: clean_title(&item.title),
            year: String::new(),
            price,
            shipping,
            condition: item.condition.unwrap_or_else(|| "N/A".to_string()),
            country,
            source: self.name().to_string(),
            link,
            is_search: false,
        })
    }
}

fn format_money(money: Money) -> String {
    format!("{} {}", money.value, money.currency)
}

/// Strip noise words from a listing title and normalize whitespace, leaving
/// something closer to a display album title.
fn clean_title(title: &str) -> String {
    title
        .split_whitespace()
        .filter(|word| {
            let bare = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            !TITLE_NOISE_WORDS.contains(&bare.as_str())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl MarketplaceSource for EbaySource {
    async fn search(&self, artist: &str) -> SearchOutcome {
        let token_cache = match self.token_cache.as_ref() {
            Some(cache) => cache,
            None => {
                debug!("No eBay client id configured, returning search link");
                return SearchOutcome::Fallback(vec![self.search_link_record(artist)]);
            }
        };

        match self.fetch_listings(artist, token_cache).await {
            Ok(records) if records.is_empty() => SearchOutcome::Empty,
            Ok(records) => {
                info!("eBay returned {} records for {}", records.len(), artist);
                SearchOutcome::Listings(records)
            }
            Err(e) => {
                warn!("eBay search failed for {}: {}", artist, e);
                SearchOutcome::Fallback(vec![self.search_link_record(artist)])
            }
        }
    }

    fn name(&self) -> &'static str {
        "eBay"
    }
}
