// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;

use crate::domain::models::listing::ListingRecord;
use crate::domain::search::source::{MarketplaceSource, SearchOutcome};

/// Deep-link source for marketplaces without usable API access. Builds
/// search URLs for a fixed set of marketplaces from the artist name plus a
/// fixed query suffix; never touches the network and never fails.
pub struct WebLinkSource;

impl WebLinkSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WebLinkSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketplaceSource for WebLinkSource {
    async fn search(&self, artist: &str) -> SearchOutcome {
        let encoded = urlencoding::encode(artist);
        SearchOutcome::Fallback(vec![
            ListingRecord::search_link(
                artist,
                "MusicStack",
                format!("https://www.musicstack.com/find.cgi?find={}+vinyl", encoded),
            ),
            ListingRecord::search_link(
                artist,
                "CDandLP",
                format!("https://www.cdandlp.com/en/find/?q={}+vinyl", encoded),
            ),
        ])
    }

    fn name(&self) -> &'static str {
        "weblinks"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_returns_two_search_links() {
        let source = WebLinkSource::new();
        let records = source.search("Sonic Youth").await.into_records();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.is_search));
        assert!(records.iter().all(|r| r.link.contains("Sonic%20Youth")));
        assert_eq!(records[0].source, "MusicStack");
        assert_eq!(records[1].source, "CDandLP");
    }
}
