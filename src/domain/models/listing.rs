// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// One normalized marketplace search result, or a degraded search-link
/// pointing at a marketplace search page when no resolved listing is
/// available.
///
/// `artist`, `source` and `link` are always present. Records with
/// `is_search == true` carry no reliable price/year semantics and must not
/// be fed into aggregate price math.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub artist: String,
    pub album: String,
    pub year: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<String>,
    pub condition: String,
    pub country: String,
    pub source: String,
    pub link: String,
    pub is_search: bool,
}

impl ListingRecord {
    /// Build a search-link fallback record for a marketplace without usable
    /// API access (or whose API access failed).
    pub fn search_link(artist: &str, source: &str, link: String) -> Self {
        Self {
            artist: artist.to_string(),
            album: "All vinyl listings".to_string(),
            year: String::new(),
            price: "Various".to_string(),
            shipping: None,
            condition: "Various".to_string(),
            country: "Various".to_string(),
            source: source.to_string(),
            link,
            is_search: true,
        }
    }
}
