// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::ListingRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Internal failure taxonomy for a marketplace source. These never cross the
/// `MarketplaceSource` boundary; each client converts them into a
/// `SearchOutcome` variant instead.
#[derive(Debug, Error, Clone)]
pub enum SourceError {
    #[error("credentials not configured")]
    MissingCredentials,
    #[error("upstream request failed: {0}")]
    Upstream(String),
    #[error("rate limited by upstream")]
    Throttled,
    #[error("malformed upstream payload: {0}")]
    MalformedPayload(String),
}

/// What a marketplace source produced for one artist. The variants make the
/// isolate-and-degrade policy explicit: a source either resolved real
/// listings, degraded to one or more search-link records, or came back
/// empty. There is no error variant on purpose.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Resolved marketplace listings.
    Listings(Vec<ListingRecord>),
    /// Search-link fallback records, used when API access is unavailable or
    /// failed mid-flight.
    Fallback(Vec<ListingRecord>),
    /// The source was reachable but had nothing for this artist.
    Empty,
}

impl SearchOutcome {
    pub fn into_records(self) -> Vec<ListingRecord> {
        match self {
            SearchOutcome::Listings(records) | SearchOutcome::Fallback(records) => records,
            SearchOutcome::Empty => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SearchOutcome::Listings(records) | SearchOutcome::Fallback(records) => records.len(),
            SearchOutcome::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One external marketplace. Implementations must never fail past this
/// boundary: every internal fault is absorbed into the returned outcome so
/// that one broken source cannot abort aggregation for the others.
#[async_trait]
pub trait MarketplaceSource: Send + Sync {
    /// Search the marketplace for vinyl listings by this artist.
    async fn search(&self, artist: &str) -> SearchOutcome;

    /// Display name of the marketplace, used as `ListingRecord::source`.
    fn name(&self) -> &'static str;
}
