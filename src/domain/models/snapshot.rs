// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::listing::ListingRecord;

/// The single persisted accumulation of every artist searched so far and
/// every listing record gathered for them.
///
/// `artists` and `results` are independently ordered: `results` is a flat
/// list grouped only by insertion order, while `artists` records which
/// artists have already been searched so that append-mode runs can skip
/// them. The snapshot is always replaced wholesale, never patched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultSnapshot {
    pub timestamp: DateTime<Utc>,
    pub artists: Vec<String>,
    pub results: Vec<ListingRecord>,
}

impl ResultSnapshot {
    pub fn new(artists: Vec<String>, results: Vec<ListingRecord>) -> Self {
        Self {
            timestamp: Utc::now(),
            artists,
            results,
        }
    }

    /// True when this snapshot already covers `artist`, compared
    /// case-insensitively by exact name.
    pub fn contains_artist(&self, artist: &str) -> bool {
        let needle = artist.to_lowercase();
        self.artists.iter().any(|a| a.to_lowercase() == needle)
    }
}

/// How a new batch of search results combines with the persisted snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Discard any prior snapshot content and start over with this batch.
    #[default]
    Replace,
    /// Search only artists not already present in the snapshot and append
    /// the new artists and results after the prior ones.
    Append,
}
