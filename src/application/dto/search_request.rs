// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::listing::ListingRecord;
use crate::domain::models::snapshot::SearchMode;
use crate::domain::services::search_service::SearchRun;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SearchRequestDto {
    #[validate(length(min = 1, message = "At least one artist is required"))]
    pub artists: Vec<String>,
    #[serde(default)]
    pub mode: SearchMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponseDto {
    pub timestamp: DateTime<Utc>,
    pub artists: Vec<String>,
    pub results: Vec<ListingRecord>,
    pub searched_artists: Vec<String>,
    pub empty_batch: bool,
}

impl From<SearchRun> for SearchResponseDto {
    fn from(run: SearchRun) -> Self {
        Self {
            timestamp: run.snapshot.timestamp,
            artists: run.snapshot.artists,
            results: run.snapshot.results,
            searched_artists: run.searched_artists,
            empty_batch: run.empty_batch,
        }
    }
}
