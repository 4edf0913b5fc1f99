// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::models::snapshot::{ResultSnapshot, SearchMode};
use crate::infrastructure::search::aggregator::ListingAggregator;
use crate::infrastructure::snapshot_store::{SnapshotStore, SnapshotStoreError};

#[derive(Error, Debug)]
pub enum SearchServiceError {
    #[error("no artists supplied")]
    EmptyInput,
    #[error(transparent)]
    Store(#[from] SnapshotStoreError),
}

/// Result of one aggregation run.
#[derive(Debug)]
pub struct SearchRun {
    /// The combined snapshot after the run (the prior snapshot, unchanged,
    /// when the batch was empty).
    pub snapshot: ResultSnapshot,
    /// Artists actually searched this run, after append-mode filtering.
    pub searched_artists: Vec<String>,
    /// True when append-mode filtering left nothing to search; the
    /// persisted snapshot was not rewritten.
    pub empty_batch: bool,
}

/// Runs the replace/append merge protocol over the persisted snapshot.
///
/// The whole read-merge-write sequence holds a process-wide write lock, so
/// two concurrent requests cannot both decide an artist is novel and
/// duplicate it.
pub struct SearchService {
    aggregator: Arc<ListingAggregator>,
    store: Arc<SnapshotStore>,
    write_lock: Mutex<()>,
}

impl SearchService {
    pub fn new(aggregator: Arc<ListingAggregator>, store: Arc<SnapshotStore>) -> Self {
        Self {
            aggregator,
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Aggregate listings for `artists` and combine them with the persisted
    /// snapshot according to `mode`.
    ///
    /// Partial upstream failures never surface here; the only hard errors
    /// are an empty input batch and a snapshot that cannot be loaded or
    /// persisted.
    pub async fn run_search(
        &self,
        artists: Vec<String>,
        mode: SearchMode,
    ) -> Result<SearchRun, SearchServiceError> {
        let artists: Vec<String> = artists
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        if artists.is_empty() {
            return Err(SearchServiceError::EmptyInput);
        }

        let _guard = self.write_lock.lock().await;

        let prior = match mode {
            SearchMode::Replace => None,
            SearchMode::Append => self.store.load().await?,
        };

        let to_search: Vec<String> = match &prior {
            Some(snapshot) => artists
                .into_iter()
                .filter(|artist| !snapshot.contains_artist(artist))
                .collect(),
            None => artists,
        };

        if to_search.is_empty() {
            // Every artist in the batch was already covered; report that
            // instead of silently re-persisting the unchanged snapshot.
            return match prior {
                Some(snapshot) => {
                    info!("Append batch fully covered by prior snapshot, nothing to do");
                    Ok(SearchRun {
                        snapshot,
                        searched_artists: Vec::new(),
                        empty_batch: true,
                    })
                }
                None => Err(SearchServiceError::EmptyInput),
            };
        }

        info!(
            "Searching {} artist(s) in {:?} mode",
            to_search.len(),
            mode
        );
        let results = self.aggregator.aggregate(&to_search).await;

        let snapshot = match prior {
            Some(previous) => {
                let mut combined_artists = previous.artists;
                combined_artists.extend(to_search.iter().cloned());
                let mut combined_results = previous.results;
                combined_results.extend(results);
                ResultSnapshot::new(combined_artists, combined_results)
            }
            None => ResultSnapshot::new(to_search.clone(), results),
        };

        self.store.save(&snapshot).await?;

        Ok(SearchRun {
            snapshot,
            searched_artists: to_search,
            empty_batch: false,
        })
    }

    /// The current persisted snapshot, if any run has completed yet.
    pub async fn current_results(&self) -> Result<Option<ResultSnapshot>, SearchServiceError> {
        Ok(self.store.load().await?)
    }
}
