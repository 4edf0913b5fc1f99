// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use cratedigger::domain::models::listing::ListingRecord;
use cratedigger::domain::models::snapshot::{ResultSnapshot, SearchMode};
use cratedigger::domain::search::source::{MarketplaceSource, SearchOutcome};
use cratedigger::domain::services::search_service::{SearchService, SearchServiceError};
use cratedigger::infrastructure::search::aggregator::ListingAggregator;
use cratedigger::infrastructure::snapshot_store::SnapshotStore;

struct OneRecordSource;

#[async_trait]
impl MarketplaceSource for OneRecordSource {
    async fn search(&self, artist: &str) -> SearchOutcome {
        SearchOutcome::Listings(vec![ListingRecord {
            artist: artist.to_string(),
            album: format!("{} anthology", artist),
            year: "1977".to_string(),
            price: "9.99 USD".to_string(),
            shipping: None,
            condition: "VG+".to_string(),
            country: "US".to_string(),
            source: "stub".to_string(),
            link: format!("https://example.com/{}", artist),
            is_search: false,
        }])
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn service_with_store(dir: &tempfile::TempDir) -> (Arc<SearchService>, Arc<SnapshotStore>) {
    let aggregator = Arc::new(ListingAggregator::new(
        vec![Arc::new(OneRecordSource)],
        Duration::ZERO,
    ));
    let store = Arc::new(SnapshotStore::new(dir.path().join("results.json")));
    (
        Arc::new(SearchService::new(aggregator, store.clone())),
        store,
    )
}

#[tokio::test]
async fn replace_mode_creates_a_snapshot_from_scratch() {
    let dir = tempfile::tempdir().unwrap();
    let (service, store) = service_with_store(&dir);

    let run = service
        .run_search(vec!["A".to_string(), "B".to_string()], SearchMode::Replace)
        .await
        .unwrap();

    assert!(!run.empty_batch);
    assert_eq!(run.searched_artists, vec!["A", "B"]);
    assert_eq!(run.snapshot.artists, vec!["A", "B"]);
    assert_eq!(run.snapshot.results.len(), 2);

    let persisted = store.load().await.unwrap().unwrap();
    assert_eq!(persisted.artists, run.snapshot.artists);
}

#[tokio::test]
async fn replace_mode_discards_any_prior_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let (service, store) = service_with_store(&dir);

    service
        .run_search(vec!["A".to_string(), "B".to_string()], SearchMode::Replace)
        .await
        .unwrap();
    let run = service
        .run_search(vec!["A".to_string()], SearchMode::Replace)
        .await
        .unwrap();

    assert_eq!(run.snapshot.artists, vec!["A"]);
    assert_eq!(run.snapshot.results.len(), 1);
    let persisted = store.load().await.unwrap().unwrap();
    assert_eq!(persisted.artists, vec!["A"]);
}

#[tokio::test]
async fn append_mode_excludes_prior_artists_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    let (service, _store) = service_with_store(&dir);

    service
        .run_search(vec!["A".to_string(), "B".to_string()], SearchMode::Replace)
        .await
        .unwrap();
    let run = service
        .run_search(vec!["b".to_string(), "C".to_string()], SearchMode::Append)
        .await
        .unwrap();

    assert_eq!(run.searched_artists, vec!["C"]);
    assert_eq!(run.snapshot.artists, vec!["A", "B", "C"]);
    // Prior results come first, new results after.
    assert_eq!(run.snapshot.results.len(), 3);
    assert_eq!(run.snapshot.results[0].artist, "A");
    assert_eq!(run.snapshot.results[2].artist, "C");
}

#[tokio::test]
async fn append_mode_without_prior_snapshot_behaves_like_replace() {
    let dir = tempfile::tempdir().unwrap();
    let (service, _store) = service_with_store(&dir);

    let run = service
        .run_search(vec!["A".to_string()], SearchMode::Append)
        .await
        .unwrap();

    assert!(!run.empty_batch);
    assert_eq!(run.snapshot.artists, vec!["A"]);
}

#[tokio::test]
async fn fully_covered_append_batch_signals_empty_and_leaves_the_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let (service, store) = service_with_store(&dir);

    service
        .run_search(vec!["A".to_string(), "B".to_string()], SearchMode::Replace)
        .await
        .unwrap();
    let before = tokio::fs::read(store.path()).await.unwrap();

    let run = service
        .run_search(vec!["a".to_string()], SearchMode::Append)
        .await
        .unwrap();

    assert!(run.empty_batch);
    assert!(run.searched_artists.is_empty());
    assert_eq!(run.snapshot.artists, vec!["A", "B"]);

    let after = tokio::fs::read(store.path()).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn blank_input_batch_is_a_hard_error() {
    let dir = tempfile::tempdir().unwrap();
    let (service, _store) = service_with_store(&dir);

    let err = service
        .run_search(vec!["  ".to_string(), String::new()], SearchMode::Replace)
        .await
        .unwrap_err();
    assert!(matches!(err, SearchServiceError::EmptyInput));
}

#[tokio::test]
async fn artist_names_are_trimmed_before_searching() {
    let dir = tempfile::tempdir().unwrap();
    let (service, _store) = service_with_store(&dir);

    let run = service
        .run_search(vec!["  Can  ".to_string()], SearchMode::Replace)
        .await
        .unwrap();
    assert_eq!(run.searched_artists, vec!["Can"]);
}

#[tokio::test]
async fn snapshot_round_trips_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("nested").join("results.json"));

    assert!(store.load().await.unwrap().is_none());

    let snapshot = ResultSnapshot::new(
        vec!["A".to_string()],
        vec![ListingRecord::search_link(
            "A",
            "stub",
            "https://example.com".to_string(),
        )],
    );
    store.save(&snapshot).await.unwrap();

    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded, snapshot);

    // The temporary file from the atomic replace must not linger.
    let mut entries = tokio::fs::read_dir(dir.path().join("nested")).await.unwrap();
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.unwrap() {
        names.push(entry.file_name());
    }
    assert_eq!(names, vec!["results.json"]);
}
